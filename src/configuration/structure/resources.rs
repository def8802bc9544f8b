use std::collections::BTreeMap;

use serde::Serialize;

use crate::configuration::{
    traits::ResolvableConfiguration,
    warnings::ConfigurationWarning,
};


pub const CPU_RESOURCE: &str = "CPU";
pub const PERCENTAGE_METRIC: &str = "Percentage";
pub const CPU_PERCENTAGE_DISABLED: &str = "Disabled";


/// Resource thresholds, keyed by resource name and then by metric name.
///
/// Only `CPU` / `Percentage` is in use; its value is either `Disabled` or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Resources(BTreeMap<String, BTreeMap<String, String>>);

impl Resources {
    pub fn new(cpu_percentage: impl Into<String>) -> Self {
        let mut resources = Self(BTreeMap::new());
        resources.set_cpu_percentage(cpu_percentage);
        resources
    }

    pub fn get(&self, resource: &str, metric: &str) -> Option<&str> {
        self.0
            .get(resource)
            .and_then(|metrics| metrics.get(metric))
            .map(String::as_str)
    }

    pub fn set(
        &mut self,
        resource: impl Into<String>,
        metric: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0
            .entry(resource.into())
            .or_default()
            .insert(metric.into(), value.into());
    }

    pub fn cpu_percentage(&self) -> &str {
        self.get(CPU_RESOURCE, PERCENTAGE_METRIC)
            .unwrap_or(CPU_PERCENTAGE_DISABLED)
    }

    pub fn set_cpu_percentage(&mut self, value: impl Into<String>) {
        self.set(CPU_RESOURCE, PERCENTAGE_METRIC, value);
    }

    /// The CPU usage percentage below which the machine counts as idle,
    /// or `None` if the check is disabled (or the value is not a valid percentage).
    pub fn cpu_percentage_threshold(&self) -> Option<f64> {
        parse_cpu_percentage(self.cpu_percentage()).ok().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.0.iter().flat_map(|(resource, metrics)| {
            metrics
                .iter()
                .map(move |(metric, value)| (resource.as_str(), metric.as_str(), value.as_str()))
        })
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new(CPU_PERCENTAGE_DISABLED)
    }
}


/// `Ok(None)` for `Disabled`, `Ok(Some(_))` for a number in 0..=100.
fn parse_cpu_percentage(value: &str) -> Result<Option<f64>, ()> {
    let value = value.trim();

    if value.eq_ignore_ascii_case(CPU_PERCENTAGE_DISABLED) {
        return Ok(None);
    }

    match value.parse::<f64>() {
        Ok(percentage) if (0.0..=100.0).contains(&percentage) => Ok(Some(percentage)),
        _ => Err(()),
    }
}



/// The raw `CpuPercentage` string as read from the file.
pub(crate) struct UnresolvedCpuPercentage(pub(crate) String);

impl ResolvableConfiguration for UnresolvedCpuPercentage {
    type Resolved = String;
    type Error = ConfigurationWarning;

    /// The value is kept as written either way; an invalid one is only warned about.
    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        match parse_cpu_percentage(&self.0) {
            Ok(_) => Ok(self.0),
            Err(()) => Err(ConfigurationWarning::InvalidCpuPercentage { value: self.0 }),
        }
    }
}
