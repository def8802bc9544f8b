use std::fmt::{self, Display, Formatter};


/// A non-fatal problem found while reading the configuration file.
///
/// Warnings are kept as structured records and only turned into text
/// when they are reported (see [`ConfigurationWarnings::notice`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigurationWarning {
    /// A deprecated key was used instead of its canonical replacement.
    DeprecatedKey {
        deprecated: String,
        canonical: String,
    },

    /// The canonical key is missing and no deprecated key stood in for it.
    MissingKey { section: String, key: String },

    /// The entire section is missing.
    MissingSection { section: String },

    /// Values were taken from a legacy section name.
    LegacySection { legacy: String, current: String },

    /// A numeric value lies outside its allowed range and was replaced by the default.
    OutOfRange {
        section: String,
        key: String,
        value: i64,
        fallback: i64,
    },

    /// The CPU percentage is neither `Disabled` nor a number between 0 and 100.
    InvalidCpuPercentage { value: String },
}

impl Display for ConfigurationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationWarning::DeprecatedKey {
                deprecated,
                canonical,
            } => write!(
                f,
                "\"{}\" is deprecated.  Please use \"{}\".",
                deprecated, canonical
            ),
            ConfigurationWarning::MissingKey { section, key } => write!(
                f,
                "No \"{}\" option defined in section \"{}\".",
                key, section
            ),
            ConfigurationWarning::MissingSection { section } => {
                write!(f, "No \"{}\" section defined.", section)
            }
            ConfigurationWarning::LegacySection { legacy, current } => write!(
                f,
                "Section \"{}\" is deprecated.  Please use \"{}\".",
                legacy, current
            ),
            ConfigurationWarning::OutOfRange {
                section,
                key,
                value,
                fallback,
            } => write!(
                f,
                "Value {} of option \"{}\" in section \"{}\" is out of range, using {}.",
                value, key, section, fallback
            ),
            ConfigurationWarning::InvalidCpuPercentage { value } => write!(
                f,
                "CPU percentage \"{}\" is neither \"Disabled\" nor a number between 0 and 100.",
                value
            ),
        }
    }
}



/// An accumulating, deduplicated collection of [`ConfigurationWarning`]s.
///
/// Deduplication is by structural equality; insertion order of first occurrence is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationWarnings {
    warnings: Vec<ConfigurationWarning>,
}

impl ConfigurationWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning, unless an equal one is already present.
    pub fn push(&mut self, warning: ConfigurationWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    pub fn extend<I>(&mut self, warnings: I)
    where
        I: IntoIterator<Item = ConfigurationWarning>,
    {
        for warning in warnings {
            self.push(warning);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationWarning> {
        self.warnings.iter()
    }

    pub fn contains(&self, warning: &ConfigurationWarning) -> bool {
        self.warnings.contains(warning)
    }

    /// Formats all warnings as a single multi-line notice,
    /// or returns `None` if there is nothing to report.
    pub fn notice(&self) -> Option<String> {
        if self.warnings.is_empty() {
            return None;
        }

        let mut notice =
            String::from("The following warnings are emitted regarding the configuration file:\n");
        for warning in &self.warnings {
            notice.push_str("  - ");
            notice.push_str(&warning.to_string());
            notice.push('\n');
        }

        Some(notice)
    }
}

impl<'a> IntoIterator for &'a ConfigurationWarnings {
    type Item = &'a ConfigurationWarning;
    type IntoIter = std::slice::Iter<'a, ConfigurationWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn missing_section(section: &str) -> ConfigurationWarning {
        ConfigurationWarning::MissingSection {
            section: section.to_string(),
        }
    }

    #[test]
    fn deduplicates_structurally_equal_warnings() {
        let mut warnings = ConfigurationWarnings::new();
        warnings.push(missing_section("TIMEOUTS"));
        warnings.push(missing_section("ACTION"));
        warnings.push(missing_section("TIMEOUTS"));

        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains(&missing_section("ACTION")));
    }

    #[test]
    fn empty_collection_has_no_notice() {
        assert_eq!(ConfigurationWarnings::new().notice(), None);
    }

    #[test]
    fn notice_lists_every_warning_once() {
        let mut warnings = ConfigurationWarnings::new();
        warnings.extend([
            ConfigurationWarning::DeprecatedKey {
                deprecated: "start".to_string(),
                canonical: "StartHour".to_string(),
            },
            ConfigurationWarning::DeprecatedKey {
                deprecated: "start".to_string(),
                canonical: "StartHour".to_string(),
            },
        ]);

        let notice = warnings.notice().unwrap();
        assert_eq!(
            notice,
            "The following warnings are emitted regarding the configuration file:\n  \
             - \"start\" is deprecated.  Please use \"StartHour\".\n"
        );
    }
}
