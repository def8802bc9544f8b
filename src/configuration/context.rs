use std::path::PathBuf;

use miette::Result;

use super::{
    structure::{NoActionTimeRange, Resources, Settings},
    utilities::default_configuration_file_path,
};
use crate::{action::Action, notification::NotificationDestinations};


pub const DEFAULT_NO_ACTION_TIME_RANGE: NoActionTimeRange = NoActionTimeRange::new(4, 23);
pub const DEFAULT_STARTUP_DELAY_MINUTES: u32 = 15;
pub const DEFAULT_IDLE_TIME_MINUTES: u32 = 5;


/// Everything a [`Configuration`][super::Configuration] needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationContext {
    /// The configuration file that is read from and saved to.
    pub file_path: PathBuf,

    /// Program version, embedded in the header of saved files.
    pub version: String,

    /// Whether notices should also reach the system log
    /// (the daemon wants this, the GUI configurator does not).
    pub to_system_log: bool,
}

impl ConfigurationContext {
    pub fn new<P, V>(file_path: P, version: V) -> Self
    where
        P: Into<PathBuf>,
        V: Into<String>,
    {
        Self {
            file_path: file_path.into(),
            version: version.into(),
            to_system_log: false,
        }
    }

    /// Context for the configuration file at its default location.
    pub fn from_default_path<V: Into<String>>(version: V) -> Result<Self> {
        Ok(Self::new(default_configuration_file_path()?, version))
    }

    pub fn with_system_log(mut self, to_system_log: bool) -> Self {
        self.to_system_log = to_system_log;
        self
    }

    pub(crate) fn notification_destinations(&self) -> NotificationDestinations {
        if self.to_system_log {
            NotificationDestinations::CONSOLE_AND_SYSTEM_LOG
        } else {
            NotificationDestinations::CONSOLE_ONLY
        }
    }
}



/// Initial values for a [`Configuration`][super::Configuration].
/// Every field that is left as `None` takes its built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationDefaults {
    pub no_action_time_range: Option<NoActionTimeRange>,
    pub idle_time_minutes: Option<u32>,
    pub startup_delay_minutes: Option<u32>,
    pub hosts: Option<Vec<String>>,
    pub resources: Option<Resources>,
    pub action: Option<Action>,
    pub action_command: Option<String>,
}

impl ConfigurationDefaults {
    pub(crate) fn into_settings(self) -> Settings {
        Settings {
            no_action_time_range: self
                .no_action_time_range
                .unwrap_or(DEFAULT_NO_ACTION_TIME_RANGE),
            idle_time_minutes: self.idle_time_minutes.unwrap_or(DEFAULT_IDLE_TIME_MINUTES),
            startup_delay_minutes: self
                .startup_delay_minutes
                .unwrap_or(DEFAULT_STARTUP_DELAY_MINUTES),
            hosts: self.hosts.unwrap_or_default(),
            resources: self.resources.unwrap_or_default(),
            action: self.action,
            action_command: self.action_command,
        }
    }
}
