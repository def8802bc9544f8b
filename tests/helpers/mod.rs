#![allow(dead_code)]

use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use autopoweroff_config::{
    configuration::{Configuration, ConfigurationContext, ConfigurationDefaults},
    notification::{NotificationDestinations, NotificationSink, Severity},
};
use tempfile::TempDir;


pub const TEST_VERSION: &str = "9.9.9-test";


/// A notification as received by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub destinations: NotificationDestinations,
}

/// Notification sink that keeps everything it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|notification| notification.severity == severity)
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, severity: Severity, destinations: NotificationDestinations) {
        self.notifications.lock().unwrap().push(Notification {
            message: message.to_string(),
            severity,
            destinations,
        });
    }
}


/// A temporary directory holding one configuration file.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub sink: RecordingSink,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().unwrap(),
            sink: RecordingSink::default(),
        }
    }

    /// Create an environment whose configuration file has the given contents.
    pub fn with_file(contents: &str) -> Self {
        let environment = Self::new();
        fs::write(environment.file_path(), contents).unwrap();
        environment
    }

    pub fn file_path(&self) -> PathBuf {
        self.temp_dir.path().join("autopoweroff.conf")
    }

    pub fn file_contents(&self) -> String {
        fs::read_to_string(self.file_path()).unwrap()
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration_with_defaults(ConfigurationDefaults::default())
    }

    pub fn configuration_with_defaults(&self, defaults: ConfigurationDefaults) -> Configuration {
        Configuration::new(
            ConfigurationContext::new(self.file_path(), TEST_VERSION),
            defaults,
        )
        .with_notification_sink(self.sink.clone())
    }
}


/// A complete file using only canonical keys.
pub const CANONICAL_FILE: &str = "\
[NO_ACTION_TIME_RANGE]
StartHour=5
EndHour=22

[TIMEOUTS]
StartupDelay=10
IdleTime=30

[DEPENDANTS]
Hosts=nas.local, 192.168.1.20

[RESOURCES]
CpuPercentage=25

[ACTION]
Action=Sleep
ActionCommand=
";
