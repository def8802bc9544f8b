//! Where user-facing messages (configuration warnings, progress notices) end up.

use std::fmt::{self, Display, Formatter};

use tracing::{error, info, warn};


#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}


/// Which outputs a notification should reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDestinations {
    pub console: bool,

    /// The system log. The daemon sets this, the GUI configurator usually does not.
    pub system_log: bool,
}

impl NotificationDestinations {
    pub const CONSOLE_ONLY: Self = Self {
        console: true,
        system_log: false,
    };

    pub const CONSOLE_AND_SYSTEM_LOG: Self = Self {
        console: true,
        system_log: true,
    };
}


pub trait NotificationSink {
    fn notify(&self, message: &str, severity: Severity, destinations: NotificationDestinations);
}


/// Forwards notifications to `tracing`, which routes them
/// to whichever outputs [`initialize_tracing`][crate::logging::initialize_tracing] set up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, message: &str, severity: Severity, destinations: NotificationDestinations) {
        let NotificationDestinations {
            console,
            system_log,
        } = destinations;

        match severity {
            Severity::Info => info!(console, system_log, "{}", message),
            Severity::Warning => warn!(console, system_log, "{}", message),
            Severity::Error => error!(console, system_log, "{}", message),
        }
    }
}
