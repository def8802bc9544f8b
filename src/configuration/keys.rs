//! Section names and key names of the configuration file.

use super::resolver::KeyCandidate;


pub const NO_ACTION_TIME_RANGE_SECTION: &str = "NO_ACTION_TIME_RANGE";

/// Older name of [`NO_ACTION_TIME_RANGE_SECTION`]. Read, but never written.
pub const LEGACY_NO_ACTION_TIME_RANGE_SECTION: &str = "NO_SHUTDOWN_TIME_RANGE";

pub const TIMEOUTS_SECTION: &str = "TIMEOUTS";
pub const DEPENDANTS_SECTION: &str = "DEPENDANTS";
pub const RESOURCES_SECTION: &str = "RESOURCES";
pub const ACTION_SECTION: &str = "ACTION";


pub const START_HOUR: KeyCandidate = KeyCandidate::valid("StartHour");
pub const END_HOUR: KeyCandidate = KeyCandidate::valid("EndHour");
pub const IDLE_TIME: KeyCandidate = KeyCandidate::valid("IdleTime");
pub const STARTUP_DELAY: KeyCandidate = KeyCandidate::valid("StartupDelay");
pub const HOSTS: KeyCandidate = KeyCandidate::valid("Hosts");
pub const CPU_PERCENTAGE: KeyCandidate = KeyCandidate::valid("CpuPercentage");
pub const ACTION: KeyCandidate = KeyCandidate::valid("Action");
pub const ACTION_COMMAND: KeyCandidate = KeyCandidate::valid("ActionCommand");


pub const START_HOUR_CANDIDATES: [KeyCandidate; 2] =
    [START_HOUR, KeyCandidate::deprecated("start")];

pub const END_HOUR_CANDIDATES: [KeyCandidate; 2] = [END_HOUR, KeyCandidate::deprecated("end")];

pub const IDLE_TIME_CANDIDATES: [KeyCandidate; 2] =
    [IDLE_TIME, KeyCandidate::deprecated("idle_time")];

pub const STARTUP_DELAY_CANDIDATES: [KeyCandidate; 2] =
    [STARTUP_DELAY, KeyCandidate::deprecated("startup_delay")];

pub const HOSTS_CANDIDATES: [KeyCandidate; 2] = [HOSTS, KeyCandidate::deprecated("hosts")];
