use std::{env, path::PathBuf};

use miette::{miette, Result};


/// Environment variable that overrides the configuration file location.
pub const CONFIGURATION_PATH_ENVIRONMENT_VARIABLE: &str = "AUTOPOWEROFF_CONFIGURATION";

pub const DEFAULT_CONFIGURATION_DIRECTORY: &str = "/etc/autopoweroff";
pub const CONFIGURATION_FILE_NAME: &str = "autopoweroff.conf";


/// Returns the configuration file path: the value of `AUTOPOWEROFF_CONFIGURATION` if set,
/// otherwise `/etc/autopoweroff/autopoweroff.conf`.
///
/// The file does not need to exist yet.
pub fn default_configuration_file_path() -> Result<PathBuf> {
    match env::var_os(CONFIGURATION_PATH_ENVIRONMENT_VARIABLE) {
        Some(path) if path.is_empty() => Err(miette!(
            "{} is set, but empty.",
            CONFIGURATION_PATH_ENVIRONMENT_VARIABLE
        )),
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(PathBuf::from(DEFAULT_CONFIGURATION_DIRECTORY).join(CONFIGURATION_FILE_NAME)),
    }
}
