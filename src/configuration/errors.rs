use std::{
    fmt::{self, Display, Formatter},
    io,
    path::PathBuf,
};

use miette::Diagnostic;
use thiserror::Error;

use super::ini::IniSyntaxError;
use crate::action::Action;


const REMEDY_FOOTER: &str = "Please fix them with the GUI or by editing the file.";


/// A fatal configuration error, returned from [`read`][super::Configuration::read]
/// and [`save`][super::Configuration::save].
///
/// The component never aborts the process; it is up to the caller to render
/// the error (see [`ConfigurationError::render`]) and decide whether to exit.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigurationError {
    #[error("Could not open configuration file {}.", .file_path.display())]
    #[diagnostic(
        code(autopoweroff::configuration::unreadable),
        help("Please fix them with the GUI or by editing the file.")
    )]
    Unreadable {
        file_path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("Configuration file {} is malformed.", .file_path.display())]
    #[diagnostic(
        code(autopoweroff::configuration::syntax),
        help("Please fix them with the GUI or by editing the file.")
    )]
    Syntax {
        file_path: PathBuf,

        #[source]
        source: IniSyntaxError,
    },

    #[error(
        "Option \"{key}\" in section \"{section}\" has value \"{value}\", expected {expected}."
    )]
    #[diagnostic(
        code(autopoweroff::configuration::invalid_value),
        help("Please fix them with the GUI or by editing the file.")
    )]
    InvalidValue {
        file_path: PathBuf,
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Could not write configuration file {}.", .file_path.display())]
    #[diagnostic(code(autopoweroff::configuration::write))]
    Write {
        file_path: PathBuf,

        #[source]
        source: io::Error,
    },
}

impl ConfigurationError {
    /// Numeric error code, suitable as a process exit status.
    pub fn error_code(&self) -> i32 {
        match self {
            ConfigurationError::Unreadable { .. } => 1,
            ConfigurationError::Syntax { .. } => 2,
            ConfigurationError::InvalidValue { .. } => 3,
            ConfigurationError::Write { .. } => 4,
        }
    }

    pub fn file_path(&self) -> &PathBuf {
        match self {
            ConfigurationError::Unreadable { file_path, .. }
            | ConfigurationError::Syntax { file_path, .. }
            | ConfigurationError::InvalidValue { file_path, .. }
            | ConfigurationError::Write { file_path, .. } => file_path,
        }
    }

    /// The offending lines: the middle part of the rendered message.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ConfigurationError::Unreadable { file_path, .. } => vec![
                format!("Could not open configuration file {}", file_path.display()),
                "Using default values.".to_string(),
            ],
            ConfigurationError::Syntax { source, .. } => vec![source.to_string()],
            ConfigurationError::InvalidValue { .. } => vec![self.to_string()],
            ConfigurationError::Write { source, .. } => vec![source.to_string()],
        }
    }

    /// Render the full three-part message: a header naming the file,
    /// the offending lines and a footer pointing at the remedy.
    pub fn render(&self) -> String {
        let mut rendered = format!(
            "CONFIGURATION ERROR\n\nThe following errors were found in configuration file:\n{}\n\n",
            self.file_path().display()
        );

        for line in self.lines() {
            rendered.push_str(&line);
            rendered.push('\n');
        }

        rendered.push('\n');
        rendered.push_str(REMEDY_FOOTER);
        rendered
    }
}



/// A fatal-level problem recorded on the model instead of being raised.
///
/// Callers inspect [`Configuration::errors`][super::Configuration::errors]
/// before acting on the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationFault {
    FileUnreadable { file_path: PathBuf },

    NoAction,

    InvalidAction { value: String },

    MissingActionCommand { action: Action },
}

impl Display for ConfigurationFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationFault::FileUnreadable { file_path } => write!(
                f,
                "Could not open configuration file {}\nUsing default values.",
                file_path.display()
            ),
            ConfigurationFault::NoAction => write!(f, "No action command provided."),
            ConfigurationFault::InvalidAction { value } => {
                write!(f, "Invalid action command:  \"{}\"", value)
            }
            ConfigurationFault::MissingActionCommand { action } => write!(
                f,
                "Action \"{}\" requires an ActionCommand, but none was provided.",
                action
            ),
        }
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_error_renders_header_lines_and_footer() {
        let error = ConfigurationError::Unreadable {
            file_path: PathBuf::from("/etc/autopoweroff/autopoweroff.conf"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(error.error_code(), 1);
        assert_eq!(
            error.render(),
            "CONFIGURATION ERROR\n\n\
             The following errors were found in configuration file:\n\
             /etc/autopoweroff/autopoweroff.conf\n\n\
             Could not open configuration file /etc/autopoweroff/autopoweroff.conf\n\
             Using default values.\n\n\
             Please fix them with the GUI or by editing the file."
        );
    }

    #[test]
    fn invalid_value_names_the_offending_option() {
        let error = ConfigurationError::InvalidValue {
            file_path: PathBuf::from("a.conf"),
            section: "TIMEOUTS".to_string(),
            key: "IdleTime".to_string(),
            value: "soon".to_string(),
            expected: "an integer",
        };

        assert_eq!(error.error_code(), 3);
        assert_eq!(
            error.lines(),
            vec![
                "Option \"IdleTime\" in section \"TIMEOUTS\" has value \"soon\", expected an integer."
                    .to_string()
            ]
        );
    }

    #[test]
    fn faults_display_human_messages() {
        assert_eq!(
            ConfigurationFault::NoAction.to_string(),
            "No action command provided."
        );
        assert_eq!(
            ConfigurationFault::InvalidAction {
                value: "Bogus".to_string()
            }
            .to_string(),
            "Invalid action command:  \"Bogus\""
        );
    }
}
