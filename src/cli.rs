//! Command-line interface definitions for the configuration tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "autopoweroff-config",
    author,
    about = "Check, show and rewrite the Autopoweroff configuration file.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `$AUTOPOWEROFF_CONFIGURATION`
    /// or `/etc/autopoweroff/autopoweroff.conf`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. \
                Defaults to /etc/autopoweroff/autopoweroff.conf"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        long = "console-log-level",
        default_value = "info",
        help = "Console log level filter (e.g. \"info\" or \"autopoweroff_config=debug\")."
    )]
    pub console_log_level: String,

    #[arg(
        long = "log-file-level",
        default_value = "debug",
        help = "Log file level filter. Only used together with --log-directory."
    )]
    pub log_file_level: String,

    #[arg(
        long = "log-directory",
        help = "If specified, logs are also written to a daily-rolling file in this directory."
    )]
    pub log_directory: Option<PathBuf>,

    #[arg(
        long = "system-log",
        help = "Mark configuration notices as destined for the system log, as the daemon does."
    )]
    pub system_log: bool,

    #[command(subcommand)]
    pub command: CLICommand,
}


#[derive(Subcommand)]
pub enum CLICommand {
    /// Read the configuration file and report warnings and errors.
    Check,

    /// Read the configuration file and print the resolved settings as TOML.
    Show,

    /// Read the configuration file and write it back in canonical form,
    /// replacing deprecated keys and legacy sections.
    Rewrite,

    /// Write a new configuration file with default values.
    Init {
        #[arg(long = "force", help = "Overwrite the configuration file if it already exists.")]
        force: bool,
    },
}
