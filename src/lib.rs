//! Configuration subsystem of Autopoweroff, the daemon that shuts down, suspends or
//! otherwise acts on an idle, unattended machine.
//!
//! See [`configuration::Configuration`] for reading and saving the configuration file.

pub mod action;
pub mod configuration;
pub mod logging;
pub mod notification;


/// Program version, embedded in the header of saved configuration files.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
