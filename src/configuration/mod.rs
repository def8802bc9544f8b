//! This module contains all configuration-relevant code: the settings model,
//! reading it from the configuration file, and writing it back.
//!
//! Your starting point should probably be [`Configuration::read`].
//!
//! # Internals
//! Reading happens in two passes, on the same unresolved / resolved split
//! used throughout this module.
//!
//! First, every setting is looked up in the parsed file by the [`OptionResolver`],
//! which tries the canonical key name and then its deprecated synonyms, and records
//! where the value came from. The result is an `UnresolvedConfiguration`.
//!
//! Its `resolve` method then falls back to the legacy
//! `NO_SHUTDOWN_TIME_RANGE` section where needed, validates ranges and the action,
//! normalizes the host list and gathers all warnings. Only when that succeeds is
//! the [`Configuration`] updated.
//!
//! Saving always writes the canonical layout (see [`document`]), so deprecated
//! key names and the legacy section disappear on the next save.

#![allow(rustdoc::private_intra_doc_links)]

mod context;
pub mod document;
mod errors;
pub mod ini;
pub mod keys;
mod resolver;
mod structure;
mod traits;
mod utilities;
mod warnings;

pub use context::*;
pub use errors::*;
pub use resolver::*;
pub use structure::*;
pub use utilities::*;
pub use warnings::*;
