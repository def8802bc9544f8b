//! Resolution of a single logical setting from an ordered list of candidate key names.
//!
//! Every setting has one canonical key and possibly several deprecated synonyms.
//! [`OptionResolver::resolve`] walks the candidates in the order given, takes the first
//! one present in the section and reports what it found as a [`Resolution`]:
//! the value, where it came from ([`ResolutionSource`]) and the warnings it raised.

use std::{fmt::Debug, path::Path};

use tracing::debug;

use super::{
    errors::ConfigurationError,
    ini::{IniDocument, IniLookup},
    warnings::ConfigurationWarning,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Valid,
    Deprecated,
}


/// A key name to try, and whether it is current or deprecated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCandidate {
    pub name: &'static str,
    pub status: KeyStatus,
}

impl KeyCandidate {
    pub const fn valid(name: &'static str) -> Self {
        Self {
            name,
            status: KeyStatus::Valid,
        }
    }

    pub const fn deprecated(name: &'static str) -> Self {
        Self {
            name,
            status: KeyStatus::Deprecated,
        }
    }
}


/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Found under a current key name.
    Canonical { key: &'static str },

    /// Found under a deprecated key name.
    Deprecated { key: &'static str },

    /// The section exists, but none of the candidate keys do.
    Default,

    /// The section does not exist.
    SectionMissing,
}

impl ResolutionSource {
    /// `true` if the value was actually present in the file.
    pub fn is_found(&self) -> bool {
        self.found_key().is_some()
    }

    /// The key the value was found under, if it was found at all.
    pub fn found_key(&self) -> Option<&'static str> {
        match self {
            ResolutionSource::Canonical { key } | ResolutionSource::Deprecated { key } => {
                Some(*key)
            }
            ResolutionSource::Default | ResolutionSource::SectionMissing => None,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<T> {
    pub value: T,

    /// The section that was searched.
    pub section: String,

    pub source: ResolutionSource,

    /// Warnings raised while resolving, in the order they were raised.
    pub warnings: Vec<ConfigurationWarning>,
}



/// A type a raw configuration value can be parsed as.
pub trait FromIniValue: Sized {
    /// Human-readable description of the expected format, used in error messages.
    const EXPECTED: &'static str;

    fn from_ini_value(raw_value: &str) -> Option<Self>;
}

impl FromIniValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_ini_value(raw_value: &str) -> Option<Self> {
        raw_value.trim().parse::<i64>().ok()
    }
}

impl FromIniValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_ini_value(raw_value: &str) -> Option<Self> {
        Some(raw_value.to_string())
    }
}



/// Resolves settings against a parsed configuration file.
///
/// The resolver performs no I/O of its own; `file_path` is only used to annotate errors.
pub struct OptionResolver<'a> {
    document: &'a IniDocument,

    file_path: &'a Path,
}

impl<'a> OptionResolver<'a> {
    pub fn new(document: &'a IniDocument, file_path: &'a Path) -> Self {
        Self {
            document,
            file_path,
        }
    }

    /// Resolve one setting in `section` by trying each of the `candidates` in order.
    ///
    /// List the canonical key before its deprecated synonyms so that it takes priority.
    ///
    /// A value that is present but can not be parsed as `T` is an error,
    /// it is never treated as missing.
    pub fn resolve<T>(
        &self,
        default_value: T,
        section: &str,
        candidates: &[KeyCandidate],
    ) -> Result<Resolution<T>, ConfigurationError>
    where
        T: FromIniValue + Debug,
    {
        let canonical_key = candidates
            .iter()
            .find(|candidate| candidate.status == KeyStatus::Valid)
            .map(|candidate| candidate.name);

        let mut warnings = Vec::new();
        let mut staged_missing_key_warning = None;
        let mut section_missing = false;

        for candidate in candidates {
            match self.document.get(section, candidate.name) {
                IniLookup::Found(raw_value) => {
                    let value = T::from_ini_value(raw_value).ok_or_else(|| {
                        ConfigurationError::InvalidValue {
                            file_path: self.file_path.to_path_buf(),
                            section: section.to_string(),
                            key: candidate.name.to_string(),
                            value: raw_value.to_string(),
                            expected: T::EXPECTED,
                        }
                    })?;

                    let source = match candidate.status {
                        KeyStatus::Valid => ResolutionSource::Canonical {
                            key: candidate.name,
                        },
                        KeyStatus::Deprecated => {
                            if let Some(canonical_key) = canonical_key {
                                warnings.push(ConfigurationWarning::DeprecatedKey {
                                    deprecated: candidate.name.to_string(),
                                    canonical: canonical_key.to_string(),
                                });
                            }

                            ResolutionSource::Deprecated {
                                key: candidate.name,
                            }
                        }
                    };

                    debug!("configuration:  {} = {:?}", candidate.name, value);

                    return Ok(Resolution {
                        value,
                        section: section.to_string(),
                        source,
                        warnings,
                    });
                }
                IniLookup::MissingKey => {
                    if Some(candidate.name) == canonical_key {
                        staged_missing_key_warning = Some(ConfigurationWarning::MissingKey {
                            section: section.to_string(),
                            key: candidate.name.to_string(),
                        });
                    }
                }
                IniLookup::MissingSection => {
                    if !section_missing {
                        section_missing = true;
                        warnings.push(ConfigurationWarning::MissingSection {
                            section: section.to_string(),
                        });
                    }
                }
            }
        }


        warnings.extend(staged_missing_key_warning);

        let source = if section_missing {
            ResolutionSource::SectionMissing
        } else {
            ResolutionSource::Default
        };

        debug!(
            "configuration:  {} = {:?} (default)",
            canonical_key.unwrap_or_default(),
            default_value
        );

        Ok(Resolution {
            value: default_value,
            section: section.to_string(),
            source,
            warnings,
        })
    }
}
