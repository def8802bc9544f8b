//! A small parser for the sectioned `key=value` format the configuration file uses.
//!
//! The accepted dialect is the conventional one:
//! - `[SECTION]` headers, with case-sensitive section names,
//! - `key=value` or `key: value` entries, with case-insensitive key names,
//! - full-line comments starting with `#` or `;`,
//! - indented lines continuing the value of the previous entry,
//! - a `[DEFAULT]` section whose entries are visible from every other section.
//!
//! Anything else is reported as an [`IniSyntaxError`] carrying the offending line.

use thiserror::Error;


/// Name of the section whose entries act as fallbacks for every other section.
pub const DEFAULT_SECTION_NAME: &str = "DEFAULT";


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IniSyntaxErrorKind {
    #[error("entry found before any section header")]
    MissingSectionHeader,

    #[error("expected a `key=value` or `key: value` entry")]
    MissingDelimiter,

    #[error("entry has an empty key")]
    EmptyKey,

    #[error("section header is not terminated by `]`")]
    UnterminatedSectionHeader,

    #[error("section \"{section}\" is defined more than once")]
    DuplicateSection { section: String },

    #[error("key \"{key}\" is defined more than once in section \"{section}\"")]
    DuplicateKey { section: String, key: String },
}


/// A malformed line in the configuration file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line_number}: {kind}: {line:?}")]
pub struct IniSyntaxError {
    /// 1-based line number.
    pub line_number: usize,

    /// The raw line, as found in the file.
    pub line: String,

    pub kind: IniSyntaxErrorKind,
}


#[derive(Debug, Clone, PartialEq, Eq)]
struct IniSection {
    name: String,

    /// Entries in file order. Keys are folded to lower case.
    entries: Vec<(String, String)>,
}

impl IniSection {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value.as_str())
    }
}


/// Outcome of looking up a single key in a single section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniLookup<'a> {
    Found(&'a str),
    MissingKey,
    MissingSection,
}


/// A parsed configuration file: an ordered table of sections and their entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,

    defaults: Vec<(String, String)>,
}

impl IniDocument {
    /// Parse the full contents of a configuration file.
    pub fn parse(contents: &str) -> Result<Self, IniSyntaxError> {
        let mut document = IniDocument::default();

        // Index into `sections`, or `None` while inside `[DEFAULT]`.
        let mut current_section: Option<Option<usize>> = None;
        let mut last_entry_accepts_continuation = false;

        for (line_index, raw_line) in contents.lines().enumerate() {
            let line_number = line_index + 1;
            let syntax_error = |kind: IniSyntaxErrorKind| IniSyntaxError {
                line_number,
                line: raw_line.to_string(),
                kind,
            };

            let trimmed_line = raw_line.trim();

            if trimmed_line.is_empty() {
                last_entry_accepts_continuation = false;
                continue;
            }

            if trimmed_line.starts_with('#') || trimmed_line.starts_with(';') {
                continue;
            }


            let is_indented = raw_line.starts_with(char::is_whitespace);
            if is_indented && last_entry_accepts_continuation {
                if let Some(entries) = document.entries_mut(current_section) {
                    if let Some((_, value)) = entries.last_mut() {
                        value.push('\n');
                        value.push_str(trimmed_line);
                        continue;
                    }
                }
            }


            if trimmed_line.starts_with('[') {
                let Some(section_name) = trimmed_line
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                else {
                    return Err(syntax_error(
                        IniSyntaxErrorKind::UnterminatedSectionHeader,
                    ));
                };
                let section_name = section_name.trim();

                if section_name == DEFAULT_SECTION_NAME {
                    current_section = Some(None);
                } else {
                    if document.has_section(section_name) {
                        return Err(syntax_error(IniSyntaxErrorKind::DuplicateSection {
                            section: section_name.to_string(),
                        }));
                    }

                    document
                        .sections
                        .push(IniSection::new(section_name.to_string()));
                    current_section = Some(Some(document.sections.len() - 1));
                }

                last_entry_accepts_continuation = false;
                continue;
            }


            let Some(delimiter_index) = trimmed_line.find(['=', ':']) else {
                return Err(syntax_error(IniSyntaxErrorKind::MissingDelimiter));
            };

            let key = trimmed_line[..delimiter_index].trim().to_lowercase();
            let value = trimmed_line[delimiter_index + 1..].trim().to_string();

            if key.is_empty() {
                return Err(syntax_error(IniSyntaxErrorKind::EmptyKey));
            }

            let Some(section_index) = current_section else {
                return Err(syntax_error(IniSyntaxErrorKind::MissingSectionHeader));
            };

            let (section_display_name, entries) = match section_index {
                Some(index) => {
                    let section = &mut document.sections[index];
                    (section.name.as_str(), &mut section.entries)
                }
                None => (DEFAULT_SECTION_NAME, &mut document.defaults),
            };

            if entries.iter().any(|(existing_key, _)| existing_key == &key) {
                return Err(syntax_error(IniSyntaxErrorKind::DuplicateKey {
                    section: section_display_name.to_string(),
                    key,
                }));
            }

            entries.push((key, value));
            last_entry_accepts_continuation = true;
        }


        Ok(document)
    }

    fn entries_mut(
        &mut self,
        section: Option<Option<usize>>,
    ) -> Option<&mut Vec<(String, String)>> {
        match section? {
            Some(index) => self.sections.get_mut(index).map(|section| &mut section.entries),
            None => Some(&mut self.defaults),
        }
    }

    /// Returns `true` if the section was declared in the file.
    /// `[DEFAULT]` is never reported as a section.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|existing| existing.name == section)
    }

    /// Look up `key` (case-insensitively) in `section`,
    /// falling back to the `[DEFAULT]` entries if the section exists but lacks the key.
    pub fn get(&self, section: &str, key: &str) -> IniLookup<'_> {
        let Some(section) = self.sections.iter().find(|existing| existing.name == section)
        else {
            return IniLookup::MissingSection;
        };

        let key = key.to_lowercase();

        if let Some(value) = section.get(&key) {
            return IniLookup::Found(value);
        }

        self.defaults
            .iter()
            .find(|(default_key, _)| default_key == &key)
            .map(|(_, value)| IniLookup::Found(value.as_str()))
            .unwrap_or(IniLookup::MissingKey)
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_and_entries() {
        let document = IniDocument::parse(
            "# leading comment\n\
             [TIMEOUTS]\n\
             StartupDelay=15\n\
             IdleTime : 5\n\
             ; another comment\n\
             \n\
             [DEPENDANTS]\n\
             Hosts=\n",
        )
        .unwrap();

        assert!(document.has_section("TIMEOUTS"));
        assert!(document.has_section("DEPENDANTS"));
        assert_eq!(document.get("TIMEOUTS", "StartupDelay"), IniLookup::Found("15"));
        assert_eq!(document.get("TIMEOUTS", "IdleTime"), IniLookup::Found("5"));
        assert_eq!(document.get("DEPENDANTS", "Hosts"), IniLookup::Found(""));
    }

    #[test]
    fn keys_are_case_insensitive_but_sections_are_not() {
        let document = IniDocument::parse("[ACTION]\nAction=Sleep\n").unwrap();

        assert_eq!(document.get("ACTION", "action"), IniLookup::Found("Sleep"));
        assert_eq!(document.get("ACTION", "ACTION"), IniLookup::Found("Sleep"));
        assert_eq!(document.get("action", "Action"), IniLookup::MissingSection);
    }

    #[test]
    fn distinguishes_missing_key_from_missing_section() {
        let document = IniDocument::parse("[TIMEOUTS]\nIdleTime=5\n").unwrap();

        assert_eq!(document.get("TIMEOUTS", "StartupDelay"), IniLookup::MissingKey);
        assert_eq!(document.get("ACTION", "Action"), IniLookup::MissingSection);
    }

    #[test]
    fn indented_lines_continue_values() {
        let document =
            IniDocument::parse("[ACTION]\nActionCommand=/usr/bin/foo\n    --bar\nAction=Other\n")
                .unwrap();

        assert_eq!(
            document.get("ACTION", "ActionCommand"),
            IniLookup::Found("/usr/bin/foo\n--bar")
        );
        assert_eq!(document.get("ACTION", "Action"), IniLookup::Found("Other"));
    }

    #[test]
    fn default_section_backs_existing_sections_only() {
        let document =
            IniDocument::parse("[DEFAULT]\nIdleTime=9\n\n[TIMEOUTS]\nStartupDelay=1\n").unwrap();

        assert!(!document.has_section(DEFAULT_SECTION_NAME));
        assert_eq!(document.get("TIMEOUTS", "IdleTime"), IniLookup::Found("9"));
        assert_eq!(document.get("ACTION", "IdleTime"), IniLookup::MissingSection);
    }

    #[test]
    fn rejects_malformed_lines() {
        let error = IniDocument::parse("StartHour=5\n").unwrap_err();
        assert_eq!(error.kind, IniSyntaxErrorKind::MissingSectionHeader);
        assert_eq!(error.line_number, 1);

        let error = IniDocument::parse("[TIMEOUTS]\nthis is not an entry\n").unwrap_err();
        assert_eq!(error.kind, IniSyntaxErrorKind::MissingDelimiter);
        assert_eq!(error.line_number, 2);

        let error = IniDocument::parse("[TIMEOUTS\n").unwrap_err();
        assert_eq!(error.kind, IniSyntaxErrorKind::UnterminatedSectionHeader);

        let error = IniDocument::parse("[TIMEOUTS]\n=5\n").unwrap_err();
        assert_eq!(error.kind, IniSyntaxErrorKind::EmptyKey);
    }

    #[test]
    fn rejects_duplicates() {
        let error = IniDocument::parse("[A]\nx=1\n[A]\n").unwrap_err();
        assert_eq!(
            error.kind,
            IniSyntaxErrorKind::DuplicateSection {
                section: "A".to_string()
            }
        );

        let error = IniDocument::parse("[A]\nKey=1\nkey=2\n").unwrap_err();
        assert_eq!(
            error.kind,
            IniSyntaxErrorKind::DuplicateKey {
                section: "A".to_string(),
                key: "key".to_string()
            }
        );
    }
}
