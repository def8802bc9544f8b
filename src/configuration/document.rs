//! Rendering of the canonical configuration file.
//!
//! The file is always written in the same layout: fixed documentation comments
//! followed by one `Key=Value` line per setting, grouped into sections.
//! Comments and deprecated key names found in the original file are not preserved.

use std::fmt::Write;

use super::{keys, structure::hosts::join_hosts, structure::Settings};


/// Indentation of the continuation lines of a multi-line value.
const CONTINUATION_INDENT: &str = "    ";

const HEADER_NOTICE: &str = "\
# WARNING:  If you decide to edit this file, edit only the values of the
#           parameters.  If you add comments, they will be lost at the
#           next software upgrade or when the GUI configurator is being
#           used to update the file.  Only values persist.
";

const NO_ACTION_TIME_RANGE_DOCUMENTATION: &str = "\
# StartHour and EndHour parameters (expressed in hours, 0 to 23):
#
#   Time range during which the computer must not take any action, even if
#   all the other conditions are met.  With StartHour=5 and EndHour=22, no
#   action is taken between 05:00 and 22:00, local time.  If StartHour is
#   greater than EndHour, the range wraps around midnight.
";

const TIMEOUTS_DOCUMENTATION: &str = "\
# StartupDelay parameter (expressed in minutes):
#
#   Right after the computer boots, all the conditions may already be met,
#   in which case the action would be taken as soon as Autopoweroff starts
#   and the user would never get the chance to log in.  No action is taken
#   during the first StartupDelay minutes after boot, which leaves time to
#   log in and change the configuration.
#
#
# IdleTime parameter (expressed in minutes):
#
#   Like a screensaver, Autopoweroff watches keyboard and mouse activity.
#   No action is taken unless there was no activity for at least IdleTime
#   minutes.  If set to 0, user activity is ignored.
";

const DEPENDANTS_DOCUMENTATION: &str = "\
# Hosts parameter (list of host names or IPs, separated by commas):
#
#   Hosts this computer depends on.  No action is taken while any of the
#   hosts listed here is still up (responding to ping).
";

const RESOURCES_DOCUMENTATION: &str = "\
# CpuPercentage parameter (percentage, or Disabled):
#
#   No action is taken while the CPU usage is above this percentage.  Set it
#   to Disabled to ignore CPU usage.
";

const ACTION_DOCUMENTATION: &str = "\
# Action parameter:
#
#   Action to be taken when all the conditions are met.  Choices are:
#
#     - Shutdown
#     - Sleep     (suspend to RAM)
#     - Hibernate (suspend to disk)
#     - Other     (ActionCommand must be supplied)
#
#
# ActionCommand parameter:
#
#   Command to run instead of the built-in one.  It can be a script, a
#   special version of /usr/sbin/shutdown, or anything else; arguments go
#   after the command, for example:
#
#   ActionCommand=/usr/sbin/shutdown -r now
#
#   Shutdown, Sleep and Hibernate already have a built-in command, so this
#   parameter is usually left empty.  It is required with Action=Other.
#   Since this is an advanced option, it is not available from the GUI.
";


fn write_section(document: &mut String, documentation: &str, section: &str, entries: &[(&str, String)]) {
    // Writing into a `String` can not fail.
    let _ = write!(document, "\n\n{}\n[{}]\n", documentation, section);

    for (key, value) in entries {
        let continued_value = value.replace('\n', &format!("\n{}", CONTINUATION_INDENT));
        let _ = writeln!(document, "{}={}", key, continued_value);
    }
}


/// Render `settings` as a complete configuration file.
pub fn render_document(settings: &Settings, version: &str) -> String {
    let mut document = format!(
        "# Autopoweroff {} configuration file.\n\n{}",
        version, HEADER_NOTICE
    );

    write_section(
        &mut document,
        NO_ACTION_TIME_RANGE_DOCUMENTATION,
        keys::NO_ACTION_TIME_RANGE_SECTION,
        &[
            (
                keys::START_HOUR.name,
                settings.no_action_time_range.start_hour.to_string(),
            ),
            (
                keys::END_HOUR.name,
                settings.no_action_time_range.end_hour.to_string(),
            ),
        ],
    );

    write_section(
        &mut document,
        TIMEOUTS_DOCUMENTATION,
        keys::TIMEOUTS_SECTION,
        &[
            (
                keys::STARTUP_DELAY.name,
                settings.startup_delay_minutes.to_string(),
            ),
            (keys::IDLE_TIME.name, settings.idle_time_minutes.to_string()),
        ],
    );

    write_section(
        &mut document,
        DEPENDANTS_DOCUMENTATION,
        keys::DEPENDANTS_SECTION,
        &[(keys::HOSTS.name, join_hosts(&settings.hosts))],
    );

    write_section(
        &mut document,
        RESOURCES_DOCUMENTATION,
        keys::RESOURCES_SECTION,
        &[(
            keys::CPU_PERCENTAGE.name,
            settings.resources.cpu_percentage().to_string(),
        )],
    );

    write_section(
        &mut document,
        ACTION_DOCUMENTATION,
        keys::ACTION_SECTION,
        &[
            (
                keys::ACTION.name,
                settings
                    .action
                    .map(|action| action.name().to_string())
                    .unwrap_or_default(),
            ),
            (
                keys::ACTION_COMMAND.name,
                settings.action_command.clone().unwrap_or_default(),
            ),
        ],
    );

    document
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        action::Action,
        configuration::{ini::IniDocument, structure::Resources, ConfigurationDefaults},
        configuration::ini::IniLookup,
    };

    fn sample_settings() -> Settings {
        ConfigurationDefaults {
            hosts: Some(vec!["nas.local".to_string(), "10.0.0.2".to_string()]),
            resources: Some(Resources::new("30")),
            action: Some(Action::Other),
            action_command: Some("/usr/sbin/shutdown -r now".to_string()),
            ..ConfigurationDefaults::default()
        }
        .into_settings()
    }

    #[test]
    fn embeds_version_in_header() {
        let document = render_document(&sample_settings(), "4.3.0");

        assert!(document.starts_with("# Autopoweroff 4.3.0 configuration file.\n"));
    }

    #[test]
    fn writes_one_line_per_setting() {
        let document = render_document(&sample_settings(), "4.3.0");
        let value_lines: Vec<&str> = document
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        assert_eq!(
            value_lines,
            vec![
                "[NO_ACTION_TIME_RANGE]",
                "StartHour=4",
                "EndHour=23",
                "[TIMEOUTS]",
                "StartupDelay=15",
                "IdleTime=5",
                "[DEPENDANTS]",
                "Hosts=nas.local, 10.0.0.2",
                "[RESOURCES]",
                "CpuPercentage=30",
                "[ACTION]",
                "Action=Other",
                "ActionCommand=/usr/sbin/shutdown -r now",
            ]
        );
    }

    #[test]
    fn multi_line_values_are_written_as_continuation_lines() {
        let settings = ConfigurationDefaults {
            action: Some(Action::Other),
            action_command: Some("/usr/bin/foo\n--bar".to_string()),
            ..ConfigurationDefaults::default()
        }
        .into_settings();
        let rendered = render_document(&settings, "4.3.0");

        assert!(rendered.contains("ActionCommand=/usr/bin/foo\n    --bar\n"));

        let document = IniDocument::parse(&rendered).unwrap();
        assert_eq!(
            document.get("ACTION", "ActionCommand"),
            IniLookup::Found("/usr/bin/foo\n--bar")
        );
    }

    #[test]
    fn unset_action_is_written_empty() {
        let settings = ConfigurationDefaults::default().into_settings();
        let document = IniDocument::parse(&render_document(&settings, "4.3.0")).unwrap();

        assert_eq!(document.get("ACTION", "Action"), IniLookup::Found(""));
        assert_eq!(document.get("ACTION", "ActionCommand"), IniLookup::Found(""));
        assert_eq!(document.get("DEPENDANTS", "Hosts"), IniLookup::Found(""));
    }
}
