//! Saving configuration files and reading them back.

mod helpers;

use autopoweroff_config::{
    action::Action,
    configuration::{
        Configuration,
        ConfigurationContext,
        ConfigurationDefaults,
        ConfigurationError,
        NoActionTimeRange,
        Resources,
    },
};
use helpers::{TestEnvironment, CANONICAL_FILE, TEST_VERSION};


#[test]
fn canonical_file_round_trips() {
    let environment = TestEnvironment::with_file(CANONICAL_FILE);
    let mut configuration = environment.configuration();
    configuration.read().unwrap();
    let settings_after_first_read = configuration.settings.clone();

    configuration.save().unwrap();

    let mut reread_configuration = environment.configuration();
    reread_configuration.read().unwrap();

    assert_eq!(reread_configuration.settings, settings_after_first_read);
    assert!(reread_configuration.warnings().is_empty());
    assert_eq!(reread_configuration.errors(), None);
}

#[test]
fn saving_twice_produces_identical_files() {
    let environment = TestEnvironment::with_file(CANONICAL_FILE);
    let mut configuration = environment.configuration();
    configuration.read().unwrap();

    configuration.save().unwrap();
    let first_save = environment.file_contents();

    configuration.read().unwrap();
    configuration.save().unwrap();

    assert_eq!(environment.file_contents(), first_save);
}

#[test]
fn saved_file_embeds_version_and_values() {
    let environment = TestEnvironment::new();
    let configuration = environment.configuration_with_defaults(ConfigurationDefaults {
        no_action_time_range: Some(NoActionTimeRange::new(22, 6)),
        idle_time_minutes: Some(0),
        startup_delay_minutes: Some(20),
        hosts: Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
        resources: Some(Resources::new("80")),
        action: Some(Action::Other),
        action_command: Some("/usr/local/bin/nap --deep".to_string()),
    });

    configuration.save().unwrap();
    let contents = environment.file_contents();

    assert!(contents.starts_with(&format!(
        "# Autopoweroff {} configuration file.",
        TEST_VERSION
    )));
    for expected_line in [
        "[NO_ACTION_TIME_RANGE]",
        "StartHour=22",
        "EndHour=6",
        "[TIMEOUTS]",
        "StartupDelay=20",
        "IdleTime=0",
        "[DEPENDANTS]",
        "Hosts=a, b, c",
        "[RESOURCES]",
        "CpuPercentage=80",
        "[ACTION]",
        "Action=Other",
        "ActionCommand=/usr/local/bin/nap --deep",
    ] {
        assert!(
            contents.lines().any(|line| line == expected_line),
            "missing line {expected_line:?}"
        );
    }
}

#[test]
fn deprecated_keys_and_legacy_section_are_rewritten_canonically() {
    let environment = TestEnvironment::with_file(
        "[NO_SHUTDOWN_TIME_RANGE]\nstart=1\nend=2\n\n\
         [TIMEOUTS]\nidle_time=3\nstartup_delay=4\n\n\
         [DEPENDANTS]\nhosts=x\n\n\
         [ACTION]\nAction=Shutdown\n",
    );
    let mut configuration = environment.configuration();
    configuration.read().unwrap();
    assert!(!configuration.warnings().is_empty());

    configuration.save().unwrap();
    let contents = environment.file_contents();

    assert!(!contents.contains("[NO_SHUTDOWN_TIME_RANGE]"));
    for deprecated_line in ["start=", "end=", "idle_time=", "startup_delay="] {
        assert!(
            !contents.lines().any(|line| line.starts_with(deprecated_line)),
            "deprecated key written: {deprecated_line:?}"
        );
    }

    let mut reread_configuration = environment.configuration();
    reread_configuration.read().unwrap();

    assert!(reread_configuration.warnings().is_empty());
    assert_eq!(reread_configuration.settings, configuration.settings);
    assert_eq!(
        reread_configuration.settings.no_action_time_range,
        NoActionTimeRange::new(1, 2)
    );
}

#[test]
fn saving_does_not_change_the_model() {
    let environment = TestEnvironment::with_file(CANONICAL_FILE);
    let mut configuration = environment.configuration();
    configuration.read().unwrap();
    let settings_before = configuration.settings.clone();

    configuration.save().unwrap();

    assert_eq!(configuration.settings, settings_before);
}

#[test]
fn unset_action_round_trips_as_missing_action() {
    let environment = TestEnvironment::new();
    environment.configuration().save().unwrap();

    let mut configuration = environment.configuration();
    configuration.read().unwrap();

    assert_eq!(configuration.settings.action, None);
    assert_eq!(configuration.settings.action_command, None);
    assert!(configuration.errors().is_some());
    assert!(configuration.warnings().is_empty());
}

#[test]
fn write_failure_is_reported_as_write_error() {
    let environment = TestEnvironment::new();
    let configuration = Configuration::new(
        ConfigurationContext::new(
            environment.temp_dir.path().join("missing-directory/autopoweroff.conf"),
            TEST_VERSION,
        ),
        ConfigurationDefaults::default(),
    );

    let error = configuration.save().unwrap_err();

    assert!(matches!(error, ConfigurationError::Write { .. }));
    assert_eq!(error.error_code(), 4);
}

#[test]
fn multi_line_action_command_round_trips() {
    let environment = TestEnvironment::with_file(
        "[ACTION]\nAction=Other\nActionCommand=/usr/bin/foo\n  --bar\n",
    );
    let mut configuration = environment.configuration();
    configuration.read().unwrap();
    assert_eq!(
        configuration.settings.action_command.as_deref(),
        Some("/usr/bin/foo\n--bar")
    );

    configuration.save().unwrap();

    let mut reread_configuration = environment.configuration();
    reread_configuration.read().unwrap();

    assert_eq!(reread_configuration.settings, configuration.settings);
    assert_eq!(reread_configuration.errors(), None);
}
