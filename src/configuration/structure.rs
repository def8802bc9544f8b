use std::{
    fmt::{self, Debug, Formatter},
    fs,
    sync::Arc,
};

use serde::Serialize;
use tracing::info;

use self::action::UnresolvedActionConfiguration;
use self::hosts::UnresolvedHosts;
pub use self::resources::Resources;
use self::resources::UnresolvedCpuPercentage;
pub use self::time_range::NoActionTimeRange;
use super::{
    context::{ConfigurationContext, ConfigurationDefaults},
    document::render_document,
    errors::{ConfigurationError, ConfigurationFault},
    ini::IniDocument,
    keys,
    resolver::{KeyCandidate, OptionResolver, Resolution},
    traits::{ResolvableConfiguration, ResolvableConfigurationWithContext},
    warnings::{ConfigurationWarning, ConfigurationWarnings},
};
use crate::{
    action::Action,
    notification::{NotificationSink, Severity, TracingNotificationSink},
};

mod action;
pub(crate) mod hosts;
pub mod resources;
pub mod time_range;



/// The settings themselves, without any of the bookkeeping around them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Minutes without keyboard or mouse activity before acting. 0 disables the check.
    pub idle_time_minutes: u32,

    /// Minutes after boot during which no action is taken.
    pub startup_delay_minutes: u32,

    /// Hosts that keep this machine up while any of them responds.
    pub hosts: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,

    /// Required if `action` is [`Action::Other`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_command: Option<String>,

    pub no_action_time_range: NoActionTimeRange,

    pub resources: Resources,
}

impl Settings {
    /// The command to run for the configured action: the explicit `ActionCommand`
    /// if there is one, otherwise the action's built-in command.
    pub fn effective_action_command(&self) -> Option<&str> {
        self.action_command
            .as_deref()
            .or_else(|| self.action.and_then(|action| action.builtin_command()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        ConfigurationDefaults::default().into_settings()
    }
}



/// Every setting as resolved from the file, before validation.
pub(crate) struct UnresolvedConfiguration<'r, 'a> {
    resolver: &'r OptionResolver<'a>,

    start_hour: Resolution<i64>,
    end_hour: Resolution<i64>,
    idle_time: Resolution<i64>,
    startup_delay: Resolution<i64>,
    hosts: Resolution<String>,
    action: Resolution<String>,
    action_command: Resolution<String>,
    cpu_percentage: Resolution<String>,
}

impl<'r, 'a> UnresolvedConfiguration<'r, 'a> {
    /// Resolve every setting, in file order. Absent settings take their value from `defaults`.
    ///
    /// `Action` and `ActionCommand` have no default: their absence must be detectable.
    pub(crate) fn collect(
        resolver: &'r OptionResolver<'a>,
        defaults: &Settings,
    ) -> Result<Self, ConfigurationError> {
        let start_hour = resolver.resolve(
            i64::from(defaults.no_action_time_range.start_hour),
            keys::NO_ACTION_TIME_RANGE_SECTION,
            &keys::START_HOUR_CANDIDATES,
        )?;

        let end_hour = resolver.resolve(
            i64::from(defaults.no_action_time_range.end_hour),
            keys::NO_ACTION_TIME_RANGE_SECTION,
            &keys::END_HOUR_CANDIDATES,
        )?;

        let idle_time = resolver.resolve(
            i64::from(defaults.idle_time_minutes),
            keys::TIMEOUTS_SECTION,
            &keys::IDLE_TIME_CANDIDATES,
        )?;

        let startup_delay = resolver.resolve(
            i64::from(defaults.startup_delay_minutes),
            keys::TIMEOUTS_SECTION,
            &keys::STARTUP_DELAY_CANDIDATES,
        )?;

        let hosts = resolver.resolve(
            hosts::join_hosts(&defaults.hosts),
            keys::DEPENDANTS_SECTION,
            &keys::HOSTS_CANDIDATES,
        )?;

        let action = resolver.resolve(String::new(), keys::ACTION_SECTION, &[keys::ACTION])?;

        let action_command = resolver.resolve(
            String::new(),
            keys::ACTION_SECTION,
            &[keys::ACTION_COMMAND],
        )?;

        let cpu_percentage = resolver.resolve(
            defaults.resources.cpu_percentage().to_string(),
            keys::RESOURCES_SECTION,
            &[keys::CPU_PERCENTAGE],
        )?;


        Ok(Self {
            resolver,
            start_hour,
            end_hour,
            idle_time,
            startup_delay,
            hosts,
            action,
            action_command,
            cpu_percentage,
        })
    }
}


/// If `primary` found no key at all, retry in the legacy section.
///
/// When the legacy section has the value, the warnings of the primary lookup
/// (missing key or section) no longer apply and are replaced by a legacy-section warning.
fn resolve_with_legacy_fallback(
    resolver: &OptionResolver<'_>,
    primary: Resolution<i64>,
    candidates: &[KeyCandidate],
) -> Result<Resolution<i64>, ConfigurationError> {
    if primary.source.is_found() {
        return Ok(primary);
    }

    let legacy = resolver.resolve(
        primary.value,
        keys::LEGACY_NO_ACTION_TIME_RANGE_SECTION,
        candidates,
    )?;

    if !legacy.source.is_found() {
        return Ok(primary);
    }


    let mut warnings = vec![ConfigurationWarning::LegacySection {
        legacy: keys::LEGACY_NO_ACTION_TIME_RANGE_SECTION.to_string(),
        current: keys::NO_ACTION_TIME_RANGE_SECTION.to_string(),
    }];
    warnings.extend(legacy.warnings);

    Ok(Resolution {
        warnings,
        ..legacy
    })
}


/// Narrow a resolved integer into `T`, keeping `fallback` if it does not fit in `range`.
fn bounded<T>(
    resolution: &Resolution<i64>,
    range: std::ops::RangeInclusive<T>,
    fallback: T,
    warnings: &mut ConfigurationWarnings,
) -> T
where
    T: TryFrom<i64> + PartialOrd + Copy + Into<i64>,
{
    match T::try_from(resolution.value) {
        Ok(value) if range.contains(&value) => value,
        _ => {
            warnings.push(ConfigurationWarning::OutOfRange {
                section: resolution.section.clone(),
                key: resolution.source.found_key().unwrap_or_default().to_string(),
                value: resolution.value,
                fallback: fallback.into(),
            });

            fallback
        }
    }
}


pub(crate) struct ResolvedConfiguration {
    pub(crate) settings: Settings,

    pub(crate) warnings: ConfigurationWarnings,

    pub(crate) fault: Option<ConfigurationFault>,
}

impl<'r, 'a> ResolvableConfigurationWithContext for UnresolvedConfiguration<'r, 'a> {
    type Context = Settings;
    type Resolved = ResolvedConfiguration;
    type Error = ConfigurationError;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, Self::Error> {
        let defaults = context;

        let start_hour = resolve_with_legacy_fallback(
            self.resolver,
            self.start_hour,
            &keys::START_HOUR_CANDIDATES,
        )?;
        let end_hour = resolve_with_legacy_fallback(
            self.resolver,
            self.end_hour,
            &keys::END_HOUR_CANDIDATES,
        )?;


        let mut warnings = ConfigurationWarnings::new();
        for resolution_warnings in [
            &start_hour.warnings,
            &end_hour.warnings,
            &self.idle_time.warnings,
            &self.startup_delay.warnings,
            &self.hosts.warnings,
            &self.action.warnings,
            &self.action_command.warnings,
            &self.cpu_percentage.warnings,
        ] {
            warnings.extend(resolution_warnings.iter().cloned());
        }


        let no_action_time_range = NoActionTimeRange::new(
            bounded(
                &start_hour,
                0..=time_range::LAST_HOUR_OF_DAY,
                defaults.no_action_time_range.start_hour,
                &mut warnings,
            ),
            bounded(
                &end_hour,
                0..=time_range::LAST_HOUR_OF_DAY,
                defaults.no_action_time_range.end_hour,
                &mut warnings,
            ),
        );

        let idle_time_minutes = bounded(
            &self.idle_time,
            0..=u32::MAX,
            defaults.idle_time_minutes,
            &mut warnings,
        );
        let startup_delay_minutes = bounded(
            &self.startup_delay,
            0..=u32::MAX,
            defaults.startup_delay_minutes,
            &mut warnings,
        );


        let unresolved_action = UnresolvedActionConfiguration {
            action: self.action.value,
            action_command: self.action_command.value,
        };
        let normalized_action_command = unresolved_action.action_command();

        let (action, action_command, fault) = match unresolved_action.resolve() {
            Ok(resolved) => (Some(resolved.action), resolved.action_command, None),
            Err(fault) => (None, normalized_action_command, Some(fault)),
        };


        let hosts = match UnresolvedHosts(self.hosts.value).resolve() {
            Ok(hosts) => hosts,
            Err(never) => match never {},
        };

        // An invalid CPU percentage is kept as written, and only warned about.
        let cpu_percentage = self.cpu_percentage.value;
        if let Err(warning) = UnresolvedCpuPercentage(cpu_percentage.clone()).resolve() {
            warnings.push(warning);
        }

        let mut resources = defaults.resources;
        resources.set_cpu_percentage(cpu_percentage);


        Ok(ResolvedConfiguration {
            settings: Settings {
                idle_time_minutes,
                startup_delay_minutes,
                hosts,
                action,
                action_command,
                no_action_time_range,
                resources,
            },
            warnings,
            fault,
        })
    }
}



/// The configuration of one daemon run (or one configurator session).
///
/// A `Configuration` is always usable on its own: it starts out with defaults and
/// is only changed by [`read`][Configuration::read]. It carries no locking;
/// callers must not read and save the same file concurrently.
#[derive(Clone)]
pub struct Configuration {
    context: ConfigurationContext,

    notification_sink: Arc<dyn NotificationSink + Send + Sync>,

    /// Values used for settings missing from the file.
    defaults: Settings,

    pub settings: Settings,

    warnings: ConfigurationWarnings,

    errors: Option<ConfigurationFault>,
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("context", &self.context)
            .field("settings", &self.settings)
            .field("warnings", &self.warnings)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Configuration {
    pub fn new(context: ConfigurationContext, defaults: ConfigurationDefaults) -> Self {
        let defaults = defaults.into_settings();

        Self {
            context,
            notification_sink: Arc::new(TracingNotificationSink),
            settings: defaults.clone(),
            defaults,
            warnings: ConfigurationWarnings::new(),
            errors: None,
        }
    }

    /// Replace the sink that receives the reading notice and configuration warnings.
    pub fn with_notification_sink<S>(mut self, notification_sink: S) -> Self
    where
        S: NotificationSink + Send + Sync + 'static,
    {
        self.notification_sink = Arc::new(notification_sink);
        self
    }

    pub fn context(&self) -> &ConfigurationContext {
        &self.context
    }

    /// Warnings raised by the last [`read`][Configuration::read], deduplicated.
    pub fn warnings(&self) -> &ConfigurationWarnings {
        &self.warnings
    }

    /// The fatal-level problem found by the last [`read`][Configuration::read], if any.
    /// Callers must check this before acting on the configuration.
    pub fn errors(&self) -> Option<&ConfigurationFault> {
        self.errors.as_ref()
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notification_sink.notify(
            message,
            severity,
            self.context.notification_destinations(),
        );
    }

    /// Load the configuration file, replacing the current settings.
    ///
    /// Settings missing from the file take the defaults the configuration was
    /// constructed with, never values from an earlier read. On error, the settings
    /// are left untouched and the warnings and errors of the previous read are
    /// discarded; if the file could not be opened,
    /// [`errors`][Configuration::errors] is set to say so.
    pub fn read(&mut self) -> Result<(), ConfigurationError> {
        let file_path = self.context.file_path.clone();

        self.notify(
            &format!("Reading configuration file:  {}", file_path.display()),
            Severity::Info,
        );

        self.warnings = ConfigurationWarnings::new();
        self.errors = None;

        let contents = match fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            Err(source) => {
                self.errors = Some(ConfigurationFault::FileUnreadable {
                    file_path: file_path.clone(),
                });

                return Err(ConfigurationError::Unreadable { file_path, source });
            }
        };

        let document =
            IniDocument::parse(&contents).map_err(|source| ConfigurationError::Syntax {
                file_path: file_path.clone(),
                source,
            })?;


        let resolver = OptionResolver::new(&document, &file_path);
        let ResolvedConfiguration {
            settings,
            warnings,
            fault,
        } = UnresolvedConfiguration::collect(&resolver, &self.defaults)?
            .resolve(self.defaults.clone())?;

        self.settings = settings;
        self.warnings = warnings;
        self.errors = fault;


        if let Some(notice) = self.warnings.notice() {
            self.notify(&notice, Severity::Warning);
        }

        Ok(())
    }

    /// The canonical file contents for the current settings.
    pub fn render(&self) -> String {
        render_document(&self.settings, &self.context.version)
    }

    /// Write the current settings to the configuration file in canonical form.
    ///
    /// Deprecated key names and legacy sections are never written.
    pub fn save(&self) -> Result<(), ConfigurationError> {
        fs::write(&self.context.file_path, self.render()).map_err(|source| {
            ConfigurationError::Write {
                file_path: self.context.file_path.clone(),
                source,
            }
        })?;

        info!(
            "Saved configuration file {}.",
            self.context.file_path.display()
        );

        Ok(())
    }
}
