use std::{fs, path::Path};

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};


/// Parse a level filter in `EnvFilter` syntax (e.g. `info` or `autopoweroff_config=debug`).
pub fn parse_level_filter(level_filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level_filter)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Invalid log level filter: {}", level_filter))
}


/// Set up the global tracing subscriber: console output on stderr and, if
/// `log_file_output_directory` is given, a daily-rolling log file in that directory.
///
/// Keep the returned guard alive for as long as logging is needed;
/// dropping it flushes the log file.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: Option<&Path>,
    log_file_name_prefix: &str,
) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level_filter);


    let (log_file_layer, guard) = match log_file_output_directory {
        Some(log_file_output_directory) => {
            fs::create_dir_all(log_file_output_directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create missing log file directory at {}.",
                        log_file_output_directory.display()
                    )
                })?;

            let file_appender =
                tracing_appender::rolling::daily(log_file_output_directory, log_file_name_prefix);
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_appender)
                .with_filter(log_file_level_filter);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to initialize tracing subscriber.")?;

    Ok(guard)
}
