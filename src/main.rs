use std::fs;

use autopoweroff_config::{
    action::Action,
    configuration::{Configuration, ConfigurationContext, ConfigurationDefaults},
    logging::{initialize_tracing, parse_level_filter},
    VERSION,
};
use clap::Parser;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::info;

use crate::cli::{CLICommand, CLIArgs};

mod cli;


/// Exit status used when the file was read, but the configuration is not usable.
const FAULT_EXIT_CODE: i32 = 10;


/// Reads the configuration, printing the rendered error if that fails.
///
/// Returns the exit code to use if the command can not continue.
fn read_configuration(configuration: &mut Configuration) -> Option<i32> {
    match configuration.read() {
        Ok(()) => None,
        Err(error) => {
            eprintln!("{}", error.render());
            Some(error.error_code())
        }
    }
}

fn check(mut configuration: Configuration) -> Result<i32> {
    if let Some(exit_code) = read_configuration(&mut configuration) {
        return Ok(exit_code);
    }

    for warning in configuration.warnings() {
        println!("warning: {}", warning);
    }

    if let Some(fault) = configuration.errors() {
        eprintln!("error: {}", fault);
        return Ok(FAULT_EXIT_CODE);
    }


    let configuration_file_path = dunce::canonicalize(&configuration.context().file_path)
        .into_diagnostic()
        .wrap_err("Could not canonicalize configuration file path!")?;

    println!(
        "Configuration file {} is valid ({} warning(s)).",
        configuration_file_path.display(),
        configuration.warnings().len()
    );

    Ok(0)
}

fn show(mut configuration: Configuration) -> Result<i32> {
    if let Some(exit_code) = read_configuration(&mut configuration) {
        return Ok(exit_code);
    }

    let settings_as_toml = toml::to_string_pretty(&configuration.settings)
        .into_diagnostic()
        .wrap_err("Failed to serialize settings.")?;

    print!("{}", settings_as_toml);

    if let Some(fault) = configuration.errors() {
        eprintln!("error: {}", fault);
        return Ok(FAULT_EXIT_CODE);
    }

    Ok(0)
}

fn rewrite(mut configuration: Configuration) -> Result<i32> {
    if let Some(exit_code) = read_configuration(&mut configuration) {
        return Ok(exit_code);
    }

    // Saving now would drop the unusable action from the file.
    if let Some(fault) = configuration.errors() {
        eprintln!("error: {}", fault);
        eprintln!("Not rewriting the configuration file.");
        return Ok(FAULT_EXIT_CODE);
    }

    configuration.save()?;
    println!(
        "Rewrote {} ({} warning(s) resolved).",
        configuration.context().file_path.display(),
        configuration.warnings().len()
    );

    Ok(0)
}

fn init(context: ConfigurationContext, force: bool) -> Result<i32> {
    if context.file_path.exists() && !force {
        return Err(miette!(
            "Configuration file {} already exists, use --force to overwrite it.",
            context.file_path.display()
        ));
    }

    if let Some(parent_directory) = context.file_path.parent() {
        fs::create_dir_all(parent_directory)
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Failed to create missing configuration directory at {}.",
                    parent_directory.display()
                )
            })?;
    }

    let configuration = Configuration::new(
        context,
        ConfigurationDefaults {
            action: Some(Action::Shutdown),
            ..ConfigurationDefaults::default()
        },
    );

    configuration.save()?;
    println!(
        "Wrote default configuration to {}.",
        configuration.context().file_path.display()
    );

    Ok(0)
}


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let logging_raii_guard = initialize_tracing(
        parse_level_filter(&cli_args.console_log_level)?,
        parse_level_filter(&cli_args.log_file_level)?,
        cli_args.log_directory.as_deref(),
        "autopoweroff-config.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    let context = match cli_args.configuration_file_path {
        Some(path) => ConfigurationContext::new(path, VERSION),
        None => ConfigurationContext::from_default_path(VERSION)
            .wrap_err("Could not determine the configuration file path.")?,
    }
    .with_system_log(cli_args.system_log);

    let exit_code = match cli_args.command {
        CLICommand::Check => check(Configuration::new(context, ConfigurationDefaults::default())),
        CLICommand::Show => show(Configuration::new(context, ConfigurationDefaults::default())),
        CLICommand::Rewrite => {
            rewrite(Configuration::new(context, ConfigurationDefaults::default()))
        }
        CLICommand::Init { force } => init(context, force),
    }?;


    drop(logging_raii_guard);

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
