//! mitfixins: command-line tool skeleton
//!
//! Entry point for the mitfixins application.

use std::process::ExitCode;

use clap::error::ErrorKind;
use mitfixins::config::{
    Cli, CommandOptions, ConfigError, OptionDescriptor, Resolved, Settings, load_file_settings,
};

mod app;
mod run;

use app::{exit_code, report_error, report_usage_error, setup_tracing};
use run::Inputs;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let raw_argv: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(&e),
    };

    let descriptors = Cli::option_descriptors();

    // Load and resolve configuration
    let (options, resolved) = match resolve_options(&cli, &descriptors, &raw_argv) {
        Ok(resolution) => resolution,
        Err(e) => {
            report_error(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    if options.print_config {
        return handle_print_config(&resolved.settings);
    }

    // Setup logging and run
    setup_tracing(options.effective_verbosity());

    let inputs = Inputs {
        file: cli.file,
        path: cli.path,
        stuff: cli.stuff,
    };

    match run::execute(&options, &resolved, &inputs) {
        Ok(_) => exit_code::SUCCESS,
        Err(e) => {
            report_error(&e);
            exit_code::runtime_error()
        }
    }
}

/// Handles help, version and usage errors reported by clap.
fn handle_parse_error(error: &clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if let Err(e) = error.print() {
                report_error(&e);
                return exit_code::CONFIG_ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            report_usage_error(error, &Cli::usage());
            exit_code::CONFIG_ERROR
        }
    }
}

/// Loads the config file and resolves every option against it.
fn resolve_options(
    cli: &Cli,
    descriptors: &[OptionDescriptor],
    raw_argv: &[String],
) -> Result<(CommandOptions, Resolved), ConfigError> {
    let file_settings = load_file_settings(cli.config_file.as_deref())?;
    let resolved = cli.resolve(descriptors, &file_settings, raw_argv)?;
    let options = CommandOptions::from_settings(&resolved.settings)?;
    Ok((options, resolved))
}

/// Handles `--print-config`.
fn handle_print_config(settings: &Settings) -> ExitCode {
    match Cli::render_effective_config(settings) {
        Ok(rendered) => {
            println!("{rendered}");
            exit_code::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            exit_code::CONFIG_ERROR
        }
    }
}
