//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and the one place where
//! errors are turned into user-visible output.

use std::error::Error;

use mitfixins::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration or usage error (exit code 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2).
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Formats an error as a single `ERROR ...` line.
pub fn format_error(error: &(dyn Error + 'static)) -> String {
    format!("ERROR {error}")
}

/// Prints an error to stderr.
pub fn report_error(error: &(dyn Error + 'static)) {
    eprintln!("{}", format_error(error));
    if let Some(hint) = error
        .downcast_ref::<ConfigError>()
        .and_then(config_hint)
    {
        eprintln!("\n{hint}");
    }
}

/// Prints a clap usage error: the usage line, then the error message.
pub fn report_usage_error(error: &clap::Error, usage: &str) {
    eprintln!("{usage}\n");
    eprintln!("ERROR {}", usage_error_message(error));
}

/// The headline of a clap error, without clap's own `error: ` prefix.
pub fn usage_error_message(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let headline = rendered.lines().next().unwrap_or_default();
    headline
        .strip_prefix("error: ")
        .unwrap_or(headline)
        .to_string()
}

/// Helpful hint for common configuration errors.
pub const fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::Parse { .. } | ConfigError::InvalidSection { .. } => {
            Some("Run 'mitfixins --print-config FILE PATH' to generate a valid configuration file.")
        }
        _ => None,
    }
}

/// Maps a `--verbose` count to a log level.
///
/// 0 shows errors only, 1 adds warnings and normal output, 2 adds detail,
/// 3 and up is debug-level output.
pub const fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbosity: u8) {
    let level = verbosity_level(verbosity);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
