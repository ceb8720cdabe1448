//! Application execution logic.
//!
//! The command body proper: it receives fully resolved options and reports
//! what it would work with.

use std::path::{Path, PathBuf};

use thiserror::Error;

use mitfixins::config::{CommandOptions, Resolved};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read the FILE argument.
    #[error("Failed to read '{}': {source}", path.display())]
    InputRead {
        /// The FILE argument
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Positional arguments of the command.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub file: PathBuf,
    pub path: PathBuf,
    pub stuff: Vec<String>,
}

/// Executes the command with resolved options.
///
/// # Errors
///
/// Returns an error if FILE cannot be read.
pub fn execute(
    options: &CommandOptions,
    resolved: &Resolved,
    inputs: &Inputs,
) -> Result<Summary, RunError> {
    for key in &resolved.ignored {
        tracing::warn!("Ignoring unknown configuration setting '{key}'");
    }

    for (name, value) in resolved.settings.iter() {
        let source = resolved
            .sources
            .get(name)
            .map_or_else(|| "command line".to_string(), ToString::to_string);
        let value = value.map_or_else(|| "<unset>".to_string(), ToString::to_string);
        tracing::debug!("{name} = {value} ({source})");
    }

    tracing::info!(
        "Inputs: file={}, path={}, {} more",
        inputs.file.display(),
        inputs.path.display(),
        inputs.stuff.len()
    );

    if options.dry_run {
        tracing::info!("Dry-run mode enabled - {} would be read", inputs.file.display());
        return Ok(Summary::default());
    }

    let lines = count_lines(&inputs.file)?;
    tracing::info!("{} has {lines} lines", inputs.file.display());

    Ok(Summary { lines: Some(lines) })
}

/// What [`execute`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Lines in FILE, or `None` in dry-run mode.
    pub lines: Option<usize>,
}

fn count_lines(path: &Path) -> Result<usize, RunError> {
    std::fs::read_to_string(path)
        .map(|content| content.lines().count())
        .map_err(|e| RunError::InputRead {
            path: path.to_path_buf(),
            source: e,
        })
}
