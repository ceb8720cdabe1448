//! Error types for configuration loading, resolution and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// A missing default configuration file is not an error and never shows up
/// here; everything else aborts resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Unable to read configuration file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was requested explicitly but does not exist.
    #[error("Configuration file '{}' does not exist", path.display())]
    FileNotFound {
        /// Path given on the command line
        path: PathBuf,
    },

    /// The configuration file is not valid TOML.
    #[error("Unable to parse configuration file '{}': {source}", path.display())]
    Parse {
        /// Path to the config file
        path: PathBuf,
        /// Parser diagnostic
        #[source]
        source: toml::de::Error,
    },

    /// The command's section exists but is not a table.
    #[error(
        "Unable to parse configuration file '{}': [{section}] must be a table",
        path.display()
    )]
    InvalidSection {
        /// Path to the config file
        path: PathBuf,
        /// Name of the offending section
        section: String,
    },

    /// The resolved settings do not fit the declared option types.
    #[error("Invalid configuration setting: {0}")]
    InvalidSettings(#[source] toml::de::Error),

    /// A setting could not be written back out as TOML.
    #[error("Unable to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}
