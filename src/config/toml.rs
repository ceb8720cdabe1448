//! TOML configuration file loading.
//!
//! The file holds one table per command, keyed by the command's name:
//!
//! ```toml
//! [mitfixins]
//! option = 13
//! multiple = ["x", "y"]
//! ```

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::ConfigError;
use super::defaults::{self, COMMAND_NAME};

/// Loads this command's section from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_toml_config(path: &Path) -> Result<Table, ConfigError> {
    load_toml_section(path, COMMAND_NAME)
}

/// Loads the `[section]` table from a TOML file.
///
/// A file without that section yields an empty table.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or has a
/// non-table value under `section`.
pub fn load_toml_section(path: &Path, section: &str) -> Result<Table, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_section(&content, section).map_err(|e| match e {
        SectionError::Toml(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        SectionError::NotATable => ConfigError::InvalidSection {
            path: path.to_path_buf(),
            section: section.to_string(),
        },
    })
}

enum SectionError {
    Toml(toml::de::Error),
    NotATable,
}

fn parse_section(content: &str, section: &str) -> Result<Table, SectionError> {
    let mut document: Table = toml::from_str(content).map_err(SectionError::Toml)?;

    match document.remove(section) {
        None => Ok(Table::new()),
        Some(Value::Table(table)) => Ok(table),
        Some(_) => Err(SectionError::NotATable),
    }
}

/// Picks the configuration file to load, if any.
///
/// An explicitly requested file must exist. The default file is optional:
/// when it is absent there is nothing to load.
///
/// # Errors
///
/// Returns [`ConfigError::FileNotFound`] if `explicit` does not exist.
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        }),
        None => {
            let path = defaults::config_file_path();
            Ok(path.exists().then_some(path))
        }
    }
}

/// Loads file settings from the located configuration file.
///
/// Returns an empty table when there is no file to load.
///
/// # Errors
///
/// Returns an error if an explicit file is missing or any file fails to load.
pub fn load_file_settings(explicit: Option<&Path>) -> Result<Table, ConfigError> {
    match locate_config_file(explicit)? {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            load_toml_config(&path)
        }
        None => Ok(Table::new()),
    }
}
