//! Default values and well-known names.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

use std::path::PathBuf;

/// Name of the command; also the section name inside the configuration file.
pub const COMMAND_NAME: &str = "mitfixins";

/// Option name of `--config-file`.
pub const CONFIG_FILE_OPTION: &str = "config_file";

/// Option name of `--print-config`.
pub const PRINT_CONFIG_OPTION: &str = "print_config";

/// Default value of `--option`.
pub const OPTION: i64 = 42;

/// Default text value of `--multivalue-tuple`.
pub const MULTIVALUE_TUPLE_TEXT: &str = "nada";

/// Lower bound `--range` is clamped to.
pub const RANGE_MIN: i64 = 0;

/// Upper bound `--range` is clamped to.
pub const RANGE_MAX: i64 = 10;

/// Highest meaningful `--verbose` count.
pub const MAX_VERBOSITY: u8 = 3;

/// Text printed by `--version`, after the command name.
pub const VERSION_TEXT: &str = concat!(
    "version ",
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2019 Dave Rogers. Licensed under the GPLv3. See LICENSE."
);

/// Default value of `--multivalue-tuple`.
#[must_use]
pub fn multivalue_tuple() -> (bool, String, i64) {
    (false, MULTIVALUE_TUPLE_TEXT.to_string(), 0)
}

/// Default location of the configuration file.
///
/// `<user config dir>/mitfixins/mitfixins.toml`, falling back to the current
/// directory when the platform has no notion of one.
#[must_use]
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(COMMAND_NAME)
        .join(format!("{COMMAND_NAME}.toml"))
}
