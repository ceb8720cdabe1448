//! Configuration layer for mitfixins.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`]) and the typed options it yields ([`CommandOptions`])
//! - Option metadata ([`OptionDescriptor`]) and the settings map ([`Settings`])
//! - TOML configuration file loading ([`load_toml_config`])
//! - Precedence resolution ([`resolve`])
//! - Effective configuration rendering ([`print_config`], [`render_toml_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Every option is resolved on its own, highest priority first:
//!
//! 1. **Command line** - the option's switch appears in the raw arguments
//! 2. **TOML config file** - the `[mitfixins]` section has the option's name
//! 3. **Built-in defaults**
//!
//! "Appears in the raw arguments" is decided by re-scanning argv (see
//! [`is_option_switch_in_arguments`]), because the parsed value alone cannot
//! tell `--option 42` apart from the default 42.
//!
//! # Config file
//!
//! A missing default config file is not an error. An explicit `--config-file`
//! that does not exist is. A file that exists but does not parse always aborts.
//! Keys that match no option are ignored, so older and newer files keep working.

mod cli;
pub mod defaults;
mod descriptor;
mod error;
mod render;
mod resolve;
mod scanner;
mod settings;
mod toml;

#[cfg(test)]
mod cli_tests;

pub use cli::{Choice, Cli, CommandOptions, Feature, SECONDARY_SWITCHES};
pub use descriptor::{OptionDescriptor, descriptors_from_command};
pub use error::ConfigError;
pub use render::{print_config, render_toml_config};
pub use resolve::{Resolved, ValueSource, resolve, resolve_with_sources};
pub use scanner::{get_short_switches, is_option_switch_in_arguments};
pub use settings::Settings;
pub use toml::{load_file_settings, load_toml_config, load_toml_section, locate_config_file};
