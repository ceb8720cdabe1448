//! CLI argument parsing using clap.
//!
//! Defines the command-line interface and the typed options it resolves to.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::ConfigError;
use super::defaults;
use super::descriptor::{OptionDescriptor, descriptors_from_command};
use super::render::{print_config, render_toml_config};
use super::resolve::{Resolved, resolve_with_sources};
use super::settings::Settings;

/// Arguments whose switches belong to another option.
///
/// `--no-bool-flag` negates `--bool-flag`, and both `--feature-*` flags set
/// the single `feature` option.
pub const SECONDARY_SWITCHES: &[(&str, &str)] = &[
    ("no_bool_flag", "bool_flag"),
    ("feature_a", "feature"),
    ("feature_b", "feature"),
];

/// Command-line arguments for mitfixins.
///
/// Every option can also be set in the `[mitfixins]` section of the
/// configuration file. The command line wins over the file, and the file wins
/// over built-in defaults.
///
/// Help texts are given explicitly so they are rendered verbatim, trailing
/// period included, both in `--help` and in `--print-config` comments.
#[derive(Debug, Parser)]
#[command(name = "mitfixins")]
#[command(version = defaults::VERSION_TEXT, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    #[arg(
        long = "bool-flag",
        overrides_with = "no_bool_flag",
        help = "A sample Boolean flag option."
    )]
    pub bool_flag: bool,

    #[arg(
        long = "no-bool-flag",
        overrides_with = "bool_flag",
        help = "A sample Boolean flag option."
    )]
    pub no_bool_flag: bool,

    #[arg(long, short, value_enum, help = "A sample choice option.")]
    pub choice: Option<Choice>,

    #[arg(
        long = "feature-a",
        overrides_with = "feature_b",
        help = "A sample feature option."
    )]
    pub feature_a: bool,

    #[arg(
        long = "feature-b",
        overrides_with = "feature_a",
        help = "A sample feature option."
    )]
    pub feature_b: bool,

    #[arg(long, short, help = "A sample flag.")]
    pub flag: bool,

    #[arg(long, short, help = "A sample multiple option.")]
    pub multiple: Vec<String>,

    #[arg(
        long,
        short = 'M',
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        help = "A sample multivalue (3) option."
    )]
    pub multivalue: Option<Vec<f64>>,

    // Raw `BOOL STR INT` triple, checked by `Cli::validate`.
    #[arg(
        long = "multivalue-tuple",
        short = 'T',
        num_args = 3,
        value_names = ["BOOL", "STR", "INT"],
        help = "A sample multivalue-tuple option."
    )]
    pub multivalue_tuple: Option<Vec<String>>,

    #[arg(
        long,
        short,
        default_value_t = defaults::OPTION,
        help = "A sample option."
    )]
    pub option: i64,

    #[arg(
        long,
        short,
        value_parser = parse_clamped_range,
        help = "A sample integer range option."
    )]
    pub range: Option<i64>,

    #[arg(long, hide = true, help = "A sample hidden option.")]
    pub secret: Option<String>,

    #[arg(
        long = "config-file",
        short = 'C',
        value_name = "PATH",
        help = "Full path of the TOML-format configuration file."
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long = "dry-run",
        short = 'D',
        help = "Show the intended operations but do not run them (implies --verbose)."
    )]
    pub dry_run: bool,

    #[arg(
        long = "print-config",
        help = "Print a sample configuration file that corresponds to the command line \
                options and exit."
    )]
    pub print_config: bool,

    #[arg(
        long,
        short,
        action = clap::ArgAction::Count,
        help = "Increase the verbosity of status messages: use once for normal output, \
                twice for additional output, and thrice for debug-level output."
    )]
    pub verbose: u8,

    /// An existing, readable file.
    #[arg(value_name = "FILE", value_parser = parse_existing_file)]
    pub file: PathBuf,

    /// An existing path.
    #[arg(value_name = "PATH", value_parser = parse_existing_path)]
    pub path: PathBuf,

    /// Any number of trailing arguments.
    #[arg(value_name = "STUFF")]
    pub stuff: Vec<String>,
}

/// Values accepted by `--choice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Choice {
    #[value(name = "ALP")]
    #[serde(rename = "ALP")]
    Alp,
    #[value(name = "BET")]
    #[serde(rename = "BET")]
    Bet,
    #[value(name = "GAM")]
    #[serde(rename = "GAM")]
    Gam,
}

/// Value set by `--feature-a` / `--feature-b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    A,
    B,
}

/// Typed settings of the command, after precedence resolution.
///
/// Field names are the option names used in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct CommandOptions {
    pub bool_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<Feature>,
    pub flag: bool,
    pub multiple: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multivalue: Option<[f64; 3]>,
    pub multivalue_tuple: (bool, String, i64),
    pub option: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub dry_run: bool,
    pub print_config: bool,
    pub verbose: u8,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            bool_flag: false,
            choice: None,
            feature: None,
            flag: false,
            multiple: Vec::new(),
            multivalue: None,
            multivalue_tuple: defaults::multivalue_tuple(),
            option: defaults::OPTION,
            range: None,
            secret: None,
            config_file: None,
            dry_run: false,
            print_config: false,
            verbose: 0,
        }
    }
}

impl CommandOptions {
    /// Default values as a TOML table; unset options are absent.
    #[must_use]
    pub fn default_table() -> Table {
        match Value::try_from(Self::default()) {
            Ok(Value::Table(table)) => table,
            _ => Table::new(),
        }
    }

    /// Builds typed options from resolved settings.
    ///
    /// `range` is clamped the same way the command line clamps it.
    ///
    /// # Errors
    ///
    /// Returns an error if a setting does not fit its declared type.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let mut options: Self = settings.deserialize()?;
        options.range = options.range.map(clamp_range);
        Ok(options)
    }

    /// Verbosity after `--dry-run`, which implies at least one `--verbose`.
    #[must_use]
    pub fn effective_verbosity(&self) -> u8 {
        let floor = u8::from(self.dry_run);
        self.verbose.max(floor).min(defaults::MAX_VERBOSITY)
    }
}

impl Cli {
    /// Parses CLI arguments from the command line, returning clap's error
    /// instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid usage, `--help` and `--version`.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse().and_then(Self::validate)
    }

    /// Parses CLI arguments from an iterator, returning clap's error instead
    /// of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid usage, `--help` and `--version`.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(iter).and_then(Self::validate)
    }

    /// Checks what clap cannot check per value.
    ///
    /// `--multivalue-tuple` takes three values of different types.
    ///
    /// # Errors
    ///
    /// Returns a value validation error naming the offending value.
    pub fn validate(self) -> Result<Self, clap::Error> {
        if let Some(values) = &self.multivalue_tuple {
            parse_multivalue_tuple(values)
                .map_err(|msg| Self::command().error(ErrorKind::ValueValidation, msg))?;
        }
        Ok(self)
    }

    /// Rendered usage line.
    #[must_use]
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from_iter(iter).unwrap_or_else(|e| e.exit())
    }

    /// Option descriptors of this command, help and version included.
    #[must_use]
    pub fn option_descriptors() -> Vec<OptionDescriptor> {
        let mut command = Self::command();
        command.build();
        descriptors_from_command(
            &command,
            &CommandOptions::default_table(),
            SECONDARY_SWITCHES,
        )
    }

    /// The typed options as parsed, before any file settings apply.
    #[must_use]
    pub fn options(&self) -> CommandOptions {
        let feature = if self.feature_b {
            Some(Feature::B)
        } else if self.feature_a {
            Some(Feature::A)
        } else {
            None
        };

        CommandOptions {
            bool_flag: self.bool_flag && !self.no_bool_flag,
            choice: self.choice,
            feature,
            flag: self.flag,
            multiple: self.multiple.clone(),
            multivalue: self
                .multivalue
                .as_deref()
                .and_then(|values| <[f64; 3]>::try_from(values).ok()),
            multivalue_tuple: self
                .multivalue_tuple
                .as_deref()
                .and_then(|values| parse_multivalue_tuple(values).ok())
                .unwrap_or_else(defaults::multivalue_tuple),
            option: self.option,
            range: self.range,
            secret: self.secret.clone(),
            config_file: self.config_file.clone(),
            dry_run: self.dry_run,
            print_config: self.print_config,
            verbose: self.verbose,
        }
    }

    /// The settings map of this invocation, keyed by option name.
    ///
    /// # Errors
    ///
    /// Returns an error if the parsed options cannot be represented as TOML.
    pub fn settings(&self, descriptors: &[OptionDescriptor]) -> Result<Settings, ConfigError> {
        Settings::capture(&self.options(), descriptors)
    }

    /// Layers this invocation over file settings and defaults.
    ///
    /// `raw_argv` is the unparsed argument vector without the program name.
    ///
    /// # Errors
    ///
    /// Returns an error if the parsed options cannot be represented as TOML.
    pub fn resolve<A: AsRef<str>>(
        &self,
        descriptors: &[OptionDescriptor],
        file_settings: &Table,
        raw_argv: &[A],
    ) -> Result<Resolved, ConfigError> {
        let settings = self.settings(descriptors)?;
        Ok(resolve_with_sources(
            descriptors,
            file_settings,
            raw_argv,
            settings,
        ))
    }

    /// Renders resolved settings as a configuration file for `--print-config`.
    ///
    /// `--print-config` and `--config-file` are left out, along with help and
    /// version.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be serialized as TOML.
    pub fn render_effective_config(settings: &Settings) -> Result<String, ConfigError> {
        let excluded = [defaults::PRINT_CONFIG_OPTION, defaults::CONFIG_FILE_OPTION];
        print_config(
            &Self::option_descriptors(),
            &excluded,
            settings,
            render_toml_config,
        )
    }
}

const fn clamp_range(value: i64) -> i64 {
    if value < defaults::RANGE_MIN {
        defaults::RANGE_MIN
    } else if value > defaults::RANGE_MAX {
        defaults::RANGE_MAX
    } else {
        value
    }
}

fn parse_clamped_range(s: &str) -> Result<i64, String> {
    s.parse::<i64>()
        .map(clamp_range)
        .map_err(|e| format!("'{s}' is not a valid integer: {e}"))
}

/// Parses the `BOOL STR INT` values of `--multivalue-tuple`.
fn parse_multivalue_tuple(values: &[String]) -> Result<(bool, String, i64), String> {
    let [flag, text, number] = values else {
        return Err(format!("expected 3 values, got {}", values.len()));
    };
    let number = number
        .parse::<i64>()
        .map_err(|e| format!("'{number}' is not a valid integer: {e}"))?;
    Ok((parse_bool(flag)?, text.clone(), number))
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(format!("'{s}' is not a valid boolean")),
    }
}

fn parse_existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File '{s}' does not exist or is not a file."))
    }
}

fn parse_existing_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Path '{s}' does not exist."))
    }
}
