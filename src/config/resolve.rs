//! Default < file < command line precedence.

use std::collections::BTreeMap;
use std::fmt;

use toml::Table;

use super::descriptor::OptionDescriptor;
use super::scanner::{get_short_switches, is_option_switch_in_arguments};
use super::settings::Settings;

/// Which tier supplied an option's effective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The option's built-in default.
    Default,
    /// The configuration file.
    File,
    /// A switch on the command line.
    CommandLine,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::File => write!(f, "config file"),
            Self::CommandLine => write!(f, "command line"),
        }
    }
}

/// Outcome of [`resolve_with_sources`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The merged settings map.
    pub settings: Settings,

    /// Winning tier per resolved (non-eager) option.
    pub sources: BTreeMap<String, ValueSource>,

    /// File keys that match no declared option, in name order.
    pub ignored: Vec<String>,
}

/// Merges defaults, file settings and the parsed command line.
///
/// For every non-eager option the effective value is its default, replaced by
/// the file value if the file has one, replaced by the parsed value in
/// `settings` if one of its switches appears in `raw_argv`. Options are
/// resolved independently of each other. Entries of `settings` that belong to
/// no declared option are left alone.
#[must_use]
pub fn resolve<A: AsRef<str>>(
    options: &[OptionDescriptor],
    file_settings: &Table,
    raw_argv: &[A],
    settings: Settings,
) -> Settings {
    resolve_with_sources(options, file_settings, raw_argv, settings).settings
}

/// Same as [`resolve`], also reporting where each value came from.
#[must_use]
pub fn resolve_with_sources<A: AsRef<str>>(
    options: &[OptionDescriptor],
    file_settings: &Table,
    raw_argv: &[A],
    mut settings: Settings,
) -> Resolved {
    let short_switches = get_short_switches(options);
    let mut sources = BTreeMap::new();

    for option in options.iter().filter(|option| !option.is_eager) {
        let mut value = option.default.clone();
        let mut source = ValueSource::Default;

        if let Some(file_value) = file_settings.get(&option.name) {
            value = Some(file_value.clone());
            source = ValueSource::File;
        }

        if is_option_switch_in_arguments(&option.switches, &short_switches, raw_argv) {
            value = settings.get(&option.name).cloned();
            source = ValueSource::CommandLine;
        }

        tracing::trace!(option = %option.name, %source, "resolved option");
        settings.insert(option.name.clone(), value);
        sources.insert(option.name.clone(), source);
    }

    let ignored = file_settings
        .keys()
        .filter(|key| !options.iter().any(|option| &option.name == *key))
        .cloned()
        .collect();

    Resolved {
        settings,
        sources,
        ignored,
    }
}
