//! Static metadata for configurable options.
//!
//! An [`OptionDescriptor`] is built once per command and never changes
//! afterwards. Descriptors are usually derived from a clap [`Command`] with
//! [`descriptors_from_command`], but can also be assembled by hand.

use clap::{ArgAction, Command};
use toml::{Table, Value};

/// Static metadata for one configurable option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    /// Unique key shared by the settings map, the config file and defaults.
    pub name: String,

    /// Textual switches in declaration order, e.g. `["--apple", "-a"]`.
    pub switches: Vec<String>,

    /// Value used when neither the file nor the command line supplies one.
    pub default: Option<Value>,

    /// Human-readable description, used when rendering.
    pub help: String,

    /// Eager options (help, version) never take part in merging or export.
    pub is_eager: bool,
}

impl OptionDescriptor {
    /// Creates a descriptor with no switches, no default and no help text.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            switches: Vec::new(),
            default: None,
            help: String::new(),
            is_eager: false,
        }
    }

    /// Appends a switch.
    #[must_use]
    pub fn with_switch(mut self, switch: impl Into<String>) -> Self {
        self.switches.push(switch.into());
        self
    }

    /// Appends several switches.
    #[must_use]
    pub fn with_switches<I, S>(mut self, switches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.switches.extend(switches.into_iter().map(Into::into));
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Marks the option as eager.
    #[must_use]
    pub const fn eager(mut self) -> Self {
        self.is_eager = true;
        self
    }

    /// Single-character short switches (`-a` yields `'a'`).
    pub fn short_switches(&self) -> impl Iterator<Item = char> + '_ {
        self.switches.iter().filter_map(|switch| short_switch(switch))
    }

    /// Long switches (`--apple`).
    pub fn long_switches(&self) -> impl Iterator<Item = &str> {
        self.switches
            .iter()
            .map(String::as_str)
            .filter(|switch| is_long_switch(switch))
    }
}

/// Returns the character of a short switch such as `-a`.
pub(crate) fn short_switch(switch: &str) -> Option<char> {
    let mut chars = switch.strip_prefix('-')?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' => Some(c),
        _ => None,
    }
}

/// Whether `switch` is a long switch such as `--apple`.
pub(crate) fn is_long_switch(switch: &str) -> bool {
    switch.len() > 2 && switch.starts_with("--")
}

/// Derives option descriptors from a built clap command.
///
/// Positional arguments are skipped. `secondary` maps the id of an argument
/// whose switches belong to another option (e.g. `no_bool_flag` to
/// `bool_flag`); those switches are appended to the primary option instead of
/// producing a descriptor of their own. Defaults are looked up by option name
/// in `defaults`.
///
/// Call [`Command::build`] first so the generated help and version flags are
/// present; they come out as eager descriptors.
#[must_use]
pub fn descriptors_from_command(
    command: &Command,
    defaults: &Table,
    secondary: &[(&str, &str)],
) -> Vec<OptionDescriptor> {
    let mut descriptors: Vec<OptionDescriptor> = Vec::new();

    for arg in command.get_arguments().filter(|arg| !arg.is_positional()) {
        let id = arg.get_id().as_str();
        let name = secondary
            .iter()
            .find(|(alias, _)| *alias == id)
            .map_or(id, |(_, primary)| *primary);

        let mut switches = Vec::new();
        if let Some(long) = arg.get_long() {
            switches.push(format!("--{long}"));
        }
        if let Some(short) = arg.get_short() {
            switches.push(format!("-{short}"));
        }

        if let Some(existing) = descriptors.iter_mut().find(|d| d.name == name) {
            existing.switches.extend(switches);
            continue;
        }

        let is_eager = matches!(
            arg.get_action(),
            ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
        );

        descriptors.push(OptionDescriptor {
            name: name.to_string(),
            switches,
            default: defaults.get(name).cloned(),
            help: arg.get_help().map(ToString::to_string).unwrap_or_default(),
            is_eager,
        });
    }

    descriptors
}
