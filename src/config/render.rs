//! Effective configuration rendering.
//!
//! Turns resolved settings back into a configuration file the user can save
//! and edit. Settings still at their default are written commented-out.

use std::collections::BTreeMap;

use toml::{Table, Value};

use super::ConfigError;
use super::defaults::{self, COMMAND_NAME};
use super::descriptor::OptionDescriptor;
use super::settings::Settings;

/// Selects the options worth exporting and hands them to `render`.
///
/// Eager options and options named in `excluded_options` are dropped; the rest
/// are passed to `render` keyed (and therefore sorted) by name.
pub fn print_config<F, R>(
    options: &[OptionDescriptor],
    excluded_options: &[&str],
    arguments: &Settings,
    render: F,
) -> R
where
    F: FnOnce(&BTreeMap<&str, &OptionDescriptor>, &Settings) -> R,
{
    let selected: BTreeMap<&str, &OptionDescriptor> = options
        .iter()
        .filter(|option| !option.is_eager && !excluded_options.contains(&option.name.as_str()))
        .map(|option| (option.name.as_str(), option))
        .collect();

    render(&selected, arguments)
}

/// Renders settings as a TOML configuration file.
///
/// Each option with a value gets its help text as a comment, every line of it,
/// followed by a `name = value` line, commented-out when the value equals the
/// default.
/// Options without a value, or holding an empty array, are left out.
///
/// # Errors
///
/// Returns an error if a value cannot be serialized as TOML.
pub fn render_toml_config(
    options: &BTreeMap<&str, &OptionDescriptor>,
    arguments: &Settings,
) -> Result<String, ConfigError> {
    let mut lines = vec![
        format!(
            "# Sample {COMMAND_NAME} configuration file, by default located at {}.",
            defaults::config_file_path().display()
        ),
        "# Configuration options already set to the default value are commented-out."
            .to_string(),
        String::new(),
        format!("[{COMMAND_NAME}]"),
        String::new(),
    ];

    for (name, option) in options {
        let Some(argument) = arguments.get(name) else {
            continue;
        };
        if is_empty_sequence(argument) {
            continue;
        }

        lines.extend(option.help.split('\n').map(|line| format!("# {line}")));

        let mut entry = Table::new();
        entry.insert((*name).to_string(), argument.clone());
        let rendered = toml::to_string(&entry)?;

        if option.default.as_ref() == Some(argument) {
            lines.push(comment_out(&rendered));
        } else {
            lines.push(rendered);
        }
    }

    Ok(lines.join("\n").trim().to_string())
}

fn is_empty_sequence(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.is_empty())
}

/// Prefixes every line with `# `, keeping the trailing newline.
fn comment_out(rendered: &str) -> String {
    rendered
        .lines()
        .map(|line| format!("# {line}\n"))
        .collect()
}
