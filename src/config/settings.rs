//! The settings map: option name to current value.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

use super::ConfigError;
use super::descriptor::OptionDescriptor;

/// Current value of every declared option, keyed by option name.
///
/// Every declared option has an entry; `None` means the option has no value
/// (no default and nothing supplied). Repeatable options with nothing
/// supplied hold an empty array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, Option<Value>>,
}

impl Settings {
    /// Creates an empty settings map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the fields of a serializable value for the given options.
    ///
    /// Fields that serialize to nothing (`None`) become unset entries; fields
    /// without a matching option are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as a TOML table.
    pub fn capture<T: Serialize>(
        value: &T,
        options: &[OptionDescriptor],
    ) -> Result<Self, ConfigError> {
        let mut table = match Value::try_from(value)? {
            Value::Table(table) => table,
            _ => Table::new(),
        };

        Ok(options
            .iter()
            .map(|option| (option.name.clone(), table.remove(&option.name)))
            .collect())
    }

    /// Adds a value, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), Some(value.into()));
        self
    }

    /// Adds an entry with no value, returning `self` for chaining.
    #[must_use]
    pub fn with_unset(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), None);
        self
    }

    /// Sets the value of an entry.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.values.insert(name.into(), value);
    }

    /// Returns the value of `name`, if it has one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` has an entry, with or without a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Returns the entries that have a value as a TOML table.
    #[must_use]
    pub fn to_table(&self) -> Table {
        self.values
            .iter()
            .filter_map(|(name, value)| Some((name.clone(), value.clone()?)))
            .collect()
    }

    /// Converts the settings into a typed struct.
    ///
    /// This is where a value of the wrong type (say a string where an integer
    /// is declared) is caught.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettings`] if a value does not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Value::Table(self.to_table())
            .try_into()
            .map_err(ConfigError::InvalidSettings)
    }
}

impl FromIterator<(String, Option<Value>)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, Option<Value>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
