use toml::{Table, Value};

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Explicit key/value overrides, typically built from command-line flags.
///
/// Only values that were actually set are recorded, so an absent flag never
/// masks a value coming from a lower layer.
#[derive(Debug, Clone, Default)]
pub struct OverrideSource {
    values: Table,
}

impl OverrideSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigSource for OverrideSource {
    fn describe(&self) -> String {
        "command-line flags".to_string()
    }

    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(self
            .values
            .iter()
            .map(|(key, value)| ConfigEntry::key(key.clone(), value.clone()))
            .collect())
    }
}
