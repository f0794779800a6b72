use toml::{Table, Value};

use super::ConfigError;

/// A value contributed by a configuration layer.
///
/// Without a key the value is a table merged at the root; with a key it
/// replaces that top-level setting.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub key: Option<String>,
    pub value: Value,
}

impl ConfigEntry {
    pub fn root(table: Table) -> Self {
        Self {
            key: None,
            value: Value::Table(table),
        }
    }

    pub fn key(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// One layer of the configuration stack.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Short description used in log output.
    fn describe(&self) -> String;

    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError>;
}

/// Applies an entry on top of `table`, replacing scalars and merging tables.
pub fn merge_entry(table: &mut Table, entry: ConfigEntry) {
    match (entry.key, entry.value) {
        (None, Value::Table(overlay)) => deep_merge(table, overlay),
        (None, _) => {}
        (Some(key), Value::Table(overlay)) => match table.get_mut(&key) {
            Some(Value::Table(base)) => deep_merge(base, overlay),
            _ => {
                table.insert(key, Value::Table(overlay));
            }
        },
        (Some(key), value) => {
            table.insert(key, value);
        }
    }
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
