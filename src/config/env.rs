use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Reads a fixed set of keys from prefixed environment variables.
///
/// Each key maps to `<PREFIX>_<KEY>` uppercased, so with prefix `AZURE` the
/// key `client_id` is read from `AZURE_CLIENT_ID`. Only the declared keys are
/// consulted. Values are passed on as strings; empty values count as unset.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    keys: Vec<String>,
}

impl EnvSource {
    pub fn new<K: AsRef<str>>(prefix: impl Into<String>, keys: &[K]) -> Self {
        Self {
            prefix: prefix.into(),
            keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
        }
    }

    /// Environment variable name for a config key.
    pub fn var_name(&self, key: &str) -> String {
        env_var_name(&self.prefix, key)
    }
}

pub(crate) fn env_var_name(prefix: &str, key: &str) -> String {
    format!("{}_{}", prefix, key.replace('-', "_")).to_uppercase()
}

impl ConfigSource for EnvSource {
    fn describe(&self) -> String {
        format!("environment ({}_*)", self.prefix)
    }

    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let mut entries = Vec::new();

        for key in &self.keys {
            let Ok(value) = std::env::var(self.var_name(key)) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            entries.push(ConfigEntry::key(key.clone(), value));
        }

        Ok(entries)
    }
}
