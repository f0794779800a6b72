use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::env::EnvSource;
use super::file::FileSource;
use super::overrides::OverrideSource;
use super::source::{merge_entry, ConfigSource};
use super::ConfigError;

/// Builder that merges configuration layers into one typed value.
///
/// Layers are applied in registration order, so later layers override
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely. Defaults belong on the target
/// type (`#[serde(default)]`) and sit beneath every layer.
///
/// ## Example
///
/// ```no_run
/// use secret_monitor::config::{Config, OverrideSource};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     tenant_id: String,
///     #[serde(default)]
///     monitor_tag: String,
/// }
///
/// // file -> environment -> flags
/// let settings: Settings = Config::builder()
///     .with_file("config.toml", false)
///     .with_env("AZURE", &["tenant_id", "monitor_tag"])
///     .with_overrides(OverrideSource::new().set("monitor_tag", "Prod.*"))
///     .build()?;
/// # Ok::<(), secret_monitor::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file layer.
    ///
    /// If `required` is `true`, the build fails when the file doesn't exist;
    /// otherwise a missing file is skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds an environment layer reading `<PREFIX>_<KEY>` for each key.
    pub fn with_env<K: AsRef<str>>(self, prefix: impl Into<String>, keys: &[K]) -> Self {
        self.with_source(EnvSource::new(prefix, keys))
    }

    /// Adds an explicit override layer.
    pub fn with_overrides(self, overrides: OverrideSource) -> Self {
        self.with_source(overrides)
    }

    /// Adds an arbitrary layer.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every layer, merges them and deserializes the result.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let mut merged = toml::Table::new();

        for source in &self.sources {
            let entries = source.entries()?;
            debug!(source = %source.describe(), entries = entries.len(), "applying config layer");
            for entry in entries {
                merge_entry(&mut merged, entry);
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}
