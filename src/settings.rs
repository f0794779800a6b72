//! Run settings: the single immutable configuration value of a run.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{Config, ConfigError, OverrideSource};

/// Prefix of every environment variable the tool reads.
pub const ENV_PREFIX: &str = "AZURE";

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_MONITOR_TAG: &str = "MonitorSecrets";
pub const DEFAULT_EXPIRY_THRESHOLD_DAYS: i64 = 30;
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com";

/// Keys accepted from files, the environment and flags.
pub const SETTING_KEYS: &[&str] = &[
    "tenant_id",
    "client_id",
    "client_secret",
    "monitor_tag",
    "expiry_threshold_days",
    "format",
    "authority_host",
    "graph_endpoint",
];

/// A credential value that never shows up in `Debug` output or logs.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

/// Report rendering selected by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON document
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Secret,
    /// Regular expression (or literal, if it fails to compile) selecting
    /// the registrations to evaluate.
    pub monitor_tag: String,
    pub expiry_threshold_days: i64,
    pub format: OutputFormat,
    pub authority_host: String,
    pub graph_endpoint: String,
}

impl RunSettings {
    /// Loads settings from the config file, `AZURE_*` variables and flag
    /// overrides, in increasing order of precedence.
    ///
    /// An explicit `config_file` must exist; otherwise `./config.toml` is
    /// read when present.
    pub fn load(config_file: Option<&Path>, overrides: OverrideSource) -> Result<Self, ConfigError> {
        let builder = match config_file {
            Some(path) => Config::builder().with_file(path, true),
            None => Config::builder().with_file(DEFAULT_CONFIG_FILE, false),
        };

        Self::from_config(
            builder
                .with_env(ENV_PREFIX, SETTING_KEYS)
                .with_overrides(overrides),
        )
    }

    /// Builds and validates settings from an assembled configuration stack.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.build::<RawSettings>()?.validate()
    }
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    tenant_id: String,
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    client_secret: Secret,
    #[serde(default = "default_monitor_tag")]
    monitor_tag: String,
    #[serde(default = "default_threshold", deserialize_with = "int_or_numeric_string")]
    expiry_threshold_days: i64,
    #[serde(default = "default_format")]
    format: String,
    #[serde(default = "default_authority_host")]
    authority_host: String,
    #[serde(default = "default_graph_endpoint")]
    graph_endpoint: String,
}

impl RawSettings {
    fn validate(self) -> Result<RunSettings, ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::missing_field("client ID", "client_id", ENV_PREFIX));
        }
        if self.client_secret.is_blank() {
            return Err(ConfigError::missing_field("client secret", "client_secret", ENV_PREFIX));
        }
        if self.tenant_id.trim().is_empty() {
            return Err(ConfigError::missing_field("tenant ID", "tenant_id", ENV_PREFIX));
        }
        let format = self.format.parse()?;

        Ok(RunSettings {
            tenant_id: self.tenant_id,
            client_id: self.client_id,
            client_secret: self.client_secret,
            monitor_tag: self.monitor_tag,
            expiry_threshold_days: self.expiry_threshold_days,
            format,
            authority_host: self.authority_host,
            graph_endpoint: self.graph_endpoint,
        })
    }
}

fn default_monitor_tag() -> String {
    DEFAULT_MONITOR_TAG.to_string()
}

fn default_threshold() -> i64 {
    DEFAULT_EXPIRY_THRESHOLD_DAYS
}

fn default_format() -> String {
    OutputFormat::default().as_str().to_string()
}

fn default_authority_host() -> String {
    DEFAULT_AUTHORITY_HOST.to_string()
}

fn default_graph_endpoint() -> String {
    DEFAULT_GRAPH_ENDPOINT.to_string()
}

/// Environment values arrive as strings, file and flag values as integers.
fn int_or_numeric_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid expiry_threshold_days '{s}': expected an integer"
            ))
        }),
    }
}
