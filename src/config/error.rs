use std::path::PathBuf;
use thiserror::Error;

use super::env::env_var_name;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("{label} is required (use --{flag} flag, {env} env var, or config file)")]
    MissingField {
        label: &'static str,
        flag: String,
        env: String,
    },

    #[error("invalid format '{0}': must be 'text' or 'json'")]
    InvalidFormat(String),
}

impl ConfigError {
    /// A required setting was empty after every layer was merged.
    pub fn missing_field(label: &'static str, key: &str, env_prefix: &str) -> Self {
        Self::MissingField {
            label,
            flag: key.replace('_', "-"),
            env: env_var_name(env_prefix, key),
        }
    }
}
