//! Layered configuration loading.
//!
//! Settings are assembled from a stack of [`ConfigSource`]s (defaults, a TOML
//! file, environment variables, command-line overrides) merged in
//! registration order and deserialized once into a typed struct.

mod builder;
mod env;
mod error;
mod file;
mod overrides;
mod source;

pub use builder::Config;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use overrides::OverrideSource;
pub use source::{ConfigEntry, ConfigSource};
