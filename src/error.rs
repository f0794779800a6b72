use crate::config::ConfigError;
use crate::directory::DirectoryError;
use thiserror::Error;

/// Top-level error type. Each message embeds its cause, so printing the
/// error gives the whole chain.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create monitor: {0}")]
    Client(#[source] DirectoryError),

    #[error("failed to check secrets: {0}")]
    Fetch(#[source] DirectoryError),

    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to write report: {0}")]
    Output(#[source] std::io::Error),

    #[error("application context requires run settings")]
    MissingSettings,
}
