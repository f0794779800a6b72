use thiserror::Error;

/// Failures talking to the directory. None of them are retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DirectoryError {
    #[error("invalid {setting} '{value}': {reason}")]
    InvalidEndpoint {
        setting: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("credential error: token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),

    #[error("credential error: authentication failed ({status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("failed to get applications: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to get applications ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        source: reqwest::Error,
    },

    #[error("failed to get applications: listing exceeded {0} pages")]
    TooManyPages(usize),

    #[error("failed to get applications: refusing to follow next link to another host: {0}")]
    ForeignNextLink(String),
}
