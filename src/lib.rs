//! Reports Azure AD application secrets that are about to expire.
//!
//! One run lists every application registration through Microsoft Graph,
//! keeps those whose tags match the monitor tag, and reports password
//! credentials expiring within the configured number of days, including
//! ones that have already expired.

pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod directory;
mod error;
pub mod evaluator;
pub mod logging;
pub mod monitor;
pub mod report;
pub mod settings;
pub mod tags;

pub use config::{Config, ConfigError};
pub use context::AppContext;
pub use directory::{DirectoryClient, DirectoryError, GraphClient};
pub use error::Error;
pub use evaluator::{EvaluationResult, Evaluator};
pub use monitor::SecretMonitor;
pub use settings::{OutputFormat, RunSettings};
