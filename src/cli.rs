//! Command-line flags.
//!
//! Every setting flag is optional so that an absent flag leaves the value
//! from the environment, the config file or the defaults in place.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::OverrideSource;
use crate::settings::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "azure-secret-monitor")]
#[command(about = "Monitor Azure AD application secrets for expiration")]
#[command(
    long_about = "A tool to monitor Azure AD application secrets and identify those approaching expiration."
)]
#[command(version)]
pub struct Cli {
    /// Config file (default is ./config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Azure AD tenant ID
    #[arg(long)]
    pub tenant_id: Option<String>,

    /// Azure AD client ID
    #[arg(long)]
    pub client_id: Option<String>,

    /// Azure AD client secret
    #[arg(long)]
    pub client_secret: Option<String>,

    /// Tag to monitor, as a regular expression [default: MonitorSecrets]
    #[arg(long)]
    pub monitor_tag: Option<String>,

    /// Number of days before expiration to report secrets [default: 30]
    #[arg(long, allow_negative_numbers = true)]
    pub expiry_threshold_days: Option<i64>,

    /// Output format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The flags that were given, as the top configuration layer.
    pub fn overrides(&self) -> OverrideSource {
        OverrideSource::new()
            .set_opt("tenant_id", self.tenant_id.clone())
            .set_opt("client_id", self.client_id.clone())
            .set_opt("client_secret", self.client_secret.clone())
            .set_opt("monitor_tag", self.monitor_tag.clone())
            .set_opt("expiry_threshold_days", self.expiry_threshold_days)
            .set_opt("format", self.format.map(|f| f.as_str()))
    }
}
