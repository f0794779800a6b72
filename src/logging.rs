//! Diagnostic logging on stderr.
//!
//! Stdout carries only the report, so every log line goes to stderr. The
//! default level is `warn`; `-v` raises this crate to `info`, `-vv` to
//! `debug`. `RUST_LOG` overrides both.

use tracing_subscriber::EnvFilter;

/// Filter directive for a given `-v` count.
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!("warn,secret_monitor={level}")
}

/// Installs the global subscriber. Call once, before any other work.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
