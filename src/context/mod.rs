//! Per-run context shared by the evaluator and the renderers.

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::settings::RunSettings;
use crate::Error;

/// Settings and evaluation instant of one run.
///
/// The instant is read from the clock once, when the context is built, so
/// the expiry arithmetic and the report timestamp always agree.
///
/// ## Example
///
/// ```no_run
/// use secret_monitor::{AppContext, RunSettings};
/// use secret_monitor::clock::SystemClock;
/// use secret_monitor::config::OverrideSource;
///
/// let settings = RunSettings::load(None, OverrideSource::new())?;
/// let ctx = AppContext::builder()
///     .with_settings(settings)
///     .with_clock(&SystemClock)
///     .build()?;
///
/// println!("threshold: {} days", ctx.settings().expiry_threshold_days);
/// # Ok::<(), secret_monitor::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: RunSettings,
    now: DateTime<Utc>,
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::default()
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// The instant every expiry in this run is measured against.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Builder for constructing an [`AppContext`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    settings: Option<RunSettings>,
    now: Option<DateTime<Utc>>,
}

impl AppContextBuilder {
    pub fn with_settings(mut self, settings: RunSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Captures the evaluation instant from `clock`.
    pub fn with_clock(mut self, clock: &dyn Clock) -> Self {
        self.now = Some(clock.now());
        self
    }

    /// Builds the `AppContext`.
    ///
    /// Returns an error if no settings were provided. Without a clock the
    /// system clock is read here.
    pub fn build(self) -> Result<AppContext, Error> {
        let settings = self.settings.ok_or(Error::MissingSettings)?;
        Ok(AppContext {
            settings,
            now: self.now.unwrap_or_else(|| SystemClock.now()),
        })
    }
}
