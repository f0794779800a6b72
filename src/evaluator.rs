//! Credential expiry evaluation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::directory::ApplicationRegistration;
use crate::settings::RunSettings;
use crate::tags::TagMatcher;

/// A password credential due within the threshold, copied out of its
/// registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub application_name: String,
    pub application_id: String,
    pub secret_id: String,
    /// UTC calendar date of the expiry, serialized as `YYYY-MM-DD`.
    pub expiry_date: NaiveDate,
    /// Whole days left; negative once the secret has expired.
    pub days_to_expiry: i64,
}

/// Whole days between `now` and `expiry`, truncated toward zero.
///
/// Counts elapsed hours, not calendar days: 23h59m is 0 days, 24h01m is 1,
/// and anything less than a day overdue is still 0.
pub fn days_to_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expiry - now).num_hours() / 24
}

/// Selects credentials on tagged registrations that expire within the
/// configured threshold.
#[derive(Debug, Clone)]
pub struct Evaluator {
    matcher: TagMatcher,
    threshold_days: i64,
}

impl Evaluator {
    pub fn new(settings: &RunSettings) -> Self {
        Self {
            matcher: TagMatcher::new(&settings.monitor_tag),
            threshold_days: settings.expiry_threshold_days,
        }
    }

    /// Results follow the listing order of `applications`, then the order of
    /// credentials within each registration.
    ///
    /// Credentials without an expiry or id, and registrations without a
    /// display name or app id, are skipped rather than failing the run.
    pub fn evaluate(
        &self,
        applications: &[ApplicationRegistration],
        now: DateTime<Utc>,
    ) -> Vec<EvaluationResult> {
        let mut results = Vec::new();

        for app in applications {
            if !self.matcher.matches(app.tags.as_slice()) {
                continue;
            }

            for credential in &app.password_credentials {
                let Some(expiry) = credential.end_date_time else {
                    continue;
                };

                let days = days_to_expiry(expiry, now);
                if days > self.threshold_days {
                    continue;
                }

                let (Some(secret_id), Some(name), Some(app_id)) = (
                    credential.key_id.as_ref(),
                    app.display_name.as_ref(),
                    app.app_id.as_ref(),
                ) else {
                    debug!(
                        app_id = app.app_id.as_deref().unwrap_or("-"),
                        "skipping credential with incomplete record"
                    );
                    continue;
                };

                results.push(EvaluationResult {
                    application_name: name.clone(),
                    application_id: app_id.clone(),
                    secret_id: secret_id.clone(),
                    expiry_date: expiry.date_naive(),
                    days_to_expiry: days,
                });
            }
        }

        results
    }
}
