use super::{Renderer, Report};
use crate::Error;

const RULE_WIDTH: usize = 50;

/// Human-readable report.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String, Error> {
        let mut out = String::new();

        out.push_str("Azure Secret Monitor Report\n");
        out.push_str(&format!("Generated at: {}\n", report.timestamp()));
        out.push_str("Configuration:\n");
        out.push_str(&format!(
            "  - Expiry Threshold: {} days\n",
            report.settings.expiry_threshold_days
        ));
        out.push_str(&format!("  - Monitor Tag: {}\n", report.settings.monitor_tag));
        out.push('\n');

        if report.results.is_empty() {
            out.push_str("No expiring secrets found.\n");
            return Ok(out);
        }

        out.push_str(&format!("Found {} expiring secrets:\n\n", report.results.len()));
        let rule = "-".repeat(RULE_WIDTH);
        for result in report.results {
            out.push_str(&format!("Application: {}\n", result.application_name));
            out.push_str(&format!("App ID: {}\n", result.application_id));
            out.push_str(&format!("Secret ID: {}\n", result.secret_id));
            out.push_str(&format!("Expiry Date: {}\n", result.expiry_date.format("%Y-%m-%d")));
            out.push_str(&format!("Days Until Expiry: {}\n", result.days_to_expiry));
            out.push_str(&rule);
            out.push('\n');
        }

        Ok(out)
    }
}
