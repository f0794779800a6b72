//! Report rendering.

mod json;
mod text;

use chrono::{DateTime, SecondsFormat, Utc};

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::context::AppContext;
use crate::evaluator::EvaluationResult;
use crate::settings::{OutputFormat, RunSettings};
use crate::Error;

/// Everything a renderer needs: the results, the settings they were
/// evaluated under and the evaluation instant.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub results: &'a [EvaluationResult],
    pub settings: &'a RunSettings,
    pub generated_at: DateTime<Utc>,
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [EvaluationResult], ctx: &'a AppContext) -> Self {
        Self {
            results,
            settings: ctx.settings(),
            generated_at: ctx.now(),
        }
    }

    /// RFC 3339 UTC timestamp with second precision, e.g. `2024-12-22T10:00:00Z`.
    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, report: &Report<'_>) -> Result<String, Error>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
