use serde::Serialize;

use super::{Renderer, Report};
use crate::evaluator::EvaluationResult;
use crate::settings::OutputFormat;
use crate::Error;

/// Machine-readable report: a pretty-printed JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct OutputDocument<'a> {
    results: &'a [EvaluationResult],
    execution_info: ExecutionInfo<'a>,
}

#[derive(Serialize)]
struct ExecutionInfo<'a> {
    timestamp: String,
    config: ConfigInfo<'a>,
}

/// The non-secret part of the settings.
#[derive(Serialize)]
struct ConfigInfo<'a> {
    expiry_threshold_days: i64,
    monitor_tag: &'a str,
    format: OutputFormat,
}

impl Renderer for JsonRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String, Error> {
        let document = OutputDocument {
            results: report.results,
            execution_info: ExecutionInfo {
                timestamp: report.timestamp(),
                config: ConfigInfo {
                    expiry_threshold_days: report.settings.expiry_threshold_days,
                    monitor_tag: &report.settings.monitor_tag,
                    format: report.settings.format,
                },
            },
        };

        let mut out = serde_json::to_string_pretty(&document)?;
        out.push('\n');
        Ok(out)
    }
}
