//! JSON output formatter

use crate::output::OutputFormatter;
use crate::rule::{LintWarning, Severity};
use serde_json::{Value, json};

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn warning_to_json(file_path: &str, warning: &LintWarning) -> Value {
    json!({
        "file": file_path,
        "line": warning.line,
        "column": warning.column,
        "endLine": warning.end_line,
        "endColumn": warning.end_column,
        "rule": warning.rule_name.unwrap_or("unknown"),
        "messageId": warning.message_id,
        "message": warning.message,
        "severity": match warning.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        },
        "fix": warning.fix.as_ref().map(|f| {
            json!({
                "range": [f.range.start, f.range.end],
                "text": f.replacement
            })
        })
    })
}

impl OutputFormatter for JsonFormatter {
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String {
        let json_warnings: Vec<Value> = warnings.iter().map(|w| warning_to_json(file_path, w)).collect();
        serde_json::to_string_pretty(&json_warnings).unwrap_or_default()
    }
}

/// Format the warnings of all files as a single JSON array
pub fn format_all_warnings_as_json(all_warnings: &[(String, Vec<LintWarning>)]) -> String {
    let json_warnings: Vec<Value> = all_warnings
        .iter()
        .flat_map(|(file_path, warnings)| warnings.iter().map(move |w| warning_to_json(file_path, w)))
        .collect();
    serde_json::to_string_pretty(&json_warnings).unwrap_or_default()
}
