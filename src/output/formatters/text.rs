//! Default text output formatter with colors

use crate::output::OutputFormatter;
use crate::rule::LintWarning;
#[cfg(feature = "colored")]
use colored::*;

#[derive(Clone, Copy)]
enum Part {
    Path,
    Position,
    Rule,
    Fixable,
}

#[cfg(feature = "colored")]
fn paint(text: &str, part: Part) -> String {
    match part {
        Part::Path => text.blue().underline().to_string(),
        Part::Position => text.cyan().to_string(),
        Part::Rule => text.yellow().to_string(),
        Part::Fixable => text.green().to_string(),
    }
}

#[cfg(not(feature = "colored"))]
fn paint(text: &str, _part: Part) -> String {
    text.to_string()
}

/// Default human-readable formatter: `file:line:column: [rule] message [*]`
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn style(&self, text: &str, part: Part) -> String {
        if self.use_colors {
            paint(text, part)
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String {
        warnings
            .iter()
            .map(|warning| {
                let rule_name = warning.rule_name.unwrap_or("unknown");
                let fix_indicator = if warning.fix.is_some() { " [*]" } else { "" };
                format!(
                    "{}:{}:{}: {} {}{}",
                    self.style(file_path, Part::Path),
                    self.style(&warning.line.to_string(), Part::Position),
                    self.style(&warning.column.to_string(), Part::Position),
                    self.style(&format!("[{rule_name}]"), Part::Rule),
                    warning.message,
                    self.style(fix_indicator, Part::Fixable),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_summary(&self, files_processed: usize, total_warnings: usize, duration_ms: u64) -> Option<String> {
        let files = if files_processed == 1 { "file" } else { "files" };
        Some(if total_warnings == 0 {
            format!("No issues found in {files_processed} {files} ({duration_ms}ms)")
        } else {
            let issues = if total_warnings == 1 { "issue" } else { "issues" };
            format!("Found {total_warnings} {issues} in {files_processed} {files} ({duration_ms}ms)")
        })
    }

    fn use_colors(&self) -> bool {
        self.use_colors
    }
}
