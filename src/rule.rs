//!
//! This module defines the Rule trait and related types for implementing stylistic rules in stylint.
//! Includes rule categories, warnings with their fixes, message templating, and the reporter
//! rules use to turn violations into warnings.

use dyn_clone::DynClone;
use serde::Serialize;
use std::ops::Range;
use thiserror::Error;

use crate::config::Config;
use crate::fix::{TextEdit, merge_fixes};
use crate::lint_context::LintContext;
use crate::syntax::SourceLocation;
use crate::utils::warn_once::WarnOnce;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fix failed: {0}")]
    FixFailed(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    ParsingError(String),
    /// An expected token or node relationship does not hold
    #[error("Precondition violated: {0}")]
    Precondition(String),
}

pub type LintResult = Result<Vec<LintWarning>, LintError>;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LintWarning {
    pub message: String,
    /// Identifier into the reporting rule's message table
    pub message_id: &'static str,
    pub line: usize,       // 1-indexed line number
    pub column: usize,     // 1-indexed column number
    pub end_line: usize,   // 1-indexed end line
    pub end_column: usize, // 1-indexed end column
    pub severity: Severity,
    pub fix: Option<Fix>,
    pub rule_name: Option<&'static str>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Type of rule for selective processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Braces,
    Commas,
    Delimiters,
    Indentation,
    Operators,
    Spacing,
    Semicolons,
    Other,
}

/// A rule's statically declared message templates, keyed by message id
pub type MessageTable = &'static [(&'static str, &'static str)];

/// Substitute `{{name}}` placeholders (inner whitespace allowed) with values from `data`.
/// Unknown placeholders are left as written.
pub fn render_message(template: &str, data: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let key = after[..close].trim();
                match data.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[open..open + 2 + close + 2]),
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collects the violations of one rule over one file.
///
/// Mirrors a host's `report` callback: each report names a message id from the rule's
/// table, a location, template data, and the edits of an optional fix. Edits of one
/// report are merged into a single [`Fix`].
pub struct Reporter<'a> {
    ctx: &'a LintContext<'a>,
    rule_name: &'static str,
    messages: MessageTable,
    warnings: Vec<LintWarning>,
}

impl<'a> Reporter<'a> {
    pub fn new(ctx: &'a LintContext<'a>, rule_name: &'static str, messages: MessageTable) -> Self {
        Self {
            ctx,
            rule_name,
            messages,
            warnings: Vec::new(),
        }
    }

    /// Report a violation. `edits` of `None` means no fix is offered.
    pub fn report(
        &mut self,
        loc: SourceLocation,
        message_id: &'static str,
        data: &[(&str, String)],
        edits: Option<Vec<TextEdit>>,
    ) -> Result<(), LintError> {
        let template = self
            .messages
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, template)| *template)
            .ok_or_else(|| {
                LintError::InvalidInput(format!("{}: unknown message id '{message_id}'", self.rule_name))
            })?;

        let fix = match edits {
            Some(edits) => merge_fixes(self.ctx.content, edits)?,
            None => None,
        };

        self.warnings.push(LintWarning {
            message: render_message(template, data),
            message_id,
            line: loc.start.line,
            column: loc.start.column + 1,
            end_line: loc.end.line,
            end_column: loc.end.column + 1,
            severity: Severity::Warning,
            fix,
            rule_name: Some(self.rule_name),
        });
        Ok(())
    }

    pub fn into_warnings(self) -> Vec<LintWarning> {
        self.warnings
    }
}

pub trait Rule: DynClone + Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn check(&self, ctx: &LintContext) -> LintResult;

    /// Apply this rule's own fixes once
    fn fix(&self, ctx: &LintContext) -> Result<String, LintError> {
        let warnings = self.check(ctx)?;
        crate::utils::fix_utils::apply_warning_fixes(ctx.content, &warnings).map_err(LintError::FixFailed)
    }

    /// Check if this rule should quickly skip processing based on content
    fn should_skip(&self, _ctx: &LintContext) -> bool {
        false
    }

    /// Get the category of this rule for selective processing
    fn category(&self) -> RuleCategory {
        RuleCategory::Other
    }

    fn as_any(&self) -> &dyn std::any::Any;

    /// Returns the rule name and default config table if the rule has config.
    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        None
    }

    /// Factory: create a rule from config (if present), or use defaults.
    /// Deprecated option spellings are reported through `warn_once`.
    fn from_config(config: &Config, warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized;
}

// Implement the cloning logic for the Rule trait object
dyn_clone::clone_trait_object!(Rule);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message_substitutes_placeholders() {
        let message = render_message(
            "Expected indentation of {{expected}} but found {{ actual }}.",
            &[("expected", "4 spaces".to_string()), ("actual", "0".to_string())],
        );
        assert_eq!(message, "Expected indentation of 4 spaces but found 0.");
    }

    #[test]
    fn test_render_message_keeps_unknown_placeholders() {
        assert_eq!(render_message("a {{missing}} b", &[]), "a {{missing}} b");
        assert_eq!(render_message("unterminated {{x", &[]), "unterminated {{x");
        assert_eq!(render_message("no placeholders", &[]), "no placeholders");
    }

    #[test]
    fn test_reporter_builds_warning_and_merged_fix() {
        let ctx = LintContext::new("a = {b}").unwrap();
        let mut reporter = Reporter::new(&ctx, "demo", &[("spaced", "Space {{where}}.")]);
        let open = ctx.tokens.iter().find(|t| t.value == "{").unwrap();
        let close = ctx.tokens.iter().find(|t| t.value == "}").unwrap();
        reporter
            .report(
                open.loc,
                "spaced",
                &[("where", "inside".to_string())],
                Some(vec![
                    TextEdit::insert_after(open, " "),
                    TextEdit::insert_before(close, " "),
                ]),
            )
            .unwrap();
        let warnings = reporter.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Space inside.");
        assert_eq!(warnings[0].message_id, "spaced");
        assert_eq!(warnings[0].line, 1);
        assert_eq!(warnings[0].column, 5);
        assert_eq!(
            warnings[0].fix,
            Some(Fix {
                range: 5..6,
                replacement: " b ".to_string()
            })
        );
    }

    #[test]
    fn test_reporter_rejects_unknown_message_id() {
        let ctx = LintContext::new("a;").unwrap();
        let mut reporter = Reporter::new(&ctx, "demo", &[]);
        let err = reporter
            .report(ctx.tokens[0].loc, "missing", &[], None)
            .unwrap_err();
        assert!(matches!(err, LintError::InvalidInput(_)));
    }
}
