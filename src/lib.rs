//! stylint: stylistic lint rules for JavaScript and TypeScript
//!
//! Each rule inspects the token stream and syntax tree of one file through a
//! [`LintContext`] and reports [`rule::LintWarning`]s, most of them with a fix.
//! [`fix_coordinator::FixCoordinator`] applies fixes until the file is stable.

pub mod config;
pub mod exit_codes;
pub mod fix;
pub mod fix_coordinator;
pub mod lint_context;
pub mod output;
pub mod rule;
pub mod rule_config_serde;
pub mod rules;
pub mod syntax;
pub mod utils;

pub use rules::*;

pub use crate::lint_context::LintContext;
use crate::rule::{LintResult, Rule};
use std::time::Instant;

/// Lint a file against the given rules
/// Assumes the provided `rules` vector contains the final,
/// configured, and filtered set of rules to be executed.
pub fn lint(content: &str, rules: &[Box<dyn Rule>]) -> LintResult {
    let overall_start = Instant::now();
    let ctx = LintContext::new(content)?;
    let mut warnings = Vec::new();

    for rule in rules {
        if rule.should_skip(&ctx) {
            continue;
        }
        let rule_start = Instant::now();
        warnings.extend(rule.check(&ctx)?);
        log::debug!("Rule {} took {:?}", rule.name(), rule_start.elapsed());
    }

    warnings.sort_by(|a, b| (a.line, a.column).cmp(&(b.line, b.column)));
    log::debug!(
        "Found {} warnings in {:?}",
        warnings.len(),
        overall_start.elapsed()
    );
    Ok(warnings)
}

/// Fix a file with the given rules until no fix applies, returning the fixed text
pub fn fix(content: &str, rules: &[Box<dyn Rule>]) -> Result<String, rule::LintError> {
    fix_coordinator::FixCoordinator::new()
        .fix_until_stable(content, rules, fix_coordinator::DEFAULT_MAX_PASSES)
        .map(|outcome| outcome.content)
}
