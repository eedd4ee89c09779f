//! Utilities for applying fixes to source text
//!
//! Fixes are applied in one left-to-right pass. A fix is skipped when it overlaps or
//! touches the range of a fix already applied in the same pass; the skipped warning is
//! picked up again when the file is re-linted.

use crate::rule::{Fix, LintWarning};

/// Predominant line terminator of `content`
fn detect_line_ending(content: &str) -> &'static str {
    let crlf_count = content.matches("\r\n").count();
    let lf_count = content.matches('\n').count() - crlf_count;
    if crlf_count > lf_count { "\r\n" } else { "\n" }
}

/// Helper function to validate that a fix range makes sense in the context
pub fn validate_fix_range(content: &str, fix: &Fix) -> Result<(), String> {
    if fix.range.start > fix.range.end {
        return Err(format!(
            "Invalid fix range: start {} > end {}",
            fix.range.start, fix.range.end
        ));
    }
    if fix.range.end > content.len() {
        return Err(format!(
            "Fix range end {} exceeds content length {}",
            fix.range.end,
            content.len()
        ));
    }
    if !content.is_char_boundary(fix.range.start) || !content.is_char_boundary(fix.range.end) {
        return Err(format!("Fix range {:?} splits a character", fix.range));
    }
    Ok(())
}

/// Apply a single fix, ignoring any other warnings
pub fn apply_fix(content: &str, fix: &Fix) -> String {
    let mut result = content.to_string();
    if validate_fix_range(content, fix).is_ok() {
        result.replace_range(fix.range.clone(), &fix.replacement);
    }
    result
}

/// Apply the non-conflicting fixes of `warnings` in one pass.
///
/// Returns the new content and the number of fixes applied.
pub fn apply_fixes_once(content: &str, warnings: &[LintWarning]) -> Result<(String, usize), String> {
    let line_ending = detect_line_ending(content);
    let mut fixes: Vec<&Fix> = warnings.iter().filter_map(|w| w.fix.as_ref()).collect();
    fixes.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(a.range.end.cmp(&b.range.end))
    });
    // Identical fixes from different warnings are applied once
    fixes.dedup_by(|a, b| a == b);

    let mut output = String::with_capacity(content.len());
    let mut last_end: Option<usize> = None;
    let mut applied = 0;

    for fix in fixes {
        validate_fix_range(content, fix)?;
        if last_end.is_some_and(|end| end >= fix.range.start) {
            continue;
        }
        output.push_str(&content[last_end.unwrap_or(0)..fix.range.start]);
        if line_ending == "\r\n" && !fix.replacement.contains("\r\n") {
            output.push_str(&fix.replacement.replace('\n', "\r\n"));
        } else {
            output.push_str(&fix.replacement);
        }
        last_end = Some(fix.range.end);
        applied += 1;
    }
    output.push_str(&content[last_end.unwrap_or(0)..]);

    Ok((output, applied))
}

/// Apply a list of warning fixes to content in one pass
pub fn apply_warning_fixes(content: &str, warnings: &[LintWarning]) -> Result<String, String> {
    apply_fixes_once(content, warnings).map(|(output, _)| output)
}
