//! Fix composition and conflict safety
//!
//! Rules describe a fix as a list of [`TextEdit`]s. The edits of one report are merged
//! into a single [`Fix`] spanning all of them, with the untouched text between edits
//! copied from the source. [`FixTracker`] widens an edit so that it overlaps the
//! surrounding tokens, which makes the host treat an adjacent fix from another report as
//! a conflict and defer it to the next pass.

use crate::lint_context::{LintContext, TokenQuery};
use crate::rule::{Fix, LintError};
use crate::syntax::{Spanned, Token};
use std::ops::Range;

/// A single text edit: replace `range` with `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    pub fn insert_before(target: impl Spanned, text: impl Into<String>) -> Self {
        let start = target.start();
        Self::replace_range(start..start, text)
    }

    pub fn insert_after(target: impl Spanned, text: impl Into<String>) -> Self {
        let end = target.end();
        Self::replace_range(end..end, text)
    }

    pub fn replace(target: impl Spanned, text: impl Into<String>) -> Self {
        Self::replace_range(target.range(), text)
    }

    pub fn replace_range(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn remove(target: impl Spanned) -> Self {
        Self::replace_range(target.range(), "")
    }

    pub fn remove_range(range: Range<usize>) -> Self {
        Self::replace_range(range, "")
    }

    /// Empty range and empty text: applying it changes nothing
    pub fn is_noop(&self) -> bool {
        self.range.is_empty() && self.text.is_empty()
    }
}

/// Merge the edits of one report into a single fix.
///
/// No-op edits are dropped; if nothing remains, no fix is produced. Edits must be
/// pairwise disjoint (touching is fine); overlapping edits are a bug in the reporting
/// rule and fail with [`LintError::FixFailed`].
pub fn merge_fixes(content: &str, mut edits: Vec<TextEdit>) -> Result<Option<Fix>, LintError> {
    edits.retain(|edit| !edit.is_noop());
    edits.sort_by(|a, b| a.range.start.cmp(&b.range.start).then(a.range.end.cmp(&b.range.end)));

    let Some(first) = edits.first() else {
        return Ok(None);
    };
    if edits.len() == 1 {
        return Ok(Some(Fix {
            range: first.range.clone(),
            replacement: first.text.clone(),
        }));
    }

    let start = first.range.start;
    let mut end = start;
    let mut replacement = String::new();
    for edit in &edits {
        if edit.range.start < end {
            return Err(LintError::FixFailed(format!(
                "overlapping edits in one fix: {:?} and {:?}",
                start..end,
                edit.range
            )));
        }
        let between = content.get(end..edit.range.start).ok_or_else(|| {
            LintError::FixFailed(format!("edit range {:?} is outside the source", edit.range))
        })?;
        replacement.push_str(between);
        replacement.push_str(&edit.text);
        end = edit.range.end;
    }
    if end > content.len() {
        return Err(LintError::FixFailed(format!("edit end {end} exceeds source length")));
    }

    Ok(Some(Fix {
        range: start..end,
        replacement,
    }))
}

/// Replace everything between two tokens, unless a comment lies in between.
///
/// Returns `None` (report without a fix) rather than deleting a comment.
pub fn safe_replace_between(
    ctx: &LintContext,
    left: &Token,
    right: &Token,
    replacement: impl Into<String>,
) -> Option<TextEdit> {
    if ctx.comments_exist_between(left, right) {
        return None;
    }
    Some(TextEdit::replace_range(left.end()..right.start(), replacement))
}

/// Builds edits whose range is widened to cover a retained region of the source.
///
/// The retained text is copied into the replacement unchanged, so the edit's effect is
/// the same; only its footprint grows.
#[derive(Debug, Clone)]
pub struct FixTracker<'a> {
    content: &'a str,
    retained: Option<Range<usize>>,
}

impl<'a> FixTracker<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            retained: None,
        }
    }

    /// Mark a range as retained
    pub fn retain_range(mut self, range: Range<usize>) -> Self {
        self.retained = Some(match self.retained {
            Some(current) => current.start.min(range.start)..current.end.max(range.end),
            None => range,
        });
        self
    }

    /// Retain from the start of the token before `token` to the end of the token after it
    pub fn retain_surrounding_tokens(self, ctx: &LintContext, token: &Token) -> Self {
        let before = ctx.token_before(token, TokenQuery::default()).unwrap_or(token);
        let after = ctx.token_after(token, TokenQuery::default()).unwrap_or(token);
        self.retain_range(before.start()..after.end())
    }

    pub fn replace_text_range(&self, range: Range<usize>, text: &str) -> Result<TextEdit, LintError> {
        let Some(retained) = &self.retained else {
            return Ok(TextEdit::replace_range(range, text));
        };
        let start = retained.start.min(range.start);
        let end = retained.end.max(range.end);
        let (Some(prefix), Some(suffix)) = (self.content.get(start..range.start), self.content.get(range.end..end))
        else {
            return Err(LintError::FixFailed(format!(
                "retained range {start}..{end} is outside the source"
            )));
        };
        Ok(TextEdit::replace_range(start..end, format!("{prefix}{text}{suffix}")))
    }

    pub fn remove(&self, target: impl Spanned) -> Result<TextEdit, LintError> {
        self.replace_text_range(target.range(), "")
    }

    pub fn replace_text(&self, target: impl Spanned, text: &str) -> Result<TextEdit, LintError> {
        self.replace_text_range(target.range(), text)
    }
}
