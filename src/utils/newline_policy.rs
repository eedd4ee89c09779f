//! Spacing/newline decision engine shared by the brace and bracket newline rules
//!
//! A rule extracts the delimiter pair and element count of a construct, resolves its
//! [`NewlinePolicy`], and hands both to [`check_delimiter_newlines`], which decides for
//! each boundary whether a line break must be inserted, removed, or left alone.

use crate::fix::TextEdit;
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, Reporter};
use crate::syntax::{Spanned, Token};
use crate::utils::ast_utils::is_token_on_same_line;
use crate::utils::warn_once::WarnOnce;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String form of a newline option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewlineStyle {
    Always,
    Never,
}

/// Object form of a newline option
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NewlineObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
    #[serde(default, alias = "min_elements", skip_serializing_if = "Option::is_none")]
    pub min_elements: Option<usize>,
    /// Deprecated spelling of `min-elements`
    #[serde(default, alias = "min_properties", skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistent: Option<bool>,
}

/// A user-facing newline option: `"always"`, `"never"`, or an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NewlineOption {
    Style(NewlineStyle),
    Object(NewlineObject),
}

impl NewlineOption {
    /// Whether the option spells `min-properties` instead of `min-elements`
    pub fn uses_min_properties(&self) -> bool {
        matches!(self, NewlineOption::Object(object) if object.min_properties.is_some())
    }
}

/// Newline options as written in a rule table: a base option spelled either as
/// `style = "always" | "never"` or with the object keys inline, plus per-construct
/// overrides keyed by construct name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NewlineOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NewlineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
    #[serde(
        default,
        alias = "min_elements",
        alias = "min-items",
        alias = "min_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_elements: Option<usize>,
    #[serde(default, alias = "min_properties", skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistent: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, NewlineOption>,
}

impl NewlineOptions {
    /// The base option, if any key of it was given
    pub fn base(&self) -> Option<NewlineOption> {
        if let Some(style) = self.style {
            return Some(NewlineOption::Style(style));
        }
        let object = NewlineObject {
            multiline: self.multiline,
            min_elements: self.min_elements,
            min_properties: self.min_properties,
            consistent: self.consistent,
        };
        (object != NewlineObject::default()).then_some(NewlineOption::Object(object))
    }

    /// Whether the deprecated `min-properties` spelling appears anywhere
    pub fn uses_min_properties(&self) -> bool {
        self.min_properties.is_some() || self.overrides.values().any(NewlineOption::uses_min_properties)
    }

    /// Resolve one policy per construct: its override if present, else the base option,
    /// else `default`. Override names that match no construct are logged once.
    pub fn resolve<K: Ord + Copy>(
        &self,
        rule_name: &str,
        constructs: &[(K, &str)],
        default: NewlinePolicy,
        warn_once: &WarnOnce,
    ) -> PolicyTable<K, NewlinePolicy> {
        for name in self.overrides.keys() {
            if !constructs.iter().any(|(_, construct)| construct == name) {
                warn_once.warn(format!("{rule_name}: unknown construct '{name}' in overrides is ignored"));
            }
        }
        if self.uses_min_properties() {
            warn_once.warn(format!(
                "{rule_name}: option 'min-properties' is deprecated, use 'min-elements' instead"
            ));
        }

        let base = NewlinePolicy::from_option(self.base().as_ref(), default);
        PolicyTable::build(constructs.iter().map(|(kind, _)| *kind), base, |kind| {
            constructs
                .iter()
                .find(|(k, _)| *k == kind)
                .and_then(|(_, name)| self.overrides.get(*name))
                .map_or(base, |option| NewlinePolicy::from_option(Some(option), default))
        })
    }
}

/// Fully resolved newline policy for one construct kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewlinePolicy {
    pub multiline: bool,
    /// Element count at or above which breaks are required; `usize::MAX` for never
    pub min_elements: usize,
    pub consistent: bool,
}

impl NewlinePolicy {
    /// Policy used when no option is given: breaks must match on both sides
    pub const CONSISTENT: Self = Self {
        multiline: false,
        min_elements: usize::MAX,
        consistent: true,
    };

    /// Policy requiring breaks only around multi-line content
    pub const MULTILINE: Self = Self {
        multiline: true,
        min_elements: usize::MAX,
        consistent: false,
    };

    /// Resolve a user option, falling back to `default` when absent
    pub fn from_option(option: Option<&NewlineOption>, default: Self) -> Self {
        match option {
            None => default,
            Some(NewlineOption::Style(NewlineStyle::Always)) => Self {
                multiline: false,
                min_elements: 0,
                consistent: false,
            },
            Some(NewlineOption::Style(NewlineStyle::Never)) => Self {
                multiline: false,
                min_elements: usize::MAX,
                consistent: false,
            },
            Some(NewlineOption::Object(object)) => Self {
                multiline: object.multiline.unwrap_or(false),
                // a zero threshold counts as unset
                min_elements: object
                    .min_elements
                    .or(object.min_properties)
                    .filter(|n| *n > 0)
                    .unwrap_or(usize::MAX),
                consistent: object.consistent.unwrap_or(false),
            },
        }
    }

    pub fn needs_line_breaks(&self, layout: &Layout) -> bool {
        layout.element_count >= self.min_elements
            || (self.multiline && layout.element_count > 0 && layout.content_spans_lines)
    }

    pub fn evaluate(&self, layout: &Layout) -> Verdict {
        if self.needs_line_breaks(layout) {
            return Verdict {
                opening: if layout.break_after_open {
                    BoundaryAction::NoOp
                } else {
                    BoundaryAction::InsertBreak
                },
                closing: if layout.break_before_close {
                    BoundaryAction::NoOp
                } else {
                    BoundaryAction::InsertBreak
                },
            };
        }

        let (remove_opening, remove_closing) = if self.consistent {
            (
                layout.break_after_open && !layout.break_before_close,
                !layout.break_after_open && layout.break_before_close,
            )
        } else {
            (layout.break_after_open, layout.break_before_close)
        };
        Verdict {
            opening: if remove_opening {
                BoundaryAction::RemoveBreak
            } else {
                BoundaryAction::NoOp
            },
            closing: if remove_closing {
                BoundaryAction::RemoveBreak
            } else {
                BoundaryAction::NoOp
            },
        }
    }
}

/// Current layout of a delimiter pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub element_count: usize,
    /// First and last inner tokens (comments included) are on different lines
    pub content_spans_lines: bool,
    pub break_after_open: bool,
    pub break_before_close: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAction {
    NoOp,
    InsertBreak,
    RemoveBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub opening: BoundaryAction,
    pub closing: BoundaryAction,
}

/// Message ids a newline rule reports under
#[derive(Debug, Clone, Copy)]
pub struct BoundaryMessages {
    pub expected_after_open: &'static str,
    pub expected_before_close: &'static str,
    pub unexpected_after_open: &'static str,
    pub unexpected_before_close: &'static str,
}

pub const BRACE_MESSAGES: BoundaryMessages = BoundaryMessages {
    expected_after_open: "expectedLinebreakAfterOpeningBrace",
    expected_before_close: "expectedLinebreakBeforeClosingBrace",
    unexpected_after_open: "unexpectedLinebreakAfterOpeningBrace",
    unexpected_before_close: "unexpectedLinebreakBeforeClosingBrace",
};

pub const BRACE_MESSAGE_TABLE: &[(&str, &str)] = &[
    ("expectedLinebreakAfterOpeningBrace", "Expected a line break after this opening brace."),
    ("expectedLinebreakBeforeClosingBrace", "Expected a line break before this closing brace."),
    ("unexpectedLinebreakAfterOpeningBrace", "Unexpected line break after this opening brace."),
    ("unexpectedLinebreakBeforeClosingBrace", "Unexpected line break before this closing brace."),
];

/// Check the line breaks just inside `open`/`close` and report violations.
///
/// Whether content spans lines is judged with comments included; the boundary breaks
/// are judged against the nearest code tokens. No fix is offered for a boundary whose
/// adjacent inner token is a comment.
pub fn check_delimiter_newlines(
    ctx: &LintContext,
    reporter: &mut Reporter,
    open: &Token,
    close: &Token,
    element_count: usize,
    policy: &NewlinePolicy,
    messages: &BoundaryMessages,
) -> Result<(), LintError> {
    let first_inner = ctx
        .token_after(open, TokenQuery::with_comments())
        .required("a token after the opening delimiter")?;
    let last_inner = ctx
        .token_before(close, TokenQuery::with_comments())
        .required("a token before the closing delimiter")?;
    let first = ctx
        .token_after(open, TokenQuery::default())
        .required("a token after the opening delimiter")?;
    let last = ctx
        .token_before(close, TokenQuery::default())
        .required("a token before the closing delimiter")?;

    let layout = Layout {
        element_count,
        content_spans_lines: first_inner.loc.start.line != last_inner.loc.end.line,
        break_after_open: !is_token_on_same_line(open, first),
        break_before_close: !is_token_on_same_line(last, close),
    };
    let verdict = policy.evaluate(&layout);
    let fix_opening = !first_inner.is_comment();
    let fix_closing = !last_inner.is_comment();

    match verdict.opening {
        BoundaryAction::NoOp => {}
        BoundaryAction::InsertBreak => reporter.report(
            open.loc,
            messages.expected_after_open,
            &[],
            fix_opening.then(|| vec![TextEdit::insert_after(open, "\n")]),
        )?,
        BoundaryAction::RemoveBreak => reporter.report(
            open.loc,
            messages.unexpected_after_open,
            &[],
            fix_opening.then(|| vec![TextEdit::remove_range(open.end()..first.start())]),
        )?,
    }

    match verdict.closing {
        BoundaryAction::NoOp => {}
        BoundaryAction::InsertBreak => reporter.report(
            close.loc,
            messages.expected_before_close,
            &[],
            fix_closing.then(|| vec![TextEdit::insert_before(close, "\n")]),
        )?,
        BoundaryAction::RemoveBreak => reporter.report(
            close.loc,
            messages.unexpected_before_close,
            &[],
            fix_closing.then(|| vec![TextEdit::remove_range(last.end()..close.start())]),
        )?,
    }

    Ok(())
}

/// Policies resolved once per construct kind at rule construction.
///
/// Lookups never fail: a construct that was not resolved gets the fallback policy.
#[derive(Debug, Clone)]
pub struct PolicyTable<K: Ord, P> {
    fallback: P,
    policies: BTreeMap<K, P>,
}

impl<K: Ord + Copy, P> PolicyTable<K, P> {
    /// Resolve every construct in `constructs` with `resolve`
    pub fn build(constructs: impl IntoIterator<Item = K>, fallback: P, resolve: impl Fn(K) -> P) -> Self {
        let policies = constructs.into_iter().map(|k| (k, resolve(k))).collect();
        Self { fallback, policies }
    }

    pub fn get(&self, construct: K) -> &P {
        self.policies.get(&construct).unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout(n: usize, spans: bool, after: bool, before: bool) -> Layout {
        Layout {
            element_count: n,
            content_spans_lines: spans,
            break_after_open: after,
            break_before_close: before,
        }
    }

    fn all_policies() -> Vec<NewlinePolicy> {
        let options = [
            Some(NewlineOption::Style(NewlineStyle::Always)),
            Some(NewlineOption::Style(NewlineStyle::Never)),
            Some(NewlineOption::Object(NewlineObject {
                multiline: Some(true),
                ..Default::default()
            })),
            Some(NewlineOption::Object(NewlineObject {
                min_elements: Some(2),
                ..Default::default()
            })),
            Some(NewlineOption::Object(NewlineObject {
                multiline: Some(true),
                consistent: Some(true),
                ..Default::default()
            })),
            None,
        ];
        options
            .iter()
            .map(|o| NewlinePolicy::from_option(o.as_ref(), NewlinePolicy::CONSISTENT))
            .collect()
    }

    #[test]
    fn test_option_normalization() {
        assert_eq!(
            NewlinePolicy::from_option(Some(&NewlineOption::Style(NewlineStyle::Always)), NewlinePolicy::CONSISTENT),
            NewlinePolicy {
                multiline: false,
                min_elements: 0,
                consistent: false
            }
        );
        assert_eq!(NewlinePolicy::from_option(None, NewlinePolicy::CONSISTENT), NewlinePolicy::CONSISTENT);
        let object = NewlineOption::Object(NewlineObject {
            min_elements: Some(0),
            ..Default::default()
        });
        assert_eq!(
            NewlinePolicy::from_option(Some(&object), NewlinePolicy::CONSISTENT).min_elements,
            usize::MAX
        );
        let deprecated = NewlineOption::Object(NewlineObject {
            min_properties: Some(3),
            ..Default::default()
        });
        assert!(deprecated.uses_min_properties());
        assert_eq!(
            NewlinePolicy::from_option(Some(&deprecated), NewlinePolicy::CONSISTENT).min_elements,
            3
        );
    }

    #[test]
    fn test_option_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            option: NewlineOption,
        }
        let always: Wrapper = toml::from_str(r#"option = "always""#).unwrap();
        assert_eq!(always.option, NewlineOption::Style(NewlineStyle::Always));
        let object: Wrapper = toml::from_str("option = { multiline = true, min-elements = 3 }").unwrap();
        assert_eq!(
            object.option,
            NewlineOption::Object(NewlineObject {
                multiline: Some(true),
                min_elements: Some(3),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_always_inserts_missing_breaks() {
        let policy = NewlinePolicy::from_option(Some(&NewlineOption::Style(NewlineStyle::Always)), NewlinePolicy::CONSISTENT);
        let verdict = policy.evaluate(&layout(0, false, false, false));
        assert_eq!(verdict.opening, BoundaryAction::InsertBreak);
        assert_eq!(verdict.closing, BoundaryAction::InsertBreak);
    }

    #[test]
    fn test_never_removes_existing_breaks() {
        let policy = NewlinePolicy::from_option(Some(&NewlineOption::Style(NewlineStyle::Never)), NewlinePolicy::CONSISTENT);
        let verdict = policy.evaluate(&layout(3, true, true, false));
        assert_eq!(verdict.opening, BoundaryAction::RemoveBreak);
        assert_eq!(verdict.closing, BoundaryAction::NoOp);
    }

    #[test]
    fn test_multiline_requires_breaks_for_spanning_content() {
        let verdict = NewlinePolicy::MULTILINE.evaluate(&layout(2, true, false, true));
        assert_eq!(verdict.opening, BoundaryAction::InsertBreak);
        assert_eq!(verdict.closing, BoundaryAction::NoOp);
        // empty containers never need breaks under multiline
        let verdict = NewlinePolicy::MULTILINE.evaluate(&layout(0, true, true, true));
        assert_eq!(verdict.opening, BoundaryAction::RemoveBreak);
        assert_eq!(verdict.closing, BoundaryAction::RemoveBreak);
    }

    #[test]
    fn test_consistent_flags_only_the_differing_boundary() {
        let policy = NewlinePolicy::CONSISTENT;
        let verdict = policy.evaluate(&layout(1, false, true, false));
        assert_eq!(verdict.opening, BoundaryAction::RemoveBreak);
        assert_eq!(verdict.closing, BoundaryAction::NoOp);
        assert_eq!(
            policy.evaluate(&layout(1, true, true, true)),
            Verdict {
                opening: BoundaryAction::NoOp,
                closing: BoundaryAction::NoOp
            }
        );
    }

    #[test]
    fn test_options_resolve_overrides_over_base() {
        let options: NewlineOptions = toml::from_str(
            r#"
style = "always"
[overrides]
Second = "never"
Bogus = "never"
"#,
        )
        .unwrap();
        let warn_once = WarnOnce::new();
        let table = options.resolve("demo", &[(1, "First"), (2, "Second")], NewlinePolicy::CONSISTENT, &warn_once);
        assert_eq!(table.get(1).min_elements, 0);
        assert_eq!(table.get(2).min_elements, usize::MAX);
        assert!(!table.get(2).consistent);
        assert_eq!(warn_once.emitted().len(), 1);
    }

    #[test]
    fn test_options_without_base_use_default() {
        let options = NewlineOptions::default();
        assert_eq!(options.base(), None);
        let table = options.resolve("demo", &[(1, "First")], NewlinePolicy::MULTILINE, &WarnOnce::new());
        assert_eq!(*table.get(1), NewlinePolicy::MULTILINE);
    }

    #[test]
    fn test_policy_table_falls_back() {
        let table = PolicyTable::build([1, 2], 0, |k| k * 10);
        assert_eq!(*table.get(1), 10);
        assert_eq!(*table.get(2), 20);
        assert_eq!(*table.get(3), 0);
    }

    proptest! {
        #[test]
        fn test_consistent_mode_is_symmetric(n in 0usize..5, spans: bool, after: bool, before: bool, multiline: bool) {
            let policy = NewlinePolicy { multiline, min_elements: usize::MAX, consistent: true };
            let verdict = policy.evaluate(&layout(n, spans, after, before));
            let swapped = policy.evaluate(&layout(n, spans, before, after));
            prop_assert_eq!(verdict.opening, swapped.closing);
            prop_assert_eq!(verdict.closing, swapped.opening);
        }

        #[test]
        fn test_every_layout_has_one_consistent_verdict(n in 0usize..5, spans: bool, after: bool, before: bool) {
            for policy in all_policies() {
                let verdict = policy.evaluate(&layout(n, spans, after, before));
                // inserting is only ever asked where no break exists, removing only where one does
                for (action, has_break) in [(verdict.opening, after), (verdict.closing, before)] {
                    match action {
                        BoundaryAction::InsertBreak => prop_assert!(!has_break),
                        BoundaryAction::RemoveBreak => prop_assert!(has_break),
                        BoundaryAction::NoOp => {}
                    }
                }
                // applying the verdict yields a layout the policy accepts
                let apply = |action: BoundaryAction, has_break: bool| match action {
                    BoundaryAction::InsertBreak => true,
                    BoundaryAction::RemoveBreak => false,
                    BoundaryAction::NoOp => has_break,
                };
                let fixed = layout(
                    n,
                    spans,
                    apply(verdict.opening, after),
                    apply(verdict.closing, before),
                );
                let again = policy.evaluate(&fixed);
                prop_assert_eq!(again.opening, BoundaryAction::NoOp);
                prop_assert_eq!(again.closing, BoundaryAction::NoOp);
            }
        }
    }
}
