/// Rule member-delimiter-style: enforce a consistent delimiter between members of
/// interfaces and type literals
use crate::fix::{FixTracker, TextEdit};
use crate::lint_context::{LintContext, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::syntax::{NodeId, NodeKind, SourceLocation, Token};
use crate::utils::ast_utils::is_token_on_same_line;
use crate::utils::newline_policy::PolicyTable;
use crate::utils::warn_once::WarnOnce;

mod member_delimiter_style_config;
pub use member_delimiter_style_config::MemberDelimiterStyleConfig;
use member_delimiter_style_config::{DelimiterOverride, MultilineDelimiter, MultilineDetection};

const MESSAGES: MessageTable = &[
    ("unexpectedComma", "Unexpected separator (,)."),
    ("unexpectedSemi", "Unexpected separator (;)."),
    ("expectedComma", "Expected a comma."),
    ("expectedSemi", "Expected a semicolon."),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Container {
    Interface,
    TypeLiteral,
}

/// Resolved delimiter requirement for one layout of one container kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DelimiterPolicy {
    delimiter: MultilineDelimiter,
    require_last: bool,
}

impl DelimiterPolicy {
    /// Whether `delimiter` is what this policy wants after a member
    fn wants(&self, delimiter: MultilineDelimiter, is_last: bool) -> bool {
        if is_last && !self.require_last {
            return delimiter == MultilineDelimiter::None;
        }
        self.delimiter == delimiter
    }

    fn delimiter_text(&self) -> &'static str {
        match self.delimiter {
            MultilineDelimiter::Semi => ";",
            _ => ",",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContainerPolicy {
    multiline: DelimiterPolicy,
    singleline: DelimiterPolicy,
}

impl ContainerPolicy {
    fn resolve(config: &MemberDelimiterStyleConfig, over: Option<&DelimiterOverride>) -> Self {
        let multiline = over.and_then(|o| o.multiline).unwrap_or_default();
        let singleline = over.and_then(|o| o.singleline).unwrap_or_default();
        Self {
            multiline: DelimiterPolicy {
                delimiter: multiline.delimiter.unwrap_or(config.multiline.delimiter),
                require_last: multiline.require_last.unwrap_or(config.multiline.require_last),
            },
            singleline: DelimiterPolicy {
                delimiter: singleline.delimiter.unwrap_or(config.singleline.delimiter).into(),
                require_last: singleline.require_last.unwrap_or(config.singleline.require_last),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemberDelimiterStyle {
    multiline_detection: MultilineDetection,
    policies: PolicyTable<Container, ContainerPolicy>,
}

impl Default for MemberDelimiterStyle {
    fn default() -> Self {
        Self::from_config_struct(MemberDelimiterStyleConfig::default())
    }
}

impl MemberDelimiterStyle {
    pub fn from_config_struct(config: MemberDelimiterStyleConfig) -> Self {
        let base = ContainerPolicy::resolve(&config, None);
        let policies = PolicyTable::build([Container::Interface, Container::TypeLiteral], base, |container| {
            let over = match container {
                Container::Interface => config.overrides.interface.as_ref(),
                Container::TypeLiteral => config.overrides.type_literal.as_ref(),
            };
            ContainerPolicy::resolve(&config, over)
        });
        Self {
            multiline_detection: config.multiline_detection,
            policies,
        }
    }

    fn check_last_token(
        ctx: &LintContext,
        reporter: &mut Reporter,
        member: NodeId,
        policy: &DelimiterPolicy,
        is_last: bool,
    ) -> Result<(), LintError> {
        let Some(last_token) = ctx.last_token(ctx.node(member), TokenQuery::default()) else {
            return Ok(());
        };
        let wants_none = policy.wants(MultilineDelimiter::None, is_last);

        let (message_id, missing) = match last_token.value.as_str() {
            ";" if policy.wants(MultilineDelimiter::Comma, is_last) => ("expectedComma", false),
            ";" if wants_none => ("unexpectedSemi", false),
            "," if policy.wants(MultilineDelimiter::Semi, is_last) => ("expectedSemi", false),
            "," if wants_none => ("unexpectedComma", false),
            ";" | "," => return Ok(()),
            _ if policy.wants(MultilineDelimiter::Semi, is_last) => ("expectedSemi", true),
            _ if policy.wants(MultilineDelimiter::Comma, is_last) => ("expectedComma", true),
            _ => return Ok(()),
        };

        let edits = if wants_none {
            // removing the delimiter would glue a preceding comment to the next member
            if ctx.comments_before(last_token).is_empty() && ends_its_line(ctx, last_token) {
                Some(vec![
                    FixTracker::new(ctx.content)
                        .retain_surrounding_tokens(ctx, last_token)
                        .remove(last_token)?,
                ])
            } else {
                None
            }
        } else if missing {
            Some(vec![TextEdit::insert_after(last_token, policy.delimiter_text())])
        } else {
            Some(vec![TextEdit::replace(last_token, policy.delimiter_text())])
        };

        let end = last_token.loc.end;
        reporter.report(SourceLocation::new(end, end), message_id, &[], edits)
    }

    fn check_member_separator_style(
        &self,
        ctx: &LintContext,
        reporter: &mut Reporter,
        id: NodeId,
    ) -> Result<(), LintError> {
        let node = ctx.node(id);
        let (container, members) = match &node.kind {
            NodeKind::TSInterfaceBody { body } => (Container::Interface, body),
            NodeKind::TSTypeLiteral { members } => (Container::TypeLiteral, members),
            _ => return Ok(()),
        };

        let mut single_line = node.loc.is_single_line();
        if self.multiline_detection == MultilineDetection::LastMember
            && !single_line
            && let Some(last_member) = members.last()
            && ctx.node(*last_member).loc.end.line == node.loc.end.line
        {
            single_line = true;
        }

        let container_policy = self.policies.get(container);
        let policy = if single_line {
            &container_policy.singleline
        } else {
            &container_policy.multiline
        };
        for (index, member) in members.iter().enumerate() {
            Self::check_last_token(ctx, reporter, *member, policy, index + 1 == members.len())?;
        }
        Ok(())
    }
}

impl Rule for MemberDelimiterStyle {
    fn name(&self) -> &'static str {
        "member-delimiter-style"
    }

    fn description(&self) -> &'static str {
        "Require a specific member delimiter style for interfaces and type literals"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        for id in ctx.ast.preorder() {
            self.check_member_separator_style(ctx, &mut reporter, id)?;
        }
        Ok(reporter.into_warnings())
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('{')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Delimiters
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        crate::rule_config_serde::default_config_section::<MemberDelimiterStyleConfig>()
    }

    fn from_config(config: &crate::config::Config, _warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<MemberDelimiterStyleConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}

/// Whether nothing but comments follows `delimiter` before the next line or the closing brace
fn ends_its_line(ctx: &LintContext, delimiter: &Token) -> bool {
    let mut current = delimiter;
    while let Some(next) = ctx.token_after(current, TokenQuery::with_comments()) {
        if !is_token_on_same_line(delimiter, next) {
            return true;
        }
        if !next.is_comment() {
            return next.value == "}";
        }
        current = next;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::member_delimiter_style_config::{DelimiterOverrides, MultilineOptions, MultilineOverride};
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(rule: &MemberDelimiterStyle, content: &str) -> Vec<&'static str> {
        let ctx = LintContext::new(content).unwrap();
        rule.check(&ctx).unwrap().iter().map(|w| w.message_id).collect()
    }

    fn fix(rule: &MemberDelimiterStyle, content: &str) -> String {
        let ctx = LintContext::new(content).unwrap();
        rule.fix(&ctx).unwrap()
    }

    fn with_multiline(delimiter: MultilineDelimiter, require_last: bool) -> MemberDelimiterStyle {
        MemberDelimiterStyle::from_config_struct(MemberDelimiterStyleConfig {
            multiline: MultilineOptions {
                delimiter,
                require_last,
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_missing_semicolons() {
        let rule = MemberDelimiterStyle::default();
        let content = "interface Foo {\nname: string\nage: number\n}";
        assert_eq!(check(&rule, content), vec!["expectedSemi", "expectedSemi"]);
        assert_eq!(fix(&rule, content), "interface Foo {\nname: string;\nage: number;\n}");
    }

    #[test]
    fn test_zero_width_location_after_member() {
        let rule = MemberDelimiterStyle::default();
        let ctx = LintContext::new("interface Foo {\n  a: string\n}").unwrap();
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!((warnings[0].line, warnings[0].column), (2, 12));
        assert_eq!((warnings[0].end_line, warnings[0].end_column), (2, 12));
    }

    #[test]
    fn test_wrong_delimiter_is_replaced() {
        let rule = MemberDelimiterStyle::default();
        let content = "type T = {\n  a: string,\n  b(): void,\n};";
        assert_eq!(check(&rule, content), vec!["expectedSemi", "expectedSemi"]);
        assert_eq!(fix(&rule, content), "type T = {\n  a: string;\n  b(): void;\n};");

        let rule = with_multiline(MultilineDelimiter::Comma, true);
        assert_eq!(fix(&rule, "interface I {\n  a: string;\n  b: number\n}"), "interface I {\n  a: string,\n  b: number,\n}");
    }

    #[test]
    fn test_single_line_last_member() {
        let rule = MemberDelimiterStyle::default();
        assert!(check(&rule, "type T = { a: string; b: number };").is_empty());
        let content = "type T = { a: string; b: number; };";
        assert_eq!(check(&rule, content), vec!["unexpectedSemi"]);
        assert_eq!(fix(&rule, content), "type T = { a: string; b: number };");
        assert_eq!(check(&rule, "type T = { a: string, b: number };"), vec!["expectedSemi"]);
    }

    #[test]
    fn test_none_delimiter() {
        let rule = with_multiline(MultilineDelimiter::None, true);
        let content = "interface I {\n  a: string;\n  b: number;\n}";
        assert_eq!(check(&rule, content), vec!["unexpectedSemi", "unexpectedSemi"]);
        assert!(check(&rule, "interface I {\n  a: string\n  b: number\n}").is_empty());
    }

    #[test]
    fn test_no_removal_fix_after_comment() {
        let rule = with_multiline(MultilineDelimiter::None, true);
        let ctx = LintContext::new("interface I {\n  a: string /* why */;\n}").unwrap();
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].fix.is_none());
    }

    #[test]
    fn test_no_removal_fix_when_code_follows_on_the_line() {
        let rule = with_multiline(MultilineDelimiter::None, false);
        let content = "interface I {\n  a: string; b: number\n}";
        let ctx = LintContext::new(content).unwrap();
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message_id, "unexpectedSemi");
        assert!(warnings[0].fix.is_none());
        assert_eq!(fix(&rule, content), content);

        let content = "interface I {\n  a: string; // note\n  b: number; /* end */ }";
        assert_eq!(check(&rule, content), vec!["unexpectedSemi", "unexpectedSemi"]);
        assert_eq!(fix(&rule, content), "interface I {\n  a: string // note\n  b: number /* end */ }");
    }

    #[test]
    fn test_last_member_detection() {
        let rule = MemberDelimiterStyle::from_config_struct(MemberDelimiterStyleConfig {
            multiline_detection: MultilineDetection::LastMember,
            ..Default::default()
        });
        // the closing brace shares the last member's line, so single-line options apply
        assert!(check(&rule, "type T = {\n  a: string;\n  b: number };").is_empty());
        let rule = MemberDelimiterStyle::default();
        assert_eq!(check(&rule, "type T = {\n  a: string;\n  b: number };"), vec!["expectedSemi"]);
    }

    #[test]
    fn test_overrides_merge_with_base() {
        let rule = MemberDelimiterStyle::from_config_struct(MemberDelimiterStyleConfig {
            overrides: DelimiterOverrides {
                interface: Some(DelimiterOverride {
                    multiline: Some(MultilineOverride {
                        delimiter: Some(MultilineDelimiter::Comma),
                        require_last: None,
                    }),
                    singleline: None,
                }),
                type_literal: None,
            },
            ..Default::default()
        });
        assert_eq!(check(&rule, "interface I {\n  a: string\n}"), vec!["expectedComma"]);
        assert_eq!(check(&rule, "type T = {\n  a: string\n};"), vec!["expectedSemi"]);
    }
}
