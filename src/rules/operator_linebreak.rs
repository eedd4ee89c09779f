/// Rule operator-linebreak: enforce consistent line breaks around operators
use crate::fix::TextEdit;
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::syntax::{NodeId, NodeKind, Spanned, Token, TokenKind};
use crate::utils::ast_utils::{LINEBREAK_MATCHER, is_token_on_same_line};
use crate::utils::warn_once::WarnOnce;
use std::collections::BTreeMap;

mod operator_linebreak_config;
pub use operator_linebreak_config::{LinebreakStyle, OperatorLinebreakConfig, OperatorStyle};

const MESSAGES: MessageTable = &[
    (
        "operatorAtBeginning",
        "'{{operator}}' should be placed at the beginning of the line.",
    ),
    ("operatorAtEnd", "'{{operator}}' should be placed at the end of the line."),
    ("badLinebreak", "Bad line breaking before and after '{{operator}}'."),
    (
        "noLinebreak",
        "There should be no line break before or after '{{operator}}'.",
    ),
];

#[derive(Debug, Clone)]
pub struct OperatorLinebreak {
    global: OperatorStyle,
    overrides: BTreeMap<String, OperatorStyle>,
}

impl Default for OperatorLinebreak {
    fn default() -> Self {
        Self::from_config_struct(OperatorLinebreakConfig::default())
    }
}

impl OperatorLinebreak {
    pub fn new(style: LinebreakStyle) -> Self {
        Self::from_config_struct(OperatorLinebreakConfig {
            style: Some(style),
            ..Default::default()
        })
    }

    pub fn from_config_struct(config: OperatorLinebreakConfig) -> Self {
        let (global, overrides) = config.resolve();
        Self { global, overrides }
    }

    /// Edit moving `operator` to the side `style` wants, or `None` when comments make
    /// that unsafe or nothing would change
    fn fix_for(ctx: &LintContext, operator: &Token, style: OperatorStyle) -> Result<Option<TextEdit>, LintError> {
        let before = ctx
            .token_before(operator, TokenQuery::default())
            .required("a token before the operator")?;
        let after = ctx
            .token_after(operator, TokenQuery::default())
            .required("a token after the operator")?;
        let text_before = ctx.text_between(before, operator);
        let text_after = ctx.text_between(operator, after);
        let break_before = !is_token_on_same_line(before, operator);
        let break_after = !is_token_on_same_line(operator, after);

        let (new_before, mut new_after) = if break_before != break_after && style != OperatorStyle::None {
            let comment_before = ctx
                .token_before(operator, TokenQuery::with_comments())
                .is_some_and(|t| !t.same(before));
            let comment_after = ctx
                .token_after(operator, TokenQuery::with_comments())
                .is_some_and(|t| !t.same(after));
            if comment_before && comment_after {
                return Ok(None);
            }
            // one break on the wrong side: swap the text around the operator
            (text_after.to_string(), text_before.to_string())
        } else {
            let new_before = if style == OperatorStyle::Before || !text_before.trim().is_empty() {
                text_before.to_string()
            } else {
                LINEBREAK_MATCHER.replace_all(text_before, "").into_owned()
            };
            let new_after = if style == OperatorStyle::After || !text_after.trim().is_empty() {
                text_after.to_string()
            } else {
                LINEBREAK_MATCHER.replace_all(text_after, "").into_owned()
            };
            if new_before == text_before && new_after == text_after {
                return Ok(None);
            }
            (new_before, new_after)
        };

        // keep `a +\n+b` from turning into `a ++b`
        if new_after.is_empty()
            && after.kind == TokenKind::Punctuator
            && matches!(operator.value.as_str(), "+" | "-")
            && after.value == operator.value
        {
            new_after.push(' ');
        }

        Ok(Some(TextEdit::replace_range(
            before.end()..after.start(),
            format!("{new_before}{}{new_after}", operator.value),
        )))
    }

    fn validate_node(
        &self,
        ctx: &LintContext,
        reporter: &mut Reporter,
        right_side: NodeId,
        operator: &str,
    ) -> Result<(), LintError> {
        let is_operator = |token: &Token| token.value == operator;
        let operator_token = ctx
            .token_before(ctx.node(right_side), TokenQuery::filter(&is_operator))
            .required("the operator token")?;
        let left = ctx
            .token_before(operator_token, TokenQuery::default())
            .required("a token before the operator")?;
        let right = ctx
            .token_after(operator_token, TokenQuery::default())
            .required("a token after the operator")?;

        let style_override = self.overrides.get(operator).copied();
        let style = style_override.unwrap_or(self.global);
        let left_joined = is_token_on_same_line(left, operator_token);
        let right_joined = is_token_on_same_line(operator_token, right);

        let message_id = if left_joined && right_joined {
            return Ok(());
        } else if style_override != Some(OperatorStyle::Ignore) && !left_joined && !right_joined {
            "badLinebreak"
        } else if style == OperatorStyle::Before && left_joined {
            "operatorAtBeginning"
        } else if style == OperatorStyle::After && right_joined {
            "operatorAtEnd"
        } else if style == OperatorStyle::None {
            "noLinebreak"
        } else {
            return Ok(());
        };

        let edit = Self::fix_for(ctx, operator_token, style)?;
        reporter.report(
            operator_token.loc,
            message_id,
            &[("operator", operator.to_string())],
            edit.map(|edit| vec![edit]),
        )
    }

    fn check_node(&self, ctx: &LintContext, reporter: &mut Reporter, id: NodeId) -> Result<(), LintError> {
        match &ctx.node(id).kind {
            NodeKind::BinaryExpression { operator, right, .. }
            | NodeKind::LogicalExpression { operator, right, .. }
            | NodeKind::AssignmentExpression { operator, right, .. } => {
                self.validate_node(ctx, reporter, *right, operator)
            }
            NodeKind::VariableDeclarator { init: Some(init), .. } => self.validate_node(ctx, reporter, *init, "="),
            NodeKind::PropertyDefinition { value: Some(value), .. } => self.validate_node(ctx, reporter, *value, "="),
            NodeKind::TSEnumMember {
                initializer: Some(initializer),
                ..
            } => self.validate_node(ctx, reporter, *initializer, "="),
            NodeKind::TSTypeAliasDeclaration { type_annotation, .. } => {
                self.validate_node(ctx, reporter, *type_annotation, "=")
            }
            NodeKind::ConditionalExpression {
                consequent, alternate, ..
            } => {
                self.validate_node(ctx, reporter, *consequent, "?")?;
                self.validate_node(ctx, reporter, *alternate, ":")
            }
            NodeKind::TSUnionType { types } => {
                for ty in types.iter().skip(1) {
                    self.validate_node(ctx, reporter, *ty, "|")?;
                }
                Ok(())
            }
            NodeKind::TSIntersectionType { types } => {
                for ty in types.iter().skip(1) {
                    self.validate_node(ctx, reporter, *ty, "&")?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Rule for OperatorLinebreak {
    fn name(&self) -> &'static str {
        "operator-linebreak"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent linebreak style for operators"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        for id in ctx.ast.preorder() {
            self.check_node(ctx, &mut reporter, id)?;
        }
        Ok(reporter.into_warnings())
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Operators
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        crate::rule_config_serde::default_config_section::<OperatorLinebreakConfig>()
    }

    fn from_config(config: &crate::config::Config, _warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<OperatorLinebreakConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(rule: &OperatorLinebreak, content: &str) -> Vec<&'static str> {
        let ctx = LintContext::new(content).unwrap();
        rule.check(&ctx).unwrap().iter().map(|w| w.message_id).collect()
    }

    fn fix(rule: &OperatorLinebreak, content: &str) -> String {
        let ctx = LintContext::new(content).unwrap();
        rule.fix(&ctx).unwrap()
    }

    #[test]
    fn test_after_is_default() {
        let rule = OperatorLinebreak::default();
        assert!(check(&rule, "const a = b +\n  c;").is_empty());
        let content = "const a = b\n  + c;";
        assert_eq!(check(&rule, content), vec!["operatorAtEnd"]);
        assert_eq!(fix(&rule, content), "const a = b +\n  c;");

        let ctx = LintContext::new(content).unwrap();
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings[0].message, "'+' should be placed at the end of the line.");
    }

    #[test]
    fn test_default_ternary_is_before() {
        let rule = OperatorLinebreak::default();
        assert!(check(&rule, "const a = b\n  ? c\n  : d;").is_empty());
        assert_eq!(
            check(&rule, "const a = b ?\n  c :\n  d;"),
            vec!["operatorAtBeginning", "operatorAtBeginning"]
        );
    }

    #[test]
    fn test_before() {
        let rule = OperatorLinebreak::new(LinebreakStyle::Before);
        let content = "if (a &&\n    b) {}";
        assert_eq!(check(&rule, content), vec!["operatorAtBeginning"]);
        assert_eq!(fix(&rule, content), "if (a\n    && b) {}");
    }

    #[test]
    fn test_lone_operator() {
        let rule = OperatorLinebreak::default();
        let content = "x = a\n||\nb;";
        assert_eq!(check(&rule, content), vec!["badLinebreak"]);
        assert_eq!(fix(&rule, content), "x = a||\nb;");
    }

    #[test]
    fn test_none() {
        let rule = OperatorLinebreak::new(LinebreakStyle::None);
        let content = "x =\n  y;";
        assert_eq!(check(&rule, content), vec!["noLinebreak"]);
        assert_eq!(fix(&rule, content), "x =  y;");
    }

    #[test]
    fn test_ignore_override() {
        let mut config = OperatorLinebreakConfig {
            style: Some(LinebreakStyle::Before),
            ..Default::default()
        };
        config.overrides.insert("+".to_string(), OperatorStyle::Ignore);
        let rule = OperatorLinebreak::from_config_struct(config);
        assert!(check(&rule, "x = a +\n  b;").is_empty());
        assert!(check(&rule, "x = a\n+\nb;").is_empty());
        assert_eq!(check(&rule, "x = a -\n  b;"), vec!["operatorAtBeginning"]);
    }

    #[test]
    fn test_unary_sign_keeps_a_space() {
        let rule = OperatorLinebreak::new(LinebreakStyle::None);
        assert_eq!(fix(&rule, "x = a +\n+b;"), "x = a + +b;");
    }

    #[test]
    fn test_comments_on_both_sides_block_the_swap() {
        let rule = OperatorLinebreak::default();
        let ctx = LintContext::new("x = a /* l */\n+ /* r */ b;").unwrap();
        let warnings = rule.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].fix.is_none());
    }

    #[test]
    fn test_type_operators() {
        let rule = OperatorLinebreak::new(LinebreakStyle::Before);
        assert_eq!(
            check(&rule, "type T =\n  | A |\n  B;"),
            vec!["operatorAtBeginning", "operatorAtBeginning"]
        );
        assert_eq!(check(&rule, "enum E { A =\n  1 }"), vec!["operatorAtBeginning"]);
        assert_eq!(check(&rule, "class C { x =\n  1; }"), vec!["operatorAtBeginning"]);
    }
}
