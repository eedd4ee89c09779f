/// Rule comma-style: enforce consistent comma placement in multi-line lists
use crate::fix::TextEdit;
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::syntax::{NodeId, NodeKind, Spanned, Token, TokenKind};
use crate::utils::ast_utils::{LINEBREAK_MATCHER, is_comma_token, is_not_closing_paren_token, is_token_on_same_line};
use crate::utils::warn_once::WarnOnce;

mod comma_style_config;
pub use comma_style_config::{CommaStyleConfig, CommaStyleKind};

const MESSAGES: MessageTable = &[
    ("unexpectedLineBeforeAndAfterComma", "Bad line breaking before and after ','."),
    ("expectedCommaFirst", "',' should be placed first."),
    ("expectedCommaLast", "',' should be placed last."),
];

/// How a misplaced comma is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Keep the comma where it is and pull the surrounding lines together
    Between,
    First,
    Last,
}

impl From<CommaStyleKind> for Placement {
    fn from(style: CommaStyleKind) -> Self {
        match style {
            CommaStyleKind::First => Placement::First,
            CommaStyleKind::Last => Placement::Last,
        }
    }
}

/// A comma-separated list: its items (`None` for array holes) and whether it is an
/// array literal, whose trailing comma is also checked
struct CommaList {
    items: Vec<Option<NodeId>>,
    array_literal: bool,
    type_annotation: Option<NodeId>,
}

impl CommaList {
    fn of(kind: &NodeKind) -> Option<Self> {
        let plain = |items: &[NodeId]| Self {
            items: items.iter().copied().map(Some).collect(),
            array_literal: false,
            type_annotation: None,
        };
        let list = match kind {
            NodeKind::VariableDeclaration { declarations: items, .. }
            | NodeKind::ObjectExpression { properties: items }
            | NodeKind::ObjectPattern { properties: items, .. }
            | NodeKind::ArrowFunctionExpression { params: items, .. }
            | NodeKind::CallExpression { arguments: items, .. }
            | NodeKind::NewExpression { arguments: items, .. }
            | NodeKind::ImportDeclaration { specifiers: items, .. }
            | NodeKind::ExportNamedDeclaration { specifiers: items, .. }
            | NodeKind::SequenceExpression { expressions: items }
            | NodeKind::TSEnumDeclaration { members: items, .. }
            | NodeKind::TSTupleType { element_types: items }
            | NodeKind::TSTypeParameterDeclaration { params: items }
            | NodeKind::TSTypeParameterInstantiation { params: items }
            | NodeKind::TSFunctionType { params: items, .. }
            | NodeKind::TSMethodSignature { params: items, .. } => plain(items),
            NodeKind::FunctionDeclaration(function) | NodeKind::FunctionExpression(function) => plain(&function.params),
            NodeKind::ArrayExpression { elements } => Self {
                items: elements.clone(),
                array_literal: true,
                type_annotation: None,
            },
            NodeKind::ArrayPattern {
                elements,
                type_annotation,
            } => Self {
                items: elements.clone(),
                array_literal: true,
                type_annotation: *type_annotation,
            },
            _ => return None,
        };
        Some(list)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommaStyle {
    config: CommaStyleConfig,
}

impl CommaStyle {
    pub fn new(style: CommaStyleKind) -> Self {
        Self {
            config: CommaStyleConfig {
                style,
                ..Default::default()
            },
        }
    }

    pub fn from_config_struct(config: CommaStyleConfig) -> Self {
        Self { config }
    }

    /// Text replacing everything from the end of the previous item to the start of the
    /// current one
    fn replaced_text(placement: Placement, text: &str) -> String {
        match placement {
            Placement::Between => format!(",{}", LINEBREAK_MATCHER.replace(text, "")),
            Placement::First => format!("{text},"),
            Placement::Last => format!(",{text}"),
        }
    }

    fn fix_for(ctx: &LintContext, placement: Placement, previous: &Token, comma: &Token, current: &Token) -> TextEdit {
        let text = format!(
            "{}{}",
            ctx.text_between(previous, comma),
            ctx.text_between(comma, current)
        );
        TextEdit::replace_range(previous.end()..current.start(), Self::replaced_text(placement, &text))
    }

    fn validate_comma_item_spacing(
        &self,
        ctx: &LintContext,
        reporter: &mut Reporter,
        previous: &Token,
        comma: &Token,
        current: &Token,
    ) -> Result<(), LintError> {
        let comma_joins_current = is_token_on_same_line(comma, current);
        let comma_joins_previous = is_token_on_same_line(previous, comma);

        if comma_joins_current && comma_joins_previous {
            return Ok(());
        }

        if !comma_joins_current && !comma_joins_previous {
            // a block comment right after the comma keeps it on its line
            let trailing_block_comment = ctx
                .comments_after(comma)
                .first()
                .is_some_and(|comment| comment.kind == TokenKind::BlockComment && is_token_on_same_line(comma, *comment));
            let placement = if trailing_block_comment {
                self.config.style.into()
            } else {
                Placement::Between
            };
            return reporter.report(
                comma.loc,
                "unexpectedLineBeforeAndAfterComma",
                &[],
                Some(vec![Self::fix_for(ctx, placement, previous, comma, current)]),
            );
        }

        match self.config.style {
            CommaStyleKind::First if !comma_joins_current => reporter.report(
                comma.loc,
                "expectedCommaFirst",
                &[],
                Some(vec![Self::fix_for(ctx, Placement::First, previous, comma, current)]),
            ),
            CommaStyleKind::Last if comma_joins_current => reporter.report(
                comma.loc,
                "expectedCommaLast",
                &[],
                Some(vec![Self::fix_for(ctx, Placement::Last, previous, comma, current)]),
            ),
            _ => Ok(()),
        }
    }

    fn validate_comma(&self, ctx: &LintContext, reporter: &mut Reporter, id: NodeId) -> Result<(), LintError> {
        let node = ctx.node(id);
        let Some(list) = CommaList::of(&node.kind) else {
            return Ok(());
        };
        if self.config.is_exception(node.type_name()) || (list.items.len() < 2 && !list.array_literal) {
            return Ok(());
        }

        let mut previous = ctx
            .first_token(node, TokenQuery::default())
            .required("a first token of the list")?;
        for item in &list.items {
            let (comma, current) = match item {
                Some(item) => {
                    let item = ctx.node(*item);
                    (
                        ctx.token_before(item, TokenQuery::default())
                            .required("a token before the list item")?,
                        ctx.first_token(item, TokenQuery::default())
                            .required("a first token of the list item")?,
                    )
                }
                None => (
                    previous,
                    ctx.token_after(previous, TokenQuery::default())
                        .required("a token after the array hole")?,
                ),
            };

            if is_comma_token(comma) {
                self.validate_comma_item_spacing(ctx, reporter, previous, comma, current)?;
            }

            previous = match item {
                Some(item) => match ctx.token_after(ctx.node(*item), TokenQuery::filter(&is_not_closing_paren_token)) {
                    Some(after) => ctx
                        .token_before(after, TokenQuery::default())
                        .required("a token ending the list item")?,
                    None => ctx.tokens.last().required("a last token")?,
                },
                None => current,
            };
        }

        if list.array_literal {
            let last = match list.type_annotation {
                Some(annotation) => ctx.token_before(ctx.node(annotation), TokenQuery::default()),
                None => ctx.last_token(node, TokenQuery::default()),
            }
            .required("a closing bracket")?;
            let before_last = ctx
                .token_before(last, TokenQuery::default())
                .required("a token before the closing bracket")?;
            if is_comma_token(before_last) {
                let before_comma = ctx
                    .token_before(before_last, TokenQuery::default())
                    .required("a token before the trailing comma")?;
                self.validate_comma_item_spacing(ctx, reporter, before_comma, before_last, last)?;
            }
        }
        Ok(())
    }
}

impl Rule for CommaStyle {
    fn name(&self) -> &'static str {
        "comma-style"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent comma style"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        for id in ctx.ast.preorder() {
            self.validate_comma(ctx, &mut reporter, id)?;
        }
        Ok(reporter.into_warnings())
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains(',')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Commas
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        crate::rule_config_serde::default_config_section::<CommaStyleConfig>()
    }

    fn from_config(config: &crate::config::Config, _warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<CommaStyleConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn check(rule: &CommaStyle, content: &str) -> Vec<&'static str> {
        let ctx = LintContext::new(content).unwrap();
        rule.check(&ctx).unwrap().iter().map(|w| w.message_id).collect()
    }

    fn fix(rule: &CommaStyle, content: &str) -> String {
        let ctx = LintContext::new(content).unwrap();
        rule.fix(&ctx).unwrap()
    }

    #[test]
    fn test_leading_comma_in_declaration() {
        let rule = CommaStyle::default();
        let content = "var foo = 1\n,bar = 2;";
        assert_eq!(check(&rule, content), vec!["expectedCommaLast"]);
        assert_eq!(fix(&rule, content), "var foo = 1,\nbar = 2;");
    }

    #[test]
    fn test_comma_first() {
        let rule = CommaStyle::new(CommaStyleKind::First);
        let content = "const a = {\n  b: 1,\n  c: 2\n};";
        assert_eq!(check(&rule, content), vec!["expectedCommaFirst"]);
        assert_eq!(fix(&rule, content), "const a = {\n  b: 1\n  ,c: 2\n};");
        assert!(check(&rule, "const a = {\n  b: 1\n  , c: 2\n};").is_empty());
    }

    #[test]
    fn test_comma_on_its_own_line() {
        let rule = CommaStyle::default();
        let content = "const a = [\n  1\n  ,\n  2\n];";
        assert_eq!(check(&rule, content), vec!["unexpectedLineBeforeAndAfterComma"]);
        // only the first line break is dropped
        assert_eq!(fix(&rule, content), "const a = [\n  1,  \n  2\n];");
    }

    #[test]
    fn test_single_line_lists_pass() {
        let rule = CommaStyle::default();
        assert!(check(&rule, "const a = [1, 2, 3], b = { c: 1, d: 2 };").is_empty());
    }

    #[test]
    fn test_array_holes_and_trailing_comma() {
        let rule = CommaStyle::default();
        assert!(check(&rule, "const a = [,\n  1,\n];").is_empty());
        let content = "const a = [\n  1\n  ,];";
        assert_eq!(check(&rule, content), vec!["expectedCommaLast"]);
        assert_eq!(fix(&rule, content), "const a = [\n  1,\n  ];");
    }

    #[test]
    fn test_default_exceptions() {
        let rule = CommaStyle::default();
        assert!(check(&rule, "f(a\n, b);").is_empty());
        assert!(check(&rule, "function g(a\n, b) {}").is_empty());

        let mut exceptions = BTreeMap::new();
        exceptions.insert("CallExpression".to_string(), false);
        exceptions.insert("VariableDeclaration".to_string(), true);
        let rule = CommaStyle::from_config_struct(CommaStyleConfig {
            style: CommaStyleKind::Last,
            exceptions,
        });
        assert_eq!(check(&rule, "f(a\n, b);"), vec!["expectedCommaLast"]);
        assert!(check(&rule, "var a = 1\n, b = 2;").is_empty());
    }

    #[test]
    fn test_typescript_lists() {
        let rule = CommaStyle::default();
        assert_eq!(check(&rule, "enum E {\n  A\n  , B\n}"), vec!["expectedCommaLast"]);
        assert_eq!(check(&rule, "type T = [\n  string\n  , number\n];"), vec!["expectedCommaLast"]);
    }

    #[test]
    fn test_block_comment_after_comma_keeps_style_fix() {
        let rule = CommaStyle::default();
        let content = "var a = 1\n, /* c */\nb = 2;";
        assert_eq!(check(&rule, content), vec!["unexpectedLineBeforeAndAfterComma"]);
        assert_eq!(fix(&rule, content), "var a = 1,\n /* c */\nb = 2;");
    }
}
