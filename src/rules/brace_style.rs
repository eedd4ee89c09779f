/// Rule brace-style: enforce a consistent brace style for blocks
///
/// Opening braces of blocks, class bodies, switch statements, interfaces and enums
/// must follow the configured style, as must the closing brace before `else`,
/// `catch` and `finally`.
use crate::fix::{TextEdit, safe_replace_between};
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::syntax::{NodeId, NodeKind, Token};
use crate::utils::ast_utils::{is_opening_brace_token, is_token_on_same_line};
use crate::utils::warn_once::WarnOnce;

mod brace_style_config;
pub use brace_style_config::{BraceStyleConfig, BraceStyleKind};

const MESSAGES: MessageTable = &[
    (
        "nextLineOpen",
        "Opening curly brace does not appear on the same line as controlling statement.",
    ),
    (
        "sameLineOpen",
        "Opening curly brace appears on the same line as controlling statement.",
    ),
    ("blockSameLine", "Statement inside of curly braces should be on next line."),
    (
        "nextLineClose",
        "Closing curly brace does not appear on the same line as the subsequent block.",
    ),
    (
        "singleLineClose",
        "Closing curly brace should be on the same line as opening curly brace or on the line after the previous block.",
    ),
    (
        "sameLineClose",
        "Closing curly brace appears on the same line as the subsequent block.",
    ),
];

#[derive(Debug, Clone, Default)]
pub struct BraceStyle {
    config: BraceStyleConfig,
}

impl BraceStyle {
    pub fn new(style: BraceStyleKind, allow_single_line: bool) -> Self {
        Self {
            config: BraceStyleConfig {
                style,
                allow_single_line,
            },
        }
    }

    pub fn from_config_struct(config: BraceStyleConfig) -> Self {
        Self { config }
    }

    /// Replace the line break between two tokens with a space, unless a comment is in the way
    fn join_lines(ctx: &LintContext, left: &Token, right: &Token) -> Option<Vec<TextEdit>> {
        safe_replace_between(ctx, left, right, " ").map(|edit| vec![edit])
    }

    fn validate_curly_pair(
        &self,
        ctx: &LintContext,
        reporter: &mut Reporter,
        open: &Token,
        close: &Token,
    ) -> Result<(), LintError> {
        let before_open = ctx
            .token_before(open, TokenQuery::default())
            .required("a token before the opening brace")?;
        let before_close = ctx
            .token_before(close, TokenQuery::default())
            .required("a token before the closing brace")?;
        let after_open = ctx
            .token_after(open, TokenQuery::default())
            .required("a token after the opening brace")?;
        let single_line_exception = self.config.allow_single_line && is_token_on_same_line(open, close);
        let allman = self.config.style == BraceStyleKind::Allman;

        if !allman && !is_token_on_same_line(before_open, open) {
            reporter.report(
                open.loc,
                "nextLineOpen",
                &[],
                Self::join_lines(ctx, before_open, open),
            )?;
        }

        if allman && is_token_on_same_line(before_open, open) && !single_line_exception {
            reporter.report(
                open.loc,
                "sameLineOpen",
                &[],
                Some(vec![TextEdit::insert_before(open, "\n")]),
            )?;
        }

        if is_token_on_same_line(open, after_open) && !after_open.same(close) && !single_line_exception {
            reporter.report(
                open.loc,
                "blockSameLine",
                &[],
                Some(vec![TextEdit::insert_after(open, "\n")]),
            )?;
        }

        if is_token_on_same_line(before_close, close) && !before_close.same(open) && !single_line_exception {
            reporter.report(
                close.loc,
                "singleLineClose",
                &[],
                Some(vec![TextEdit::insert_before(close, "\n")]),
            )?;
        }

        Ok(())
    }

    /// Check the closing brace in front of `else`, `catch` or `finally`
    fn validate_curly_before_keyword(
        &self,
        ctx: &LintContext,
        reporter: &mut Reporter,
        curly: &Token,
    ) -> Result<(), LintError> {
        let keyword = ctx
            .token_after(curly, TokenQuery::default())
            .required("a keyword after the closing brace")?;
        let one_true_brace = self.config.style == BraceStyleKind::OneTrueBrace;

        if one_true_brace && !is_token_on_same_line(curly, keyword) {
            reporter.report(curly.loc, "nextLineClose", &[], Self::join_lines(ctx, curly, keyword))?;
        }

        if !one_true_brace && is_token_on_same_line(curly, keyword) {
            reporter.report(
                curly.loc,
                "sameLineClose",
                &[],
                Some(vec![TextEdit::insert_after(curly, "\n")]),
            )?;
        }

        Ok(())
    }

    fn validate_node_braces(&self, ctx: &LintContext, reporter: &mut Reporter, id: NodeId) -> Result<(), LintError> {
        let node = ctx.node(id);
        let first = || ctx.first_token(node, TokenQuery::default()).required("a first token");
        let last = || ctx.last_token(node, TokenQuery::default()).required("a last token");

        match &node.kind {
            NodeKind::BlockStatement { .. } => {
                let parent_is_list = ctx
                    .ast
                    .parent_node(id)
                    .is_some_and(|parent| parent.kind.is_statement_list_parent());
                if !parent_is_list {
                    self.validate_curly_pair(ctx, reporter, first()?, last()?)?;
                }
            }
            NodeKind::ClassBody { .. } | NodeKind::TSInterfaceBody { .. } => {
                self.validate_curly_pair(ctx, reporter, first()?, last()?)?;
            }
            NodeKind::SwitchStatement { cases, .. } => {
                let close = last()?;
                let open = match cases.first() {
                    Some(case) => ctx.token_before(ctx.node(*case), TokenQuery::default()),
                    None => ctx.token_before(close, TokenQuery::default()),
                }
                .required("the opening brace of a switch")?;
                self.validate_curly_pair(ctx, reporter, open, close)?;
            }
            NodeKind::TSEnumDeclaration { id: name, .. } => {
                let open = ctx
                    .token_after(ctx.node(*name), TokenQuery::filter(&is_opening_brace_token))
                    .required("the opening brace of an enum")?;
                self.validate_curly_pair(ctx, reporter, open, last()?)?;
            }
            NodeKind::IfStatement {
                consequent,
                alternate: Some(_),
                ..
            } => {
                let consequent = ctx.node(*consequent);
                if matches!(consequent.kind, NodeKind::BlockStatement { .. }) {
                    let curly = ctx
                        .last_token(consequent, TokenQuery::default())
                        .required("the closing brace of an if block")?;
                    self.validate_curly_before_keyword(ctx, reporter, curly)?;
                }
            }
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                let curly = ctx
                    .last_token(ctx.node(*block), TokenQuery::default())
                    .required("the closing brace of a try block")?;
                self.validate_curly_before_keyword(ctx, reporter, curly)?;

                if let (Some(handler), Some(_)) = (handler, finalizer)
                    && let NodeKind::CatchClause { body, .. } = &ctx.node(*handler).kind
                {
                    let curly = ctx
                        .last_token(ctx.node(*body), TokenQuery::default())
                        .required("the closing brace of a catch block")?;
                    self.validate_curly_before_keyword(ctx, reporter, curly)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl Rule for BraceStyle {
    fn name(&self) -> &'static str {
        "brace-style"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent brace style for blocks"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        for id in ctx.ast.preorder() {
            self.validate_node_braces(ctx, &mut reporter, id)?;
        }
        Ok(reporter.into_warnings())
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('{')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Braces
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        crate::rule_config_serde::default_config_section::<BraceStyleConfig>()
    }

    fn from_config(config: &crate::config::Config, _warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<BraceStyleConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}
