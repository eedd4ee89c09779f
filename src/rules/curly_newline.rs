/// Rule curly-newline: enforce consistent line breaks after opening and before
/// closing braces of blocks and block-like bodies
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, Reporter, Rule, RuleCategory};
use crate::rule_config_serde::RuleConfig;
use crate::syntax::{NodeId, NodeKind};
use crate::utils::ast_utils::is_opening_brace_token;
use crate::utils::newline_policy::{
    BRACE_MESSAGE_TABLE, BRACE_MESSAGES, NewlineOptions, NewlinePolicy, PolicyTable, check_delimiter_newlines,
};
use crate::utils::warn_once::WarnOnce;

mod curly_newline_config;
pub use curly_newline_config::CurlyNewlineConfig;

/// The block-like constructs whose braces this rule checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockConstruct {
    IfStatementConsequent,
    IfStatementAlternative,
    DoWhileStatement,
    ForInStatement,
    ForOfStatement,
    ForStatement,
    WhileStatement,
    SwitchStatement,
    SwitchCase,
    TryStatementBlock,
    TryStatementHandler,
    TryStatementFinalizer,
    BlockStatement,
    ArrowFunctionExpression,
    FunctionDeclaration,
    FunctionExpression,
    Property,
    ClassBody,
    TSInterfaceBody,
    TSEnumBody,
}

impl BlockConstruct {
    const NAMED: &'static [(BlockConstruct, &'static str)] = &[
        (BlockConstruct::IfStatementConsequent, "IfStatementConsequent"),
        (BlockConstruct::IfStatementAlternative, "IfStatementAlternative"),
        (BlockConstruct::DoWhileStatement, "DoWhileStatement"),
        (BlockConstruct::ForInStatement, "ForInStatement"),
        (BlockConstruct::ForOfStatement, "ForOfStatement"),
        (BlockConstruct::ForStatement, "ForStatement"),
        (BlockConstruct::WhileStatement, "WhileStatement"),
        (BlockConstruct::SwitchStatement, "SwitchStatement"),
        (BlockConstruct::SwitchCase, "SwitchCase"),
        (BlockConstruct::TryStatementBlock, "TryStatementBlock"),
        (BlockConstruct::TryStatementHandler, "TryStatementHandler"),
        (BlockConstruct::TryStatementFinalizer, "TryStatementFinalizer"),
        (BlockConstruct::BlockStatement, "BlockStatement"),
        (BlockConstruct::ArrowFunctionExpression, "ArrowFunctionExpression"),
        (BlockConstruct::FunctionDeclaration, "FunctionDeclaration"),
        (BlockConstruct::FunctionExpression, "FunctionExpression"),
        (BlockConstruct::Property, "Property"),
        (BlockConstruct::ClassBody, "ClassBody"),
        (BlockConstruct::TSInterfaceBody, "TSInterfaceBody"),
        (BlockConstruct::TSEnumBody, "TSEnumBody"),
    ];

    /// Which construct a block statement is the body of
    fn of_block(ctx: &LintContext, block: NodeId) -> Self {
        let Some(parent) = ctx.ast.parent(block) else {
            return BlockConstruct::BlockStatement;
        };
        match &ctx.node(parent).kind {
            NodeKind::IfStatement { consequent, .. } if *consequent == block => BlockConstruct::IfStatementConsequent,
            NodeKind::IfStatement { .. } => BlockConstruct::IfStatementAlternative,
            NodeKind::DoWhileStatement { .. } => BlockConstruct::DoWhileStatement,
            NodeKind::ForInStatement { .. } => BlockConstruct::ForInStatement,
            NodeKind::ForOfStatement { .. } => BlockConstruct::ForOfStatement,
            NodeKind::ForStatement { .. } => BlockConstruct::ForStatement,
            NodeKind::WhileStatement { .. } => BlockConstruct::WhileStatement,
            NodeKind::TryStatement { block: try_block, .. } if *try_block == block => BlockConstruct::TryStatementBlock,
            NodeKind::TryStatement { .. } => BlockConstruct::TryStatementFinalizer,
            NodeKind::CatchClause { .. } => BlockConstruct::TryStatementHandler,
            NodeKind::SwitchCase { .. } => BlockConstruct::SwitchCase,
            NodeKind::ArrowFunctionExpression { .. } => BlockConstruct::ArrowFunctionExpression,
            NodeKind::FunctionDeclaration(_) => BlockConstruct::FunctionDeclaration,
            NodeKind::FunctionExpression(_) => {
                let in_property = ctx
                    .ast
                    .parent_node(parent)
                    .is_some_and(|grandparent| matches!(grandparent.kind, NodeKind::Property { .. }));
                if in_property {
                    BlockConstruct::Property
                } else {
                    BlockConstruct::FunctionExpression
                }
            }
            _ => BlockConstruct::BlockStatement,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurlyNewline {
    policies: PolicyTable<BlockConstruct, NewlinePolicy>,
}

impl Default for CurlyNewline {
    fn default() -> Self {
        Self::from_config_struct(CurlyNewlineConfig::default(), &WarnOnce::new())
    }
}

impl CurlyNewline {
    pub fn from_config_struct(config: CurlyNewlineConfig, warn_once: &WarnOnce) -> Self {
        let policies = config.options.resolve(
            CurlyNewlineConfig::RULE_NAME,
            BlockConstruct::NAMED,
            NewlinePolicy::CONSISTENT,
            warn_once,
        );
        Self { policies }
    }

    pub fn new(options: NewlineOptions) -> Self {
        Self::from_config_struct(CurlyNewlineConfig { options }, &WarnOnce::new())
    }

    fn check_node(&self, ctx: &LintContext, reporter: &mut Reporter, id: NodeId) -> Result<(), LintError> {
        let node = ctx.node(id);
        let (construct, element_count, open, close) = match &node.kind {
            NodeKind::BlockStatement { body } => (
                BlockConstruct::of_block(ctx, id),
                body.len(),
                ctx.first_token(node, TokenQuery::default()),
                ctx.last_token(node, TokenQuery::default()),
            ),
            NodeKind::SwitchStatement { discriminant, cases } => (
                BlockConstruct::SwitchStatement,
                cases.len(),
                ctx.token_after(ctx.node(*discriminant), TokenQuery::filter(&is_opening_brace_token)),
                ctx.last_token(node, TokenQuery::default()),
            ),
            NodeKind::ClassBody { body } => (
                BlockConstruct::ClassBody,
                body.len(),
                ctx.first_token(node, TokenQuery::default()),
                ctx.last_token(node, TokenQuery::default()),
            ),
            NodeKind::TSInterfaceBody { body } => (
                BlockConstruct::TSInterfaceBody,
                body.len(),
                ctx.first_token(node, TokenQuery::default()),
                ctx.last_token(node, TokenQuery::default()),
            ),
            NodeKind::TSEnumDeclaration { id: name, members, .. } => (
                BlockConstruct::TSEnumBody,
                members.len(),
                ctx.token_after(ctx.node(*name), TokenQuery::filter(&is_opening_brace_token)),
                ctx.last_token(node, TokenQuery::default()),
            ),
            _ => return Ok(()),
        };

        let open = open.required("an opening brace")?;
        let close = close.required("a closing brace")?;
        check_delimiter_newlines(
            ctx,
            reporter,
            open,
            close,
            element_count,
            self.policies.get(construct),
            &BRACE_MESSAGES,
        )
    }
}

impl Rule for CurlyNewline {
    fn name(&self) -> &'static str {
        "curly-newline"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent line breaks after opening and before closing braces"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), BRACE_MESSAGE_TABLE);
        for id in ctx.ast.preorder() {
            self.check_node(ctx, &mut reporter, id)?;
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
        crate::rule_config_serde::default_config_section::<CurlyNewlineConfig>()
    }

    fn from_config(config: &crate::config::Config, warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<CurlyNewlineConfig>(config);
        Box::new(Self::from_config_struct(rule_config, warn_once))
    }
}
