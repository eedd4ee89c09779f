/// Rule object-curly-newline: enforce consistent line breaks inside the braces of
/// object literals, destructuring patterns, import/export lists and type bodies
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, Reporter, Rule, RuleCategory};
use crate::rule_config_serde::RuleConfig;
use crate::syntax::{NodeId, NodeKind, Token};
use crate::utils::ast_utils::{is_closing_brace_token, is_opening_brace_token};
use crate::utils::newline_policy::{
    BRACE_MESSAGE_TABLE, BRACE_MESSAGES, NewlineOptions, NewlinePolicy, PolicyTable, check_delimiter_newlines,
};
use crate::utils::warn_once::WarnOnce;

mod object_curly_newline_config;
pub use object_curly_newline_config::ObjectCurlyNewlineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectConstruct {
    ObjectExpression,
    ObjectPattern,
    ImportDeclaration,
    ExportDeclaration,
    TSTypeLiteral,
    TSInterfaceBody,
    TSEnumBody,
}

const CONSTRUCTS: &[(ObjectConstruct, &str)] = &[
    (ObjectConstruct::ObjectExpression, "ObjectExpression"),
    (ObjectConstruct::ObjectPattern, "ObjectPattern"),
    (ObjectConstruct::ImportDeclaration, "ImportDeclaration"),
    (ObjectConstruct::ExportDeclaration, "ExportDeclaration"),
    (ObjectConstruct::TSTypeLiteral, "TSTypeLiteral"),
    (ObjectConstruct::TSInterfaceBody, "TSInterfaceBody"),
    (ObjectConstruct::TSEnumBody, "TSEnumBody"),
];

/// Braces and element count of one checked construct
struct BracedList<'t> {
    construct: ObjectConstruct,
    open: Option<&'t Token>,
    close: Option<&'t Token>,
    element_count: usize,
}

#[derive(Debug, Clone)]
pub struct ObjectCurlyNewline {
    policies: PolicyTable<ObjectConstruct, NewlinePolicy>,
}

impl Default for ObjectCurlyNewline {
    fn default() -> Self {
        Self::from_config_struct(ObjectCurlyNewlineConfig::default(), &WarnOnce::new())
    }
}

impl ObjectCurlyNewline {
    pub fn from_config_struct(config: ObjectCurlyNewlineConfig, warn_once: &WarnOnce) -> Self {
        Self {
            policies: config.options.resolve(
                ObjectCurlyNewlineConfig::RULE_NAME,
                CONSTRUCTS,
                NewlinePolicy::CONSISTENT,
                warn_once,
            ),
        }
    }

    pub fn new(options: NewlineOptions) -> Self {
        Self::from_config_struct(ObjectCurlyNewlineConfig { options }, &WarnOnce::new())
    }

    fn braced_list<'t>(ctx: &'t LintContext, id: NodeId) -> Option<BracedList<'t>> {
        let node = ctx.node(id);
        let first_brace = || ctx.first_token(node, TokenQuery::filter(&is_opening_brace_token));
        let last_brace = || ctx.last_token(node, TokenQuery::filter(&is_closing_brace_token));
        let list = match &node.kind {
            NodeKind::ObjectExpression { properties } => BracedList {
                construct: ObjectConstruct::ObjectExpression,
                open: first_brace(),
                close: last_brace(),
                element_count: properties.len(),
            },
            NodeKind::ObjectPattern {
                properties,
                type_annotation,
            } => BracedList {
                construct: ObjectConstruct::ObjectPattern,
                open: first_brace(),
                close: match type_annotation {
                    Some(annotation) => ctx.token_before(ctx.node(*annotation), TokenQuery::default()),
                    None => last_brace(),
                },
                element_count: properties.len(),
            },
            NodeKind::ImportDeclaration { specifiers, .. } => {
                let has_named = specifiers
                    .iter()
                    .any(|s| matches!(ctx.node(*s).kind, NodeKind::ImportSpecifier { .. }));
                if !has_named {
                    return None;
                }
                BracedList {
                    construct: ObjectConstruct::ImportDeclaration,
                    open: first_brace(),
                    close: last_brace(),
                    element_count: specifiers.len(),
                }
            }
            NodeKind::ExportNamedDeclaration {
                declaration: None,
                specifiers,
                ..
            } if !specifiers.is_empty() => BracedList {
                construct: ObjectConstruct::ExportDeclaration,
                open: first_brace(),
                close: last_brace(),
                element_count: specifiers.len(),
            },
            NodeKind::TSTypeLiteral { members } => BracedList {
                construct: ObjectConstruct::TSTypeLiteral,
                open: first_brace(),
                close: last_brace(),
                element_count: members.len(),
            },
            NodeKind::TSInterfaceBody { body } => BracedList {
                construct: ObjectConstruct::TSInterfaceBody,
                open: first_brace(),
                close: last_brace(),
                element_count: body.len(),
            },
            NodeKind::TSEnumDeclaration { id: name, members, .. } => BracedList {
                construct: ObjectConstruct::TSEnumBody,
                open: ctx.token_after(ctx.node(*name), TokenQuery::filter(&is_opening_brace_token)),
                close: ctx.last_token(node, TokenQuery::default()),
                element_count: members.len(),
            },
            _ => return None,
        };
        Some(list)
    }

    fn check_node(&self, ctx: &LintContext, reporter: &mut Reporter, id: NodeId) -> Result<(), LintError> {
        let Some(list) = Self::braced_list(ctx, id) else {
            return Ok(());
        };
        let open = list.open.required("an opening brace")?;
        let close = list.close.required("a closing brace")?;
        check_delimiter_newlines(
            ctx,
            reporter,
            open,
            close,
            list.element_count,
            self.policies.get(list.construct),
            &BRACE_MESSAGES,
        )
    }
}

impl Rule for ObjectCurlyNewline {
    fn name(&self) -> &'static str {
        "object-curly-newline"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent line breaks after opening and before closing braces of objects"
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
        crate::rule_config_serde::default_config_section::<ObjectCurlyNewlineConfig>()
    }

    fn from_config(config: &crate::config::Config, warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<ObjectCurlyNewlineConfig>(config);
        Box::new(Self::from_config_struct(rule_config, warn_once))
    }
}
