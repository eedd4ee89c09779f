/// Rule array-bracket-newline: enforce line breaks after opening and before closing
/// array brackets
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::rule_config_serde::RuleConfig;
use crate::syntax::{NodeId, NodeKind};
use crate::utils::newline_policy::{
    BoundaryMessages, NewlineOptions, NewlinePolicy, PolicyTable, check_delimiter_newlines,
};
use crate::utils::warn_once::WarnOnce;

mod array_bracket_newline_config;
pub use array_bracket_newline_config::ArrayBracketNewlineConfig;

const MESSAGES: MessageTable = &[
    ("expectedLinebreakAfterOpeningBracket", "A linebreak is required after '['."),
    ("expectedLinebreakBeforeClosingBracket", "A linebreak is required before ']'."),
    ("unexpectedLinebreakAfterOpeningBracket", "There should be no linebreak after '['."),
    ("unexpectedLinebreakBeforeClosingBracket", "There should be no linebreak before ']'."),
];

const BRACKET_MESSAGES: BoundaryMessages = BoundaryMessages {
    expected_after_open: "expectedLinebreakAfterOpeningBracket",
    expected_before_close: "expectedLinebreakBeforeClosingBracket",
    unexpected_after_open: "unexpectedLinebreakAfterOpeningBracket",
    unexpected_before_close: "unexpectedLinebreakBeforeClosingBracket",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArrayConstruct {
    ArrayExpression,
    ArrayPattern,
    TSTupleType,
}

const CONSTRUCTS: &[(ArrayConstruct, &str)] = &[
    (ArrayConstruct::ArrayExpression, "ArrayExpression"),
    (ArrayConstruct::ArrayPattern, "ArrayPattern"),
    (ArrayConstruct::TSTupleType, "TSTupleType"),
];

#[derive(Debug, Clone)]
pub struct ArrayBracketNewline {
    policies: PolicyTable<ArrayConstruct, NewlinePolicy>,
}

impl Default for ArrayBracketNewline {
    fn default() -> Self {
        Self::from_config_struct(ArrayBracketNewlineConfig::default(), &WarnOnce::new())
    }
}

impl ArrayBracketNewline {
    pub fn from_config_struct(config: ArrayBracketNewlineConfig, warn_once: &WarnOnce) -> Self {
        Self {
            policies: config.options.resolve(
                ArrayBracketNewlineConfig::RULE_NAME,
                CONSTRUCTS,
                NewlinePolicy::MULTILINE,
                warn_once,
            ),
        }
    }

    pub fn new(options: NewlineOptions) -> Self {
        Self::from_config_struct(ArrayBracketNewlineConfig { options }, &WarnOnce::new())
    }

    fn check_node(&self, ctx: &LintContext, reporter: &mut Reporter, id: NodeId) -> Result<(), LintError> {
        let node = ctx.node(id);
        let (construct, element_count, type_annotation) = match &node.kind {
            NodeKind::ArrayExpression { elements } => (ArrayConstruct::ArrayExpression, elements.len(), None),
            NodeKind::ArrayPattern {
                elements,
                type_annotation,
            } => (ArrayConstruct::ArrayPattern, elements.len(), *type_annotation),
            NodeKind::TSTupleType { element_types } => (ArrayConstruct::TSTupleType, element_types.len(), None),
            _ => return Ok(()),
        };

        let open = ctx
            .first_token(node, TokenQuery::default())
            .required("an opening bracket")?;
        let close = match type_annotation {
            Some(annotation) => ctx.token_before(ctx.node(annotation), TokenQuery::default()),
            None => ctx.last_token(node, TokenQuery::default()),
        }
        .required("a closing bracket")?;

        check_delimiter_newlines(
            ctx,
            reporter,
            open,
            close,
            element_count,
            self.policies.get(construct),
            &BRACKET_MESSAGES,
        )
    }
}

impl Rule for ArrayBracketNewline {
    fn name(&self) -> &'static str {
        "array-bracket-newline"
    }

    fn description(&self) -> &'static str {
        "Enforce line breaks after opening and before closing array brackets"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        for id in ctx.ast.preorder() {
            self.check_node(ctx, &mut reporter, id)?;
        }
        Ok(reporter.into_warnings())
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('[')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Delimiters
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        crate::rule_config_serde::default_config_section::<ArrayBracketNewlineConfig>()
    }

    fn from_config(config: &crate::config::Config, warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<ArrayBracketNewlineConfig>(config);
        Box::new(Self::from_config_struct(rule_config, warn_once))
    }
}
