/// Rule object-curly-spacing: enforce consistent spacing inside braces
///
/// Applies to object literals and patterns, named import/export lists, type literals
/// and interface bodies. Braces that open or close on a different line than their
/// neighbouring token are left alone.
use crate::fix::TextEdit;
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::syntax::{NodeId, NodeKind, SourceLocation, Token};
use crate::utils::ast_utils::{
    is_closing_brace_token, is_closing_bracket_token, is_line_comment, is_not_comma_token, is_token_on_same_line,
};
use crate::utils::warn_once::WarnOnce;

mod object_curly_spacing_config;
pub use object_curly_spacing_config::{ObjectCurlySpacingConfig, SpacingStyle};

const MESSAGES: MessageTable = &[
    ("requireSpaceBefore", "A space is required before '{{token}}'."),
    ("requireSpaceAfter", "A space is required after '{{token}}'."),
    ("unexpectedSpaceBefore", "There should be no space before '{{token}}'."),
    ("unexpectedSpaceAfter", "There should be no space after '{{token}}'."),
];

#[derive(Debug, Clone, Default)]
pub struct ObjectCurlySpacing {
    config: ObjectCurlySpacingConfig,
}

impl ObjectCurlySpacing {
    pub fn new(style: SpacingStyle) -> Self {
        Self {
            config: ObjectCurlySpacingConfig {
                style,
                ..Default::default()
            },
        }
    }

    pub fn from_config_struct(config: ObjectCurlySpacingConfig) -> Self {
        Self { config }
    }

    /// Whether the closing brace after `penultimate` must be spaced, given the exceptions
    fn closing_must_be_spaced(&self, ctx: &LintContext, penultimate: &Token) -> bool {
        let spaced = self.config.spaced();
        let arrays = self.config.arrays_in_objects_exception() && is_closing_bracket_token(penultimate);
        let objects = self.config.objects_in_objects_exception() && is_closing_brace_token(penultimate);
        if !arrays && !objects {
            return spaced;
        }
        let inner = ctx.ast.node_at_offset(penultimate.range.start).map(|id| &ctx.node(id).kind);
        let excepted = match inner {
            Some(NodeKind::ArrayExpression { .. }) => arrays,
            Some(NodeKind::ObjectExpression { .. } | NodeKind::ObjectPattern { .. } | NodeKind::TSTypeLiteral { .. }) => {
                objects
            }
            _ => false,
        };
        if excepted { !spaced } else { spaced }
    }

    fn validate_brace_spacing(
        &self,
        ctx: &LintContext,
        reporter: &mut Reporter,
        first: &Token,
        last: &Token,
    ) -> Result<(), LintError> {
        let spaced = self.config.spaced();
        let second = ctx
            .token_after(first, TokenQuery::with_comments())
            .required("a token after the opening brace")?;
        let penultimate = ctx
            .token_before(last, TokenQuery::with_comments())
            .required("a token before the closing brace")?;

        if is_token_on_same_line(first, second) {
            let first_spaced = ctx.is_space_between(first, second);
            if spaced && !first_spaced {
                reporter.report(
                    first.loc,
                    "requireSpaceAfter",
                    &[("token", first.value.clone())],
                    Some(vec![TextEdit::insert_after(first, " ")]),
                )?;
            }
            if !spaced && first_spaced && !is_line_comment(second) {
                reporter.report(
                    SourceLocation::new(first.loc.end, second.loc.start),
                    "unexpectedSpaceAfter",
                    &[("token", first.value.clone())],
                    Some(vec![TextEdit::remove_range(first.range.end..second.range.start)]),
                )?;
            }
        }

        if is_token_on_same_line(penultimate, last) {
            let must_be_spaced = self.closing_must_be_spaced(ctx, penultimate);
            let last_spaced = ctx.is_space_between(penultimate, last);
            if must_be_spaced && !last_spaced {
                reporter.report(
                    last.loc,
                    "requireSpaceBefore",
                    &[("token", last.value.clone())],
                    Some(vec![TextEdit::insert_before(last, " ")]),
                )?;
            }
            if !must_be_spaced && last_spaced {
                reporter.report(
                    SourceLocation::new(penultimate.loc.end, last.loc.start),
                    "unexpectedSpaceBefore",
                    &[("token", last.value.clone())],
                    Some(vec![TextEdit::remove_range(penultimate.range.end..last.range.start)]),
                )?;
            }
        }
        Ok(())
    }

    /// Opening brace and the closing brace after the last member of a braced body
    fn body_braces<'t>(
        ctx: &'t LintContext,
        id: NodeId,
        members: &[NodeId],
    ) -> Result<(&'t Token, &'t Token), LintError> {
        let first = ctx
            .first_token(ctx.node(id), TokenQuery::default())
            .required("an opening brace")?;
        let last_member = members.last().required("a member")?;
        let last = ctx
            .token_after(ctx.node(*last_member), TokenQuery::filter(&is_closing_brace_token))
            .required("a closing brace")?;
        Ok((first, last))
    }

    /// Braces around a specifier list, found from the specifiers themselves
    fn specifier_braces<'t>(
        ctx: &'t LintContext,
        first_specifier: NodeId,
        last_specifier: NodeId,
    ) -> Result<(&'t Token, &'t Token), LintError> {
        let first = ctx
            .token_before(ctx.node(first_specifier), TokenQuery::default())
            .required("a token before the first specifier")?;
        let last = ctx
            .token_after(ctx.node(last_specifier), TokenQuery::filter(&is_not_comma_token))
            .required("a token after the last specifier")?;
        Ok((first, last))
    }

    fn braces<'t>(ctx: &'t LintContext, id: NodeId) -> Result<Option<(&'t Token, &'t Token)>, LintError> {
        let braces = match &ctx.node(id).kind {
            NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties, .. }
                if !properties.is_empty() =>
            {
                Self::body_braces(ctx, id, properties)?
            }
            NodeKind::TSTypeLiteral { members } | NodeKind::TSInterfaceBody { body: members } if !members.is_empty() => {
                Self::body_braces(ctx, id, members)?
            }
            NodeKind::ImportDeclaration { specifiers, .. } => {
                let is_named = |id: &&NodeId| matches!(ctx.node(**id).kind, NodeKind::ImportSpecifier { .. });
                let Some(last) = specifiers.last().filter(is_named) else {
                    return Ok(None);
                };
                // skip a leading default or namespace specifier
                let first = specifiers.iter().find(is_named).unwrap_or(last);
                Self::specifier_braces(ctx, *first, *last)?
            }
            NodeKind::ExportNamedDeclaration { specifiers, .. } => {
                let (Some(first), Some(last)) = (specifiers.first(), specifiers.last()) else {
                    return Ok(None);
                };
                Self::specifier_braces(ctx, *first, *last)?
            }
            _ => return Ok(None),
        };
        Ok(Some(braces))
    }
}

impl Rule for ObjectCurlySpacing {
    fn name(&self) -> &'static str {
        "object-curly-spacing"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent spacing inside braces"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        for id in ctx.ast.preorder() {
            if let Some((first, last)) = Self::braces(ctx, id)? {
                self.validate_brace_spacing(ctx, &mut reporter, first, last)?;
            }
        }
        Ok(reporter.into_warnings())
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('{')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Spacing
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        crate::rule_config_serde::default_config_section::<ObjectCurlySpacingConfig>()
    }

    fn from_config(config: &crate::config::Config, _warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<ObjectCurlySpacingConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}
