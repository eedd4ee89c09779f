/// Rule no-extra-semi: disallow unnecessary semicolons
use crate::fix::FixTracker;
use crate::lint_context::{LintContext, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::syntax::{NodeKind, SourceLocation, Spanned, Token, TokenKind};
use crate::utils::ast_utils::{is_closing_brace_token, is_semicolon_token};
use crate::utils::warn_once::WarnOnce;

const MESSAGES: MessageTable = &[("unexpected", "Unnecessary semicolon.")];

#[derive(Debug, Clone, Default)]
pub struct NoExtraSemi;

impl NoExtraSemi {
    pub fn new() -> Self {
        Self
    }

    fn report(
        ctx: &LintContext,
        reporter: &mut Reporter,
        target: impl Spanned,
        loc: SourceLocation,
        anchor: &Token,
    ) -> Result<(), LintError> {
        let edit = FixTracker::new(ctx.content)
            .retain_surrounding_tokens(ctx, anchor)
            .remove(target)?;
        reporter.report(loc, "unexpected", &[], Some(vec![edit]))
    }

    /// Report semicolons from `first` up to the next non-punctuator or closing brace
    fn check_class_body_part(ctx: &LintContext, reporter: &mut Reporter, first: Option<&Token>) -> Result<(), LintError> {
        let mut current = first;
        while let Some(token) = current {
            if token.kind != TokenKind::Punctuator || is_closing_brace_token(token) {
                break;
            }
            if is_semicolon_token(token) {
                Self::report(ctx, reporter, token, token.loc, token)?;
            }
            current = ctx.token_after(token, TokenQuery::default());
        }
        Ok(())
    }
}

impl Rule for NoExtraSemi {
    fn name(&self) -> &'static str {
        "no-extra-semi"
    }

    fn description(&self) -> &'static str {
        "Disallow unnecessary semicolons"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        for id in ctx.ast.preorder() {
            let node = ctx.node(id);
            match &node.kind {
                NodeKind::EmptyStatement => {
                    let allowed = ctx.ast.parent_node(id).is_some_and(|parent| {
                        matches!(
                            parent.kind,
                            NodeKind::ForStatement { .. }
                                | NodeKind::ForInStatement { .. }
                                | NodeKind::ForOfStatement { .. }
                                | NodeKind::WhileStatement { .. }
                                | NodeKind::DoWhileStatement { .. }
                                | NodeKind::IfStatement { .. }
                                | NodeKind::LabeledStatement { .. }
                        )
                    });
                    if !allowed && let Some(semi) = ctx.first_token(node, TokenQuery::default()) {
                        Self::report(ctx, &mut reporter, node.range.clone(), node.loc, semi)?;
                    }
                }
                NodeKind::ClassBody { .. } => {
                    Self::check_class_body_part(ctx, &mut reporter, ctx.first_token(node, TokenQuery::skip(1)))?;
                }
                NodeKind::MethodDefinition { .. } | NodeKind::PropertyDefinition { .. } => {
                    Self::check_class_body_part(ctx, &mut reporter, ctx.token_after(node, TokenQuery::default()))?;
                }
                _ => {}
            }
        }
        Ok(reporter.into_warnings())
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains(';')
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Semicolons
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config, _warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(NoExtraSemi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fix_utils::apply_fixes_once;
    use pretty_assertions::assert_eq;

    fn check(content: &str) -> Vec<(usize, usize)> {
        let ctx = LintContext::new(content).unwrap();
        NoExtraSemi.check(&ctx).unwrap().iter().map(|w| (w.line, w.column)).collect()
    }

    fn fix(content: &str) -> String {
        let ctx = LintContext::new(content).unwrap();
        NoExtraSemi.fix(&ctx).unwrap()
    }

    #[test]
    fn test_empty_statements() {
        assert_eq!(check("var x = 5;;"), vec![(1, 11)]);
        assert_eq!(fix("var x = 5;;"), "var x = 5;");
        assert_eq!(fix("function f() {\n  ;\n}"), "function f() {\n  \n}");
    }

    #[test]
    fn test_loop_and_if_bodies_are_allowed() {
        assert!(check("for (;;);\nwhile (a);\nif (a);\nlabel: ;").is_empty());
    }

    #[test]
    fn test_class_body_semicolons() {
        let content = "class A {\n  ;\n  m() {};\n  x = 1;;\n}";
        assert_eq!(check(content), vec![(2, 3), (3, 9), (4, 9)]);
        assert_eq!(fix(content), "class A {\n  \n  m() {}\n  x = 1;\n}");
    }

    #[test]
    fn test_adjacent_semicolons_fix_one_per_pass() {
        let content = "a();;;";
        let ctx = LintContext::new(content).unwrap();
        let warnings = NoExtraSemi.check(&ctx).unwrap();
        assert_eq!(warnings.len(), 2);
        // both removals retain the neighbouring tokens, so they overlap
        let (fixed, applied) = apply_fixes_once(content, &warnings).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(fixed, "a();;");
    }
}
