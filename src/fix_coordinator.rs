use crate::lint_context::LintContext;
use crate::rule::{LintError, LintWarning, Rule};
use crate::utils::fix_utils::apply_fixes_once;
use std::collections::{HashMap, HashSet};

/// Default cap on fix passes
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Result of fixing one file to a fixed point
#[derive(Debug, Clone, PartialEq)]
pub struct FixOutcome {
    pub content: String,
    /// Passes that changed the content
    pub passes: usize,
    /// Individual fixes applied over all passes
    pub fixes_applied: usize,
    /// Warnings still reported by the fixed content
    pub remaining: Vec<LintWarning>,
}

/// Coordinates rule fixing to minimize the number of passes needed
pub struct FixCoordinator {
    /// Rules that should run before others (rule -> rules that depend on it)
    dependencies: HashMap<&'static str, Vec<&'static str>>,
}

impl Default for FixCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl FixCoordinator {
    pub fn new() -> Self {
        let mut dependencies = HashMap::new();

        // Rules that move tokens between lines run before indent, which only
        // rewrites leading whitespace of the lines it finds.
        dependencies.insert("brace-style", vec!["indent", "curly-newline"]);
        dependencies.insert("curly-newline", vec!["indent"]);
        dependencies.insert("object-curly-newline", vec!["indent"]);
        dependencies.insert("array-bracket-newline", vec!["indent"]);
        dependencies.insert("comma-style", vec!["indent"]);
        dependencies.insert("operator-linebreak", vec!["indent"]);

        // Removing a stray semicolon can change which delimiter a member carries
        dependencies.insert("no-extra-semi", vec!["member-delimiter-style"]);

        Self { dependencies }
    }

    /// Get the optimal order for running rules based on dependencies
    pub fn get_optimal_order<'a>(&self, rules: &'a [Box<dyn Rule>]) -> Vec<&'a dyn Rule> {
        let rule_map: HashMap<&str, &dyn Rule> = rules.iter().map(|r| (r.name(), r.as_ref())).collect();

        // Reverse dependencies (rule -> rules it depends on)
        let mut reverse_deps: HashMap<&str, HashSet<&str>> = HashMap::new();
        for (prereq, dependents) in &self.dependencies {
            for dependent in dependents {
                reverse_deps.entry(dependent).or_default().insert(prereq);
            }
        }

        let mut sorted = Vec::new();
        let mut visited = HashSet::new();
        let mut visiting = HashSet::new();

        fn visit<'a>(
            rule_name: &str,
            rule_map: &HashMap<&str, &'a dyn Rule>,
            reverse_deps: &HashMap<&str, HashSet<&str>>,
            visited: &mut HashSet<String>,
            visiting: &mut HashSet<String>,
            sorted: &mut Vec<&'a dyn Rule>,
        ) {
            if visited.contains(rule_name) || visiting.contains(rule_name) {
                return;
            }
            visiting.insert(rule_name.to_string());

            if let Some(deps) = reverse_deps.get(rule_name) {
                // sorted for a deterministic order
                let mut deps: Vec<&&str> = deps.iter().collect();
                deps.sort();
                for dep in deps {
                    if rule_map.contains_key(dep) {
                        visit(dep, rule_map, reverse_deps, visited, visiting, sorted);
                    }
                }
            }

            visiting.remove(rule_name);
            visited.insert(rule_name.to_string());
            if let Some(&rule) = rule_map.get(rule_name) {
                sorted.push(rule);
            }
        }

        for rule in rules {
            visit(
                rule.name(),
                &rule_map,
                &reverse_deps,
                &mut visited,
                &mut visiting,
                &mut sorted,
            );
        }

        sorted
    }

    /// Lint and fix `content` repeatedly until no fix applies or `max_passes` is reached.
    ///
    /// Within a pass each rule sees the content as left by the rules before it. A rule
    /// that other rules depend on ends the pass early when it changes something, so
    /// its dependents always run on fresh line structure.
    pub fn fix_until_stable(
        &self,
        content: &str,
        rules: &[Box<dyn Rule>],
        max_passes: usize,
    ) -> Result<FixOutcome, LintError> {
        let ordered_rules = self.get_optimal_order(rules);
        let mut content = content.to_string();
        let mut passes = 0;
        let mut fixes_applied = 0;

        while passes < max_passes {
            let mut changed = false;

            for rule in &ordered_rules {
                let ctx = LintContext::new(&content)?;
                if rule.should_skip(&ctx) {
                    continue;
                }
                let warnings = rule.check(&ctx)?;
                if warnings.iter().all(|w| w.fix.is_none()) {
                    continue;
                }

                let (fixed, applied) = apply_fixes_once(&content, &warnings).map_err(LintError::FixFailed)?;
                if applied == 0 || fixed == content {
                    continue;
                }
                log::debug!("{}: applied {applied} fix(es) in pass {}", rule.name(), passes + 1);
                content = fixed;
                fixes_applied += applied;
                changed = true;

                if self.dependencies.contains_key(rule.name()) {
                    break;
                }
            }

            if !changed {
                break;
            }
            passes += 1;
        }

        if passes == max_passes {
            log::debug!("Fixing stopped at the pass limit of {max_passes}");
        }

        let remaining = crate::lint(&content, rules)?;
        Ok(FixOutcome {
            content,
            passes,
            fixes_applied,
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{LintResult, RuleCategory};
    use crate::rules::{BraceStyle, CurlyNewline, Indent, NoExtraSemi};
    use pretty_assertions::assert_eq;

    #[derive(Clone)]
    struct MockRule {
        name: &'static str,
    }

    impl Rule for MockRule {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            "Mock rule for testing"
        }

        fn check(&self, _ctx: &LintContext) -> LintResult {
            Ok(Vec::new())
        }

        fn category(&self) -> RuleCategory {
            RuleCategory::Other
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn from_config(_config: &crate::config::Config, _warn_once: &crate::utils::warn_once::WarnOnce) -> Box<dyn Rule>
        where
            Self: Sized,
        {
            Box::new(MockRule { name: "mock" })
        }
    }

    #[test]
    fn test_dependency_ordering() {
        let coordinator = FixCoordinator::new();
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(MockRule { name: "indent" }),
            Box::new(MockRule { name: "member-delimiter-style" }),
            Box::new(MockRule { name: "brace-style" }),
            Box::new(MockRule { name: "no-extra-semi" }),
            Box::new(MockRule { name: "curly-newline" }),
        ];

        let ordered: Vec<&str> = coordinator.get_optimal_order(&rules).iter().map(|r| r.name()).collect();
        let position = |name: &str| ordered.iter().position(|&n| n == name).unwrap();

        assert_eq!(ordered.len(), 5);
        assert!(position("brace-style") < position("curly-newline"));
        assert!(position("curly-newline") < position("indent"));
        assert!(position("no-extra-semi") < position("member-delimiter-style"));
    }

    #[test]
    fn test_brace_fix_then_indent_fix() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(Indent::default()), Box::new(BraceStyle::default())];
        let outcome = FixCoordinator::new()
            .fix_until_stable("if (foo)\n{\nbar();\n}", &rules, DEFAULT_MAX_PASSES)
            .unwrap();
        assert_eq!(outcome.content, "if (foo) {\n    bar();\n}");
        assert_eq!(outcome.passes, 2);
        assert_eq!(outcome.fixes_applied, 2);
        assert!(outcome.remaining.is_empty());
    }

    #[test]
    fn test_adjacent_fixes_need_several_passes() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(NoExtraSemi)];
        let outcome = FixCoordinator::new()
            .fix_until_stable("a();;;;", &rules, DEFAULT_MAX_PASSES)
            .unwrap();
        assert_eq!(outcome.content, "a();");
        assert!(outcome.passes >= 2);
        assert!(outcome.remaining.is_empty());
    }

    #[test]
    fn test_pass_cap_is_respected() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(NoExtraSemi)];
        let outcome = FixCoordinator::new().fix_until_stable("a();;;;;;", &rules, 1).unwrap();
        assert_eq!(outcome.passes, 1);
        assert!(!outcome.remaining.is_empty());
    }

    #[test]
    fn test_clean_input_takes_no_passes() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(CurlyNewline::default()), Box::new(Indent::default())];
        let outcome = FixCoordinator::new()
            .fix_until_stable("if (a) {\n    b();\n}\n", &rules, DEFAULT_MAX_PASSES)
            .unwrap();
        assert_eq!(outcome.passes, 0);
        assert_eq!(outcome.fixes_applied, 0);
        assert_eq!(outcome.content, "if (a) {\n    b();\n}\n");
    }

    #[test]
    fn test_parse_error_is_surfaced() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(NoExtraSemi)];
        let err = FixCoordinator::new()
            .fix_until_stable("if (", &rules, DEFAULT_MAX_PASSES)
            .unwrap_err();
        assert!(matches!(err, LintError::ParsingError(_)));
    }
}
