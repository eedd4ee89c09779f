use stylint_lib::config::Config;
use stylint_lib::fix_coordinator::{DEFAULT_MAX_PASSES, FixCoordinator};
use stylint_lib::lint_context::LintContext;
use stylint_lib::rule::{LintWarning, Rule};
use stylint_lib::rules::all_rules;
use stylint_lib::utils::warn_once::WarnOnce;

mod brace_style_test;
mod comma_style_test;
mod idempotence_test;
mod indent_test;
mod member_delimiter_style_test;
mod newline_rules_test;
mod no_extra_semi_test;
mod object_curly_spacing_test;
mod operator_linebreak_test;
mod scenarios_test;

/// Build the rule named `name` from a TOML configuration
pub fn rule_from_toml(name: &str, toml: &str) -> Box<dyn Rule> {
    let config = Config::from_toml_str(toml).unwrap();
    all_rules(&config, &WarnOnce::new())
        .into_iter()
        .find(|rule| rule.name() == name)
        .unwrap_or_else(|| panic!("no rule named {name}"))
}

pub fn warnings(rule: &dyn Rule, content: &str) -> Vec<LintWarning> {
    let ctx = LintContext::new(content).unwrap();
    rule.check(&ctx).unwrap()
}

pub fn message_ids(rule: &dyn Rule, content: &str) -> Vec<&'static str> {
    warnings(rule, content).iter().map(|w| w.message_id).collect()
}

/// Apply the rule's fixes once
pub fn fix_once(rule: &dyn Rule, content: &str) -> String {
    let ctx = LintContext::new(content).unwrap();
    rule.fix(&ctx).unwrap()
}

/// Apply the rule's fixes until nothing changes
pub fn fix_until_stable(rule: Box<dyn Rule>, content: &str) -> String {
    FixCoordinator::new()
        .fix_until_stable(content, &[rule], DEFAULT_MAX_PASSES)
        .unwrap()
        .content
}
