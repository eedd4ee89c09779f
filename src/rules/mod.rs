mod array_bracket_newline;
mod brace_style;
mod comma_style;
mod curly_newline;
pub mod indent;
mod member_delimiter_style;
mod no_extra_semi;
mod object_curly_newline;
mod object_curly_spacing;
mod operator_linebreak;

pub use array_bracket_newline::{ArrayBracketNewline, ArrayBracketNewlineConfig};
pub use brace_style::{BraceStyle, BraceStyleConfig, BraceStyleKind};
pub use comma_style::{CommaStyle, CommaStyleConfig, CommaStyleKind};
pub use curly_newline::{CurlyNewline, CurlyNewlineConfig};
pub use indent::{Indent, IndentConfig, IndentWidth};
pub use member_delimiter_style::{MemberDelimiterStyle, MemberDelimiterStyleConfig};
pub use no_extra_semi::NoExtraSemi;
pub use object_curly_newline::{ObjectCurlyNewline, ObjectCurlyNewlineConfig};
pub use object_curly_spacing::{ObjectCurlySpacing, ObjectCurlySpacingConfig, SpacingStyle};
pub use operator_linebreak::{LinebreakStyle, OperatorLinebreak, OperatorLinebreakConfig, OperatorStyle};

use crate::config::{Config, GlobalConfig};
use crate::rule::Rule;
use crate::utils::warn_once::WarnOnce;
use std::collections::HashSet;

/// Build every rule from `config`, in a stable order
pub fn all_rules(config: &Config, warn_once: &WarnOnce) -> Vec<Box<dyn Rule>> {
    macro_rules! rule {
        ($ctor:ident) => {
            $ctor::from_config(config, warn_once)
        };
    }

    vec![
        rule!(BraceStyle),
        rule!(CurlyNewline),
        rule!(ObjectCurlyNewline),
        rule!(ArrayBracketNewline),
        rule!(ObjectCurlySpacing),
        rule!(CommaStyle),
        rule!(MemberDelimiterStyle),
        rule!(OperatorLinebreak),
        rule!(Indent),
        rule!(NoExtraSemi),
    ]
}

/// Names of all rules, in registry order
pub fn rule_names() -> Vec<&'static str> {
    all_rules(&Config::default(), &WarnOnce::new())
        .iter()
        .map(|rule| rule.name())
        .collect()
}

/// Select the rules to run according to `enable` / `disable`.
///
/// `disable = ["all"]` turns everything off except rules named in `enable`.
/// Otherwise a non-empty `enable` restricts the set, and `disable` always wins.
pub fn filter_rules(rules: &[Box<dyn Rule>], global_config: &GlobalConfig) -> Vec<Box<dyn Rule>> {
    let disabled: HashSet<&str> = global_config.disable.iter().map(String::as_str).collect();
    let enabled: HashSet<&str> = global_config.enable.iter().map(String::as_str).collect();

    if disabled.contains("all") {
        return rules
            .iter()
            .filter(|rule| enabled.contains(rule.name()))
            .map(|rule| dyn_clone::clone_box(&**rule))
            .collect();
    }

    rules
        .iter()
        .filter(|rule| enabled.is_empty() || enabled.contains("all") || enabled.contains(rule.name()))
        .filter(|rule| !disabled.contains(rule.name()))
        .map(|rule| dyn_clone::clone_box(&**rule))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(rules: &[Box<dyn Rule>]) -> Vec<&'static str> {
        rules.iter().map(|rule| rule.name()).collect()
    }

    #[test]
    fn test_registry_names_are_unique_kebab_case() {
        let names = rule_names();
        assert_eq!(names.len(), 10);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert!(names.iter().all(|name| !name.contains('_') && name.to_ascii_lowercase() == *name));
    }

    #[test]
    fn test_filter_enable_and_disable() {
        let rules = all_rules(&Config::default(), &WarnOnce::new());

        let global = GlobalConfig {
            enable: vec!["indent".to_string(), "comma-style".to_string()],
            disable: vec!["comma-style".to_string()],
            ..Default::default()
        };
        assert_eq!(names(&filter_rules(&rules, &global)), vec!["indent"]);

        let global = GlobalConfig {
            disable: vec!["indent".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_rules(&rules, &global).len(), 9);
    }

    #[test]
    fn test_disable_all_keeps_only_enabled() {
        let rules = all_rules(&Config::default(), &WarnOnce::new());
        let global = GlobalConfig {
            disable: vec!["all".to_string()],
            ..Default::default()
        };
        assert!(filter_rules(&rules, &global).is_empty());

        let global = GlobalConfig {
            enable: vec!["no-extra-semi".to_string()],
            disable: vec!["all".to_string()],
            ..Default::default()
        };
        assert_eq!(names(&filter_rules(&rules, &global)), vec!["no-extra-semi"]);
    }
}
