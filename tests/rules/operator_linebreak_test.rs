use super::{fix_once, message_ids, rule_from_toml};
use pretty_assertions::assert_eq;

#[test]
fn test_default_after_with_ternary_before() {
    let rule = rule_from_toml("operator-linebreak", "");
    assert_eq!(fix_once(rule.as_ref(), "const a = b\n  + c;"), "const a = b +\n  c;");
    assert!(message_ids(rule.as_ref(), "const a = b\n  ? c\n  : d;").is_empty());
}

#[test]
fn test_before_from_config() {
    let rule = rule_from_toml("operator-linebreak", "[operator-linebreak]\nstyle = \"before\"\n");
    assert_eq!(fix_once(rule.as_ref(), "if (a &&\n    b) {}"), "if (a\n    && b) {}");
}

#[test]
fn test_operator_overrides_from_config() {
    let rule = rule_from_toml(
        "operator-linebreak",
        "[operator-linebreak]\nstyle = \"before\"\n[operator-linebreak.overrides]\n\"+\" = \"ignore\"\n",
    );
    assert!(message_ids(rule.as_ref(), "x = a +\n  b;").is_empty());
    assert_eq!(message_ids(rule.as_ref(), "x = a -\n  b;"), vec!["operatorAtBeginning"]);
}

#[test]
fn test_none_joins_lines() {
    let rule = rule_from_toml("operator-linebreak", "[operator-linebreak]\nstyle = \"none\"\n");
    assert_eq!(message_ids(rule.as_ref(), "x =\n  y;"), vec!["noLinebreak"]);
    assert_eq!(fix_once(rule.as_ref(), "x = a +\n+b;"), "x = a + +b;");
}
