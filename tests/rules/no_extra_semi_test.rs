use super::{fix_once, fix_until_stable, message_ids, rule_from_toml};
use pretty_assertions::assert_eq;

#[test]
fn test_reports_empty_statements() {
    let rule = rule_from_toml("no-extra-semi", "");
    assert_eq!(message_ids(rule.as_ref(), "var x = 5;;"), vec!["unexpected"]);
    assert_eq!(fix_once(rule.as_ref(), "var x = 5;;"), "var x = 5;");
    assert!(message_ids(rule.as_ref(), "for (;;);\nwhile (a);").is_empty());
}

#[test]
fn test_class_body_semicolons() {
    let rule = rule_from_toml("no-extra-semi", "");
    assert_eq!(
        fix_once(rule.as_ref(), "class A {\n  ;\n  m() {};\n  x = 1;;\n}"),
        "class A {\n  \n  m() {}\n  x = 1;\n}"
    );
}

#[test]
fn test_runs_of_semicolons_need_several_passes() {
    let rule = rule_from_toml("no-extra-semi", "");
    assert_eq!(fix_once(rule.as_ref(), "a();;;"), "a();;");
    assert_eq!(fix_until_stable(rule, "a();;;"), "a();");
}
