use super::{fix_once, message_ids, rule_from_toml};
use pretty_assertions::assert_eq;

#[test]
fn test_first_from_config() {
    let rule = rule_from_toml("comma-style", "[comma-style]\nstyle = \"first\"\n");
    let content = "const a = {\n  b: 1,\n  c: 2\n};";
    assert_eq!(message_ids(rule.as_ref(), content), vec!["expectedCommaFirst"]);
    assert_eq!(fix_once(rule.as_ref(), content), "const a = {\n  b: 1\n  ,c: 2\n};");
}

#[test]
fn test_exceptions_table() {
    let rule = rule_from_toml(
        "comma-style",
        "[comma-style]\n[comma-style.exceptions]\nVariableDeclaration = true\nCallExpression = false\n",
    );
    assert!(message_ids(rule.as_ref(), "var a = 1\n, b = 2;").is_empty());
    assert_eq!(message_ids(rule.as_ref(), "f(a\n, b);"), vec!["expectedCommaLast"]);
}

#[test]
fn test_typescript_lists() {
    let rule = rule_from_toml("comma-style", "");
    assert_eq!(message_ids(rule.as_ref(), "enum E {\n  A\n  , B\n}"), vec!["expectedCommaLast"]);
    assert_eq!(
        message_ids(rule.as_ref(), "type T = [\n  string\n  , number\n];"),
        vec!["expectedCommaLast"]
    );
}

#[test]
fn test_comma_alone_on_a_line() {
    let rule = rule_from_toml("comma-style", "");
    assert_eq!(
        message_ids(rule.as_ref(), "const a = [\n  1\n  ,\n  2\n];"),
        vec!["unexpectedLineBeforeAndAfterComma"]
    );
}
