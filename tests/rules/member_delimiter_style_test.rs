use super::{fix_once, message_ids, rule_from_toml, warnings};
use pretty_assertions::assert_eq;

#[test]
fn test_comma_multiline_from_config() {
    let rule = rule_from_toml(
        "member-delimiter-style",
        "[member-delimiter-style.multiline]\ndelimiter = \"comma\"\nrequire-last = true\n",
    );
    assert_eq!(
        fix_once(rule.as_ref(), "interface I {\n  a: string;\n  b: number\n}"),
        "interface I {\n  a: string,\n  b: number,\n}"
    );
}

#[test]
fn test_none_multiline_removes_delimiters() {
    let rule = rule_from_toml(
        "member-delimiter-style",
        "[member-delimiter-style.multiline]\ndelimiter = \"none\"\n",
    );
    assert_eq!(
        message_ids(rule.as_ref(), "interface I {\n  a: string;\n  b: number;\n}"),
        vec!["unexpectedSemi", "unexpectedSemi"]
    );
    assert!(message_ids(rule.as_ref(), "interface I {\n  a: string\n  b: number\n}").is_empty());

    let found = warnings(rule.as_ref(), "interface I {\n  a: string /* why */;\n}");
    assert_eq!(found.len(), 1);
    assert!(found[0].fix.is_none());
}

#[test]
fn test_single_line_defaults() {
    let rule = rule_from_toml("member-delimiter-style", "");
    assert!(message_ids(rule.as_ref(), "type T = { a: string; b: number };").is_empty());
    assert_eq!(
        fix_once(rule.as_ref(), "type T = { a: string; b: number; };"),
        "type T = { a: string; b: number };"
    );
}

#[test]
fn test_interface_override() {
    let rule = rule_from_toml(
        "member-delimiter-style",
        "[member-delimiter-style.overrides.interface.multiline]\ndelimiter = \"comma\"\n",
    );
    assert_eq!(message_ids(rule.as_ref(), "interface I {\n  a: string\n}"), vec!["expectedComma"]);
    assert_eq!(message_ids(rule.as_ref(), "type T = {\n  a: string\n};"), vec!["expectedSemi"]);
}

#[test]
fn test_last_member_detection() {
    let rule = rule_from_toml(
        "member-delimiter-style",
        "[member-delimiter-style]\nmultiline-detection = \"last-member\"\n",
    );
    assert!(message_ids(rule.as_ref(), "type T = {\n  a: string;\n  b: number };").is_empty());
}
