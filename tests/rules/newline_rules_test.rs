use super::{fix_once, message_ids, rule_from_toml, warnings};
use pretty_assertions::assert_eq;

#[test]
fn test_curly_newline_overrides_from_config() {
    let rule = rule_from_toml(
        "curly-newline",
        "[curly-newline]\nstyle = \"never\"\n[curly-newline.overrides]\nClassBody = \"always\"\n",
    );
    assert_eq!(
        message_ids(rule.as_ref(), "class A { m() {} }"),
        vec!["expectedLinebreakAfterOpeningBrace", "expectedLinebreakBeforeClosingBrace"]
    );
    assert_eq!(fix_once(rule.as_ref(), "function f() {\n  return 1;\n}"), "function f() {return 1;}");
}

#[test]
fn test_curly_newline_comment_suppresses_fix_only() {
    let rule = rule_from_toml("curly-newline", "[curly-newline]\nstyle = \"never\"\n");
    let found = warnings(rule.as_ref(), "if (a) { // note\n  b();\n}");
    assert_eq!(found.len(), 2);
    assert!(found[0].fix.is_none());
    assert!(found[1].fix.is_some());
}

#[test]
fn test_object_curly_newline_multiline() {
    let rule = rule_from_toml("object-curly-newline", "[object-curly-newline]\nmultiline = true\n");
    let content = "const a = { b: 1,\n  c: 2 };\n";
    assert_eq!(
        message_ids(rule.as_ref(), content),
        vec!["expectedLinebreakAfterOpeningBrace", "expectedLinebreakBeforeClosingBrace"]
    );
    assert_eq!(fix_once(rule.as_ref(), content), "const a = {\n b: 1,\n  c: 2 \n};\n");
}

#[test]
fn test_object_curly_newline_min_properties_alias() {
    let rule = rule_from_toml("object-curly-newline", "[object-curly-newline]\nmin-properties = 2\n");
    assert_eq!(message_ids(rule.as_ref(), "const a = { b, c };").len(), 2);
    assert!(message_ids(rule.as_ref(), "const a = { b };").is_empty());
}

#[test]
fn test_object_curly_newline_consistent_default() {
    let rule = rule_from_toml("object-curly-newline", "");
    assert_eq!(
        message_ids(rule.as_ref(), "const a = { b: 1,\n  c: 2\n};\n"),
        vec!["unexpectedLinebreakBeforeClosingBrace"]
    );
}

#[test]
fn test_array_bracket_newline_default_and_never() {
    let rule = rule_from_toml("array-bracket-newline", "");
    assert_eq!(fix_once(rule.as_ref(), "const a = [\n  1, 2\n];"), "const a = [1, 2];");

    let never = rule_from_toml("array-bracket-newline", "[array-bracket-newline]\nstyle = \"never\"\n");
    assert_eq!(
        fix_once(never.as_ref(), "const [\n  a\n]: [\n  number\n] = x;"),
        "const [a]: [number] = x;"
    );
}

#[test]
fn test_array_bracket_newline_min_elements() {
    let rule = rule_from_toml("array-bracket-newline", "[array-bracket-newline]\nmin-elements = 3\n");
    assert_eq!(message_ids(rule.as_ref(), "const a = [1, , 3];").len(), 2);
    assert!(message_ids(rule.as_ref(), "const a = [1, 3];").is_empty());
}
