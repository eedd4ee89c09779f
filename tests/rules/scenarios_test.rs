use super::{fix_once, message_ids, rule_from_toml, warnings};
use pretty_assertions::assert_eq;

#[test]
fn test_brace_on_next_line_under_1tbs() {
    let rule = rule_from_toml("brace-style", "");
    let content = "if (foo)\n{\nbar();\n}";
    assert_eq!(message_ids(rule.as_ref(), content), vec!["nextLineOpen"]);
    assert_eq!(fix_once(rule.as_ref(), content), "if (foo) {\nbar();\n}");
}

#[test]
fn test_empty_block_under_curly_newline_always() {
    let rule = rule_from_toml("curly-newline", "[curly-newline]\nstyle = \"always\"\n");
    assert_eq!(
        message_ids(rule.as_ref(), "{}"),
        vec!["expectedLinebreakAfterOpeningBrace", "expectedLinebreakBeforeClosingBrace"]
    );
    assert_eq!(fix_once(rule.as_ref(), "{}"), "{\n}");
}

#[test]
fn test_leading_comma_under_comma_style_last() {
    let rule = rule_from_toml("comma-style", "");
    let content = "var foo = 1\n,bar = 2;";
    assert_eq!(message_ids(rule.as_ref(), content), vec!["expectedCommaLast"]);
    assert_eq!(fix_once(rule.as_ref(), content), "var foo = 1,\nbar = 2;");
}

#[test]
fn test_missing_semicolons_in_interface() {
    let rule = rule_from_toml("member-delimiter-style", "");
    let content = "interface Foo {\nname: string\nage: number\n}";
    assert_eq!(message_ids(rule.as_ref(), content), vec!["expectedSemi", "expectedSemi"]);
    assert_eq!(
        fix_once(rule.as_ref(), content),
        "interface Foo {\nname: string;\nage: number;\n}"
    );
}

#[test]
fn test_unindented_type_literal_members() {
    let rule = rule_from_toml("indent", "");
    let content = "type Foo = {\nbar : string,\nage : number,\n}";
    let found = warnings(rule.as_ref(), content);
    assert_eq!(found.len(), 2);
    for (warning, line) in found.iter().zip([2, 3]) {
        assert_eq!(warning.message_id, "wrongIndentation");
        assert_eq!(warning.line, line);
        assert_eq!(warning.message, "Expected indentation of 4 spaces but found 0.");
    }
    assert_eq!(
        fix_once(rule.as_ref(), content),
        "type Foo = {\n    bar : string,\n    age : number,\n}"
    );
}
