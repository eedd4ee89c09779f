use super::{fix_once, message_ids, rule_from_toml, warnings};
use pretty_assertions::assert_eq;

#[test]
fn test_always_from_config() {
    let rule = rule_from_toml("object-curly-spacing", "[object-curly-spacing]\nstyle = \"always\"\n");
    assert_eq!(fix_once(rule.as_ref(), "const {a, b} = c;"), "const { a, b } = c;");
    assert_eq!(fix_once(rule.as_ref(), "import a, {b} from 'm';"), "import a, { b } from 'm';");

    let found = warnings(rule.as_ref(), "const {a, b} = c;");
    assert_eq!(found[0].message, "A space is required after '{'.");
}

#[test]
fn test_never_is_default() {
    let rule = rule_from_toml("object-curly-spacing", "");
    assert_eq!(
        message_ids(rule.as_ref(), "const a = { b: 1 };"),
        vec!["unexpectedSpaceAfter", "unexpectedSpaceBefore"]
    );
    assert_eq!(fix_once(rule.as_ref(), "type T = { a: string };"), "type T = {a: string};");
}

#[test]
fn test_exceptions_from_config() {
    let rule = rule_from_toml(
        "object-curly-spacing",
        "[object-curly-spacing]\nstyle = \"always\"\narrays_in_objects = false\nobjects-in-objects = false\n",
    );
    assert!(message_ids(rule.as_ref(), "const a = { b: [1]};").is_empty());
    assert!(message_ids(rule.as_ref(), "const a = { b: { c: 1 }};").is_empty());
    assert_eq!(message_ids(rule.as_ref(), "const a = { b: [1] };"), vec!["unexpectedSpaceBefore"]);
}
