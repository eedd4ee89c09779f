use super::{fix_once, message_ids, rule_from_toml};
use pretty_assertions::assert_eq;

#[test]
fn test_style_from_config() {
    let rule = rule_from_toml("brace-style", "[brace-style]\nstyle = \"allman\"\n");
    let content = "function f() {\n  return 1;\n}\n";
    assert_eq!(message_ids(rule.as_ref(), content), vec!["sameLineOpen"]);
    assert!(message_ids(rule.as_ref(), "function f()\n{\n  return 1;\n}\n").is_empty());
}

#[test]
fn test_allow_single_line_snake_case_alias() {
    let rule = rule_from_toml("brace-style", "[brace_style]\nallow_single_line = true\n");
    assert!(message_ids(rule.as_ref(), "function f() { return 1; }\n").is_empty());
}

#[test]
fn test_else_and_catch_pairs() {
    let rule = rule_from_toml("brace-style", "");
    let content = "if (a) {\n  b();\n}\nelse {\n  c();\n}\n";
    assert_eq!(message_ids(rule.as_ref(), content), vec!["nextLineClose"]);
    assert_eq!(fix_once(rule.as_ref(), content), "if (a) {\n  b();\n} else {\n  c();\n}\n");

    let stroustrup = rule_from_toml("brace-style", "[brace-style]\nstyle = \"stroustrup\"\n");
    assert_eq!(
        message_ids(stroustrup.as_ref(), "try {\n  a();\n} catch (e) {\n  b();\n}\n"),
        vec!["sameLineClose"]
    );
}

#[test]
fn test_typescript_bodies() {
    let rule = rule_from_toml("brace-style", "");
    assert_eq!(message_ids(rule.as_ref(), "interface A\n{\n  a: string;\n}\n"), vec!["nextLineOpen"]);
    assert_eq!(message_ids(rule.as_ref(), "enum E\n{\n  A,\n}\n"), vec!["nextLineOpen"]);
}
