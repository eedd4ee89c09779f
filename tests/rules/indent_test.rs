use super::{fix_once, fix_until_stable, message_ids, rule_from_toml, warnings};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_width_from_config() {
    let rule = rule_from_toml("indent", "[indent]\nindent = 2\n");
    let found = warnings(rule.as_ref(), "function f() {\n    return 1;\n}");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "Expected indentation of 2 spaces but found 4.");
    assert_eq!((found[0].line, found[0].column), (2, 1));
}

#[test]
fn test_tabs_from_config() {
    let rule = rule_from_toml("indent", "[indent]\nindent = \"tab\"\n");
    let found = warnings(rule.as_ref(), "if (a) {\n    b();\n}");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "Expected indentation of 1 tab but found 4 spaces.");
    assert_eq!(fix_once(rule.as_ref(), "if (a) {\n    b();\n}"), "if (a) {\n\tb();\n}");
}

#[test]
fn test_switch_case_from_config() {
    let rule = rule_from_toml("indent", "[indent]\nswitch-case = 0\n");
    assert!(message_ids(rule.as_ref(), "switch (a) {\ncase 1:\n    b();\n}").is_empty());
}

#[test]
fn test_ignored_nodes_from_config() {
    let content = "const a = b\n        ? c\n  : d;";
    assert_eq!(message_ids(rule_from_toml("indent", "").as_ref(), content).len(), 2);
    let rule = rule_from_toml("indent", "[indent]\nignored-nodes = [\"ConditionalExpression\"]\n");
    assert!(message_ids(rule.as_ref(), content).is_empty());
}

#[test]
fn test_whole_file_fix_is_stable() {
    let rule = rule_from_toml("indent", "");
    let content = "\
class A {
m(a,
b) {
return {
x: [
1,
],
};
}
}
";
    let expected = "\
class A {
    m(a,
        b) {
        return {
            x: [
                1,
            ],
        };
    }
}
";
    assert_eq!(fix_until_stable(rule, content), expected);
}

#[test]
fn test_interface_and_enum_members() {
    let rule = rule_from_toml("indent", "");
    assert_eq!(
        fix_once(rule.as_ref(), "interface A {\n  a: string;\n}\nenum E {\n  A,\n}"),
        "interface A {\n    a: string;\n}\nenum E {\n    A,\n}"
    );
}

#[test]
fn test_operator_continuation_lines_are_left_alone() {
    let rule = rule_from_toml("indent", "");
    assert!(message_ids(rule.as_ref(), "const a = b +\n            c;").is_empty());
}

const OPENERS: [&str; 3] = ["if (a) {", "while (a) {", "function f() {"];

/// Nested blocks with every line at column zero, and the same nest correctly indented
fn nested_blocks(openers: &[usize], unit: &str) -> (String, String) {
    let mut flat = Vec::new();
    let mut indented = Vec::new();
    for (depth, opener) in openers.iter().enumerate() {
        flat.push(OPENERS[*opener].to_string());
        indented.push(format!("{}{}", unit.repeat(depth), OPENERS[*opener]));
    }
    flat.push("b();".to_string());
    indented.push(format!("{}b();", unit.repeat(openers.len())));
    for depth in (0..openers.len()).rev() {
        flat.push("}".to_string());
        indented.push(format!("{}}}", unit.repeat(depth)));
    }
    (flat.join("\n"), indented.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_nested_depth_accumulates_one_unit_per_level(
        openers in prop::collection::vec(0..OPENERS.len(), 1..8),
        width in prop::sample::select(vec![2usize, 4]),
    ) {
        let rule = rule_from_toml("indent", &format!("[indent]\nindent = {width}\n"));
        let depth = openers.len();
        let (flat, indented) = nested_blocks(&openers, &" ".repeat(width));

        let found = warnings(rule.as_ref(), &flat);
        let innermost = found.iter().find(|w| w.line == depth + 1).expect("innermost line is reported");
        prop_assert_eq!(
            &innermost.message,
            &format!("Expected indentation of {} spaces but found 0.", depth * width)
        );

        let fixed = fix_once(rule.as_ref(), &flat);
        prop_assert_eq!(&fixed, &indented);
        prop_assert!(warnings(rule.as_ref(), &fixed).is_empty());
    }

    #[test]
    fn prop_tab_indentation_counts_levels(openers in prop::collection::vec(0..OPENERS.len(), 1..6)) {
        let rule = rule_from_toml("indent", "[indent]\nindent = \"tab\"\n");
        let (flat, indented) = nested_blocks(&openers, "\t");
        prop_assert_eq!(fix_once(rule.as_ref(), &flat), indented);
    }
}
