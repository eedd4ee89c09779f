use super::{fix_until_stable, rule_from_toml, warnings};

/// (rule, configuration, violating input)
const CASES: &[(&str, &str, &str)] = &[
    ("brace-style", "", "if (foo)\n{\nbar();\n}"),
    ("brace-style", "[brace-style]\nstyle = \"allman\"\n", "function f() {\n  return 1;\n}\n"),
    ("curly-newline", "[curly-newline]\nstyle = \"always\"\n", "{}"),
    ("curly-newline", "", "if (a) {\n  b(); }\n"),
    ("object-curly-newline", "[object-curly-newline]\nmultiline = true\n", "const a = { b: 1,\n  c: 2 };\n"),
    ("array-bracket-newline", "", "const a = [1,\n  2];"),
    ("object-curly-spacing", "", "const a = { b: 1 };"),
    ("object-curly-spacing", "[object-curly-spacing]\nstyle = \"always\"\n", "import a, {b} from 'm';"),
    ("comma-style", "", "var foo = 1\n,bar = 2;"),
    ("comma-style", "[comma-style]\nstyle = \"first\"\n", "const a = {\n  b: 1,\n  c: 2\n};"),
    ("member-delimiter-style", "", "interface Foo {\nname: string\nage: number\n}"),
    ("member-delimiter-style", "", "type T = { a: string; b: number; };"),
    ("operator-linebreak", "", "const a = b\n  + c;"),
    ("operator-linebreak", "[operator-linebreak]\nstyle = \"before\"\n", "if (a &&\n    b) {}"),
    ("indent", "", "type Foo = {\nbar : string,\nage : number,\n}"),
    ("indent", "[indent]\nindent = \"tab\"\n", "function f() {\n  if (a) {\n  b();\n  }\n}"),
    ("no-extra-semi", "", "a();;;"),
    // empty constructs and block comments
    ("indent", "", "function f() {\n  }\nfoo(\n  );\nconst a = [\n  ];\n"),
    ("indent", "", "/* lead */\nif (a) {\nb(); /* tail */\n}\n"),
    ("brace-style", "", "/** doc */\nif (foo)\n{\nbar();\n}"),
    ("member-delimiter-style", "", "interface I {\n  a: string /* c */\n}"),
    ("no-extra-semi", "", "/* c */ a();;"),
];

#[test]
fn test_fixed_output_is_clean_for_every_rule() {
    for (name, toml, content) in CASES {
        let rule = rule_from_toml(name, toml);
        assert!(
            !warnings(rule.as_ref(), content).is_empty(),
            "{name}: expected violations in {content:?}"
        );

        let fixed = fix_until_stable(rule_from_toml(name, toml), content);
        assert_ne!(&fixed, content, "{name}: nothing was fixed");
        let remaining = warnings(rule.as_ref(), &fixed);
        assert!(remaining.is_empty(), "{name}: {fixed:?} still reports {remaining:?}");
    }
}

#[test]
fn test_clean_input_is_untouched_by_all_rules() {
    let config = stylint_lib::config::Config::default();
    let rules = stylint_lib::rules::all_rules(&config, &stylint_lib::utils::warn_once::WarnOnce::new());
    let content = "\
function add(a, b) {
    if (a > b) {
        return a - b;
    }
    const total = a +
        b;
    return {total};
}
";
    assert_eq!(stylint_lib::lint(content, &rules).unwrap(), vec![]);
    assert_eq!(stylint_lib::fix(content, &rules).unwrap(), content);
}
