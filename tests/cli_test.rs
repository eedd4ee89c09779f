use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const BAD_INDENT: &str = "function f() {\n  return 1;\n}\n";
const CLEAN: &str = "function f() {\n    return 1;\n}\n";

#[test]
fn test_list_rules() {
    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.arg("--list-rules");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("brace-style"))
        .stdout(predicate::str::contains("member-delimiter-style"))
        .stdout(predicate::str::contains("no-extra-semi"));
}

#[test]
fn test_clean_file_exits_zero() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("clean.js"), CLEAN).unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).arg("--no-color").arg("clean.js");
    cmd.assert()
        .code(0)
        .stdout(predicate::str::contains("No issues found in 1 file"));
}

#[test]
fn test_violation_exits_one() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("bad.js"), BAD_INDENT).unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).arg("--no-color").arg("bad.js");
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("bad.js:2:1: [indent]"))
        .stdout(predicate::str::contains("Expected indentation of 4 spaces but found 2."))
        .stdout(predicate::str::contains("[*]"));
}

#[test]
fn test_fix_rewrites_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("bad.ts");
    fs::write(&path, "interface Foo {\nname: string\nage: number\n}\n").unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).args(["--no-color", "--fix", "bad.ts"]);
    cmd.assert().code(0).stdout(predicate::str::contains("Fixed"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "interface Foo {\n    name: string;\n    age: number;\n}\n"
    );
}

#[test]
fn test_json_output() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("bad.js"), BAD_INDENT).unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).args(["--output-format", "json", "bad.js"]);
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let warnings = parsed.as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["file"], "bad.js");
    assert_eq!(warnings[0]["rule"], "indent");
    assert_eq!(warnings[0]["messageId"], "wrongIndentation");
    assert_eq!(warnings[0]["line"], 2);
}

#[test]
fn test_disable_rule() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("bad.js"), BAD_INDENT).unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).args(["--no-color", "--disable", "indent", "bad.js"]);
    cmd.assert().code(0);
}

#[test]
fn test_config_file_is_discovered() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".stylint.toml"), "[indent]\nindent = 2\n").unwrap();
    fs::write(temp_dir.path().join("bad.js"), BAD_INDENT).unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).args(["--no-color", "bad.js"]);
    cmd.assert().code(0);
}

#[test]
fn test_directory_walk_uses_extensions_and_exclude() {
    let temp_dir = tempdir().unwrap();
    let src = temp_dir.path().join("src");
    let vendor = temp_dir.path().join("vendor");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&vendor).unwrap();
    fs::write(src.join("a.ts"), BAD_INDENT).unwrap();
    fs::write(src.join("notes.txt"), BAD_INDENT).unwrap();
    fs::write(vendor.join("lib.js"), BAD_INDENT).unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path())
        .args(["--no-color", "--exclude", "vendor", "."]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("a.ts"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains("lib.js").not())
        .stdout(predicate::str::contains("in 1 file"));
}

#[test]
fn test_missing_path_is_tool_error() {
    let temp_dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).arg("missing.js");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_unknown_rule_in_config_is_tool_error() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join(".stylint.toml"), "[no-such-rule]\nstyle = 1\n").unwrap();
    fs::write(temp_dir.path().join("clean.js"), CLEAN).unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).arg("clean.js");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("no-such-rule"));
}

#[test]
fn test_parse_error_is_tool_error() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("broken.js"), "if (\n").unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).arg("broken.js");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("broken.js"));
}

#[test]
fn test_default_config_round_trips() {
    let temp_dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("stylint");
    let output = cmd.arg("--default-config").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let printed = String::from_utf8(output.stdout).unwrap();
    assert!(printed.contains("[global]"));
    assert!(printed.contains("[indent]"));
    assert!(printed.contains("[brace-style]"));

    // the printed defaults are a valid configuration that changes nothing
    fs::write(temp_dir.path().join(".stylint.toml"), &printed).unwrap();
    fs::write(temp_dir.path().join("bad.js"), BAD_INDENT).unwrap();
    let mut cmd = cargo_bin_cmd!("stylint");
    cmd.current_dir(temp_dir.path()).args(["--no-color", "bad.js"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Expected indentation of 4 spaces but found 2."));
}
