#![no_main]

//! Fuzz target for the lexer, parser and every rule's check.
//! Input that fails to parse must come back as an error, never a panic.

use libfuzzer_sys::fuzz_target;
use stylint_lib::config::Config;
use stylint_lib::rules::all_rules;
use stylint_lib::utils::warn_once::WarnOnce;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    if content.len() > 50_000 {
        return;
    }

    let rules = all_rules(&Config::default(), &WarnOnce::new());
    let Ok(warnings) = stylint_lib::lint(content, &rules) else {
        return;
    };

    for warning in &warnings {
        assert!(warning.line >= 1 && warning.column >= 1, "positions are 1-based");
        if let Some(fix) = &warning.fix {
            assert!(fix.range.start <= fix.range.end && fix.range.end <= content.len());
            assert!(content.is_char_boundary(fix.range.start) && content.is_char_boundary(fix.range.end));
        }
    }
});
