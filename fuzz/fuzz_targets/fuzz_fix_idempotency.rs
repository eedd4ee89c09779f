#![no_main]

//! Fuzz target that verifies fix idempotency:
//! content fixed to a stable point must parse and must not change when fixed again.

use libfuzzer_sys::fuzz_target;
use stylint_lib::config::Config;
use stylint_lib::fix_coordinator::{DEFAULT_MAX_PASSES, FixCoordinator};
use stylint_lib::rules::all_rules;
use stylint_lib::utils::warn_once::WarnOnce;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Skip extreme inputs
    if content.is_empty() || content.len() > 50_000 {
        return;
    }

    let rules = all_rules(&Config::default(), &WarnOnce::new());
    let coordinator = FixCoordinator::new();
    let Ok(first) = coordinator.fix_until_stable(content, &rules, DEFAULT_MAX_PASSES) else {
        return;
    };

    // Hitting the pass cap means the content was not stable yet
    if first.passes == DEFAULT_MAX_PASSES || first.fixes_applied == 0 {
        return;
    }

    let second = coordinator
        .fix_until_stable(&first.content, &rules, DEFAULT_MAX_PASSES)
        .expect("fixed content must still parse");
    assert_eq!(first.content, second.content, "Fix is not idempotent");
});
