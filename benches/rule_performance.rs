use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use stylint_lib::config::Config;
use stylint_lib::lint_context::LintContext;
use stylint_lib::rule::Rule;
use stylint_lib::rules::*;
use stylint_lib::utils::warn_once::WarnOnce;

/// Generate TypeScript with a mix of clean and badly laid out constructs
fn generate_source(size: usize) -> String {
    let mut content = String::with_capacity(size * 200);

    for i in 0..size {
        // interface without delimiters, members under-indented
        if i % 4 == 0 {
            content.push_str(&format!("interface Shape{i} {{\n  id: number\n  name: string\n}}\n\n"));
        }

        // brace on its own line, comma-first declarations
        if i % 5 == 0 {
            content.push_str(&format!("function run{i}(a, b)\n{{\n  var x = a\n    , y = b;;\n  return x\n    + y;\n}}\n\n"));
        }

        // object and array literals with inconsistent breaks and spacing
        if i % 3 == 0 {
            content.push_str(&format!("const cfg{i} = {{ a: [1,\n  2], b: {{ c: {i} }}\n}};\n\n"));
        }

        // clean code
        content.push_str(&format!(
            "class Item{i} {{\n    value(n) {{\n        if (n > {i}) {{\n            return n;\n        }}\n        return {i};\n    }}\n}}\n\n"
        ));
    }

    content
}

fn bench_check(c: &mut Criterion) {
    let rules = all_rules(&Config::default(), &WarnOnce::new());
    let content = generate_source(200);

    c.bench_function("context build", |b| b.iter(|| LintContext::new(black_box(&content))));

    let ctx = LintContext::new(&content).unwrap();
    for rule in &rules {
        c.bench_function(&format!("{} check", rule.name()), |b| {
            b.iter(|| rule.check(black_box(&ctx)))
        });
    }

    c.bench_function("all rules lint", |b| {
        b.iter(|| stylint_lib::lint(black_box(&content), &rules))
    });
}

fn bench_fix(c: &mut Criterion) {
    let rules = all_rules(&Config::default(), &WarnOnce::new());
    let content = generate_source(200);

    let indent = Indent::default();
    let ctx = LintContext::new(&content).unwrap();
    c.bench_function("indent fix", |b| b.iter(|| indent.fix(black_box(&ctx))));

    c.bench_function("all rules fix until stable", |b| {
        b.iter(|| stylint_lib::fix(black_box(&content), &rules))
    });
}

criterion_group!(benches, bench_check, bench_fix);
criterion_main!(benches);
