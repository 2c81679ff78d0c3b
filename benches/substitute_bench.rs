//! Benchmark: Template Substitution
//!
//! Measures scanning and full substitution across template shapes.
//! Run: cargo bench --bench substitute_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use sigil::{scan, substitute, Context, Formatter};

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    group.bench_function("no_placeholders", |b| {
        b.iter(|| black_box(scan(black_box("Simple text with no placeholders at all"))));
    });

    group.bench_function("mixed", |b| {
        b.iter(|| black_box(scan(black_box("User $name ran $0 of $1 with $opts ($2)"))));
    });

    group.finish();
}

fn bench_substitute(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute");

    let mut ctx = Context::new()
        .with("name", "john")
        .with("opts", json!({"retries": 3, "tags": ["a", "b"]}));
    ctx.set_formatted(
        "shout",
        "hey",
        Formatter::new(|v| v.as_str().unwrap_or_default().to_uppercase()),
    );
    let args = [json!("a"), json!(2), json!([1, 2, 3])];
    let formatters = [None, Some(Formatter::new(|v| v.as_i64().unwrap_or(0) * 10))];

    // Borrowed fast path
    group.bench_function("identity", |b| {
        b.iter(|| {
            let out = substitute(black_box("Nothing to do here"), &args, Some(&ctx), &formatters);
            black_box(out)
        });
    });

    group.bench_function("named_only", |b| {
        b.iter(|| {
            let out = substitute(black_box("User $name logged in"), &[], Some(&ctx), &[]);
            black_box(out)
        });
    });

    group.bench_function("mixed_with_formatters", |b| {
        b.iter(|| {
            let out = substitute(
                black_box("$shout $name ran $0 x$1 over $2 with $opts"),
                &args,
                Some(&ctx),
                &formatters,
            );
            black_box(out)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_scan, bench_substitute);
criterion_main!(benches);
