//! # Model Benchmarks
//!
//! Performance benchmarks for amber-core curve and template operations.
//!
//! Run with: `cargo bench -p amber-core`

use amber_core::{CurveBucket, CurveFeed, CurveTable, render_lines, render_template};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Create a feed of `levels` buckets, each defining `curves` curves.
fn create_feed(levels: usize, curves: usize) -> CurveFeed {
    (1..=levels)
        .map(|level| {
            let pairs = (0..curves).map(|c| (format!("GROW_CURVE_{}", c), level as f64 * 0.1));
            (level, CurveBucket::from_pairs(pairs))
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_curve_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve_table_build");

    for curves in [10, 100, 500].iter() {
        let feed = create_feed(100, *curves);

        group.bench_with_input(BenchmarkId::from_parameter(curves), &feed, |b, feed| {
            b.iter(|| black_box(CurveTable::build([feed])));
        });
    }

    group.finish();
}

fn bench_curve_evaluate(c: &mut Criterion) {
    let table = CurveTable::build([&create_feed(100, 50)]).expect("build");
    let value = table
        .curved_value("GROW_CURVE_25", 1000.0)
        .expect("curve should exist");

    c.bench_function("curve_evaluate", |b| {
        b.iter(|| black_box(value.evaluate(black_box(90))));
    });
}

fn bench_render_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_template");

    for placeholders in [1, 4, 16].iter() {
        let source: String = (1..=*placeholders)
            .map(|i| format!("Hit {}|{{param{}:F1P}} ", i, i))
            .collect();
        let params: Vec<f64> = (0..*placeholders).map(|i| 0.4 + i as f64 * 0.01).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(placeholders),
            &(source, params),
            |b, (source, params)| {
                b.iter(|| black_box(render_template(source, params)));
            },
        );
    }

    group.finish();
}

fn bench_render_lines(c: &mut Criterion) {
    let lines = [
        "1-Hit DMG|{param1:F1P}",
        "2-Hit DMG|{param2:F1P}",
        "",
        "Charged Attack DMG|{param3:F1P}+{param4:F1P}",
        "Stamina Cost|{param5:F1}",
        "Plunge DMG|{param6:F1P}/{param7:P}",
    ];
    let params = [0.4689, 0.4825, 0.6039, 0.6039, 25.0, 0.6393, 1.2784];

    c.bench_function("render_lines", |b| {
        b.iter(|| black_box(render_lines(&lines, &params)));
    });
}

criterion_group!(
    benches,
    bench_curve_table_build,
    bench_curve_evaluate,
    bench_render_template,
    bench_render_lines
);
criterion_main!(benches);
