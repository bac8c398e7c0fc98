//! Performance benchmarks for the Reef front end.
//!
//! - Lexing alone, with and without comments
//! - Parsing each sample script
//! - A synthetic stress file built by repeating the samples

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use reef::{parse, significant, tokenize, Bump};
use std::hint::black_box;

const SCRIPTS: [(&str, &str); 5] = [
    ("hello_world", include_str!("../test_scripts/hello_world.reef")),
    ("expressions", include_str!("../test_scripts/expressions.reef")),
    ("control_flow", include_str!("../test_scripts/control_flow.reef")),
    ("classes", include_str!("../test_scripts/classes.reef")),
    ("unions", include_str!("../test_scripts/unions.reef")),
];

/// Benchmark the lexer on its own
fn lexer_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, source) in SCRIPTS {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                black_box(tokenize(black_box(source), &arena).count())
            });
        });
    }

    let control_flow = SCRIPTS[2].1;
    group.throughput(Throughput::Bytes(control_flow.len() as u64));
    group.bench_function("control_flow_significant", |b| {
        b.iter(|| {
            let arena = Bump::new();
            black_box(significant(tokenize(black_box(control_flow), &arena)).count())
        });
    });

    group.finish();
}

/// Benchmark parsing of each sample script
fn script_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/scripts");

    for (name, source) in SCRIPTS {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let (program, errors) = parse(black_box(source), &arena);
                black_box((program.functions.len(), errors.len()))
            });
        });
    }

    group.finish();
}

/// Benchmark a large file made of every sample repeated
fn stress_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/stress");

    let mut source = String::new();
    for _ in 0..50 {
        for (_, script) in SCRIPTS {
            source.push_str(script);
            source.push('\n');
        }
    }

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("all_scripts_x50", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let (program, errors) = parse(black_box(&source), &arena);
            black_box((program.functions.len(), errors.len()))
        });
    });

    group.finish();
}

criterion_group!(benches, lexer_benchmarks, script_benchmarks, stress_benchmarks);
criterion_main!(benches);
