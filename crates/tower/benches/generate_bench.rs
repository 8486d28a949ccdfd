//! Criterion benchmarks for tower generation and relighting.
//!
//! Benchmarks:
//!   - generate at 10, 23 and 60 floors (showcase variant)
//!   - generate the walkable variant at 60 floors
//!   - apply_lighting at night over a 60-floor tower
//!
//! Run with: cargo bench -p tower --bench generate_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tower::generator::{generate, generate_variant, TowerVariant};
use tower::lighting::{apply_lighting, LightingMode};
use tower::params::BuildingParameters;

fn params(floors: u32) -> BuildingParameters {
    BuildingParameters {
        floors,
        fin_count: 12,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Benchmark: generate
// ---------------------------------------------------------------------------

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("tower_generate");

    for floors in [10_u32, 23, 60] {
        let p = params(floors);
        group.bench_with_input(BenchmarkId::new("showcase", floors), &p, |b, p| {
            b.iter(|| black_box(generate(black_box(p))));
        });
    }

    let p = params(60);
    group.bench_function("walkable_60", |b| {
        b.iter(|| black_box(generate_variant(black_box(&p), TowerVariant::Walkable)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: relight
// ---------------------------------------------------------------------------

fn bench_apply_lighting(c: &mut Criterion) {
    let mut group = c.benchmark_group("tower_lighting");

    let Ok(mut subtree) = generate(&params(60)) else {
        panic!("benchmark parameters must be valid");
    };

    group.bench_function("night_60_floors", |b| {
        b.iter(|| apply_lighting(subtree.windows_mut(), black_box(7), LightingMode::Night));
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_apply_lighting);
criterion_main!(benches);
