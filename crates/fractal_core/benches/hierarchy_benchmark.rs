//! Benchmark for hierarchy generation and neighbour resolution.
//!
//! Every generated block carries a 243x243 grid, so the numbers are
//! dominated by grid allocation. Resolution on cached links is the hot path
//! of panning.
//!
//! Run with: cargo bench --package fractal_core --bench hierarchy_benchmark

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use fractal_core::{Direction, HierarchyBuilder, CHILD_COUNT};

fn benchmark_child_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("child_generation");
    group.throughput(Throughput::Elements(CHILD_COUNT as u64));
    group.sample_size(20);

    group.bench_function("generate_children", |b| {
        b.iter_batched(
            || {
                let mut builder = HierarchyBuilder::with_defaults();
                let origin = builder.create_origin().unwrap();
                (builder, origin)
            },
            |(mut builder, origin)| black_box(builder.generate_children(origin).unwrap()),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn benchmark_zoom_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoom_out");
    group.sample_size(10);

    group.bench_function("ten_ancestors", |b| {
        b.iter(|| {
            let mut builder = HierarchyBuilder::with_defaults();
            let mut current = builder.create_origin().unwrap();
            for _ in 0..10 {
                current = builder.generate_parent(current).unwrap();
            }
            black_box(current)
        });
    });

    group.finish();
}

fn benchmark_cached_pan(c: &mut Criterion) {
    let mut builder = HierarchyBuilder::with_defaults();
    let origin = builder.create_origin().unwrap();
    let right = builder.resolve_neighbor(origin, Direction::Right).unwrap();

    c.bench_function("cached_neighbor_round_trip", |b| {
        b.iter(|| {
            let there = builder.resolve_neighbor(black_box(origin), Direction::Right).unwrap();
            black_box(builder.resolve_neighbor(there, Direction::Left).unwrap())
        });
    });

    assert_eq!(builder.resolve_neighbor(origin, Direction::Right).unwrap(), right);
}

fn benchmark_fresh_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("fresh_pan");
    group.sample_size(10);

    group.bench_function("walk_right_27", |b| {
        b.iter(|| {
            let mut builder = HierarchyBuilder::with_defaults();
            let mut current = builder.create_origin().unwrap();
            for _ in 0..27 {
                current = builder.resolve_neighbor(current, Direction::Right).unwrap();
            }
            black_box(builder.registry().len())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_child_generation,
    benchmark_zoom_out,
    benchmark_cached_pan,
    benchmark_fresh_pan
);
criterion_main!(benches);
