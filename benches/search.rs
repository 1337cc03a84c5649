//! Benchmarks for the cube permutation engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use magicube::generators::{discover, edge_corner_table};
use magicube::moves::{parse_sequence, KNOWN_SEQUENCES};
use magicube::{Cube, MoveSearch, SearchConfig, Tolerance};

/// Benchmark composing two generator permutations.
fn bench_compose(c: &mut Criterion) {
    let table = edge_corner_table();
    let (first, second) = (&table.generators()[0], &table.generators()[3]);

    c.bench_function("compose", |b| {
        b.iter(|| black_box(&first.permutation).compose(black_box(&second.permutation)))
    });
}

/// Benchmark recovering the permutation of a scrambled 3x3x3 cube.
fn bench_match_state(c: &mut Criterion) {
    let mut cube = Cube::new(3).unwrap();
    cube.apply_sequence(&parse_sequence(KNOWN_SEQUENCES[0]).unwrap());

    c.bench_function("match_state_3x3", |b| {
        b.iter(|| black_box(&cube).state(Tolerance::default()))
    });
}

/// Benchmark discovering the generators of a 2x2x2 cube.
fn bench_discover(c: &mut Criterion) {
    c.bench_function("discover_2x2", |b| {
        b.iter(|| discover(black_box(2), Tolerance::default()))
    });
}

/// Benchmark a depth 4 search of the 24-facelet table.
fn bench_search_depth_4(c: &mut Criterion) {
    let table = edge_corner_table();
    let config = SearchConfig {
        max_depth: 4,
        ..SearchConfig::default()
    };

    let mut group = c.benchmark_group("search");
    group.sample_size(20);
    group.bench_function("depth_4", |b| {
        b.iter(|| MoveSearch::new(black_box(&table), config.clone()).run(|_| {}))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_compose,
    bench_match_state,
    bench_discover,
    bench_search_depth_4
);
criterion_main!(benches);
