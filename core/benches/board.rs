use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sweeper_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{difficulty:?}")),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    RandomBoardGenerator::seeded(seed)
                        .generate(black_box(config))
                        .unwrap()
                })
            },
        );
    }

    // rejection sampling worst case: almost every draw lands on a mine
    let dense = GameConfig::new((30, 16), 479).unwrap();
    group.bench_function("dense", |b| {
        b.iter(|| RandomBoardGenerator::seeded(7).generate(black_box(dense)).unwrap())
    });
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // one mine in a corner, the first click opens everything else
    let board = Board::from_mine_coords((255, 255), &[(254, 254)]).unwrap();
    c.bench_function("flood_fill_255x255", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| board.explore(black_box((0, 0))).unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
