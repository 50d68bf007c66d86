use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minefield_core::{Difficulty, MinefieldEngine};

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for difficulty in [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ] {
        group.bench_function(format!("{:?}", difficulty), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(MinefieldEngine::with_seed(difficulty, seed))
            });
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // Worst case: a mine-free expert board, opening the center floods all
    // 1024 cells.
    c.bench_function("flood_fill_full_expert_board", |b| {
        b.iter(|| {
            let mut engine = MinefieldEngine::from_mine_coords(32, &[]).unwrap();
            engine.open_cell(black_box((16, 16))).unwrap()
        });
    });
}

criterion_group!(benches, bench_construction, bench_flood_fill);
criterion_main!(benches);
