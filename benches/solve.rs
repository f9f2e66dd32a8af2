use criterion::{criterion_group, criterion_main, Criterion};
use polyomino_tiler::{ParseConfig, PieceSet, Solver};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    // A single tromino type tiling a 6x4 board exercises rotation handling
    // and a search deep enough to be representative of the hot loop.
    let set = PieceSet::build(&[("10\n10\n11", 8)], ParseConfig::default()).unwrap();
    group.bench_function("tromino_6x4", |b| {
        b.iter(|| {
            let mut solver = Solver::new(&set, 6, 4);
            solver.solve()
        });
    });

    // A 70-wide board forces row_words = 2; tiling it with 7-wide rectangles
    // places one copy at x = 63, which straddles the word boundary, so this
    // bench is the one that exercises apply_rows's overlapping branch rather
    // than the word-aligned case above.
    let wide_set = PieceSet::build(&[("1111111\n1111111", 10)], ParseConfig::default()).unwrap();
    group.bench_function("rectangle_70x2_overlapping", |b| {
        b.iter(|| {
            let mut solver = Solver::new(&wide_set, 70, 2);
            solver.solve()
        });
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
