use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fianchetto::{Move, Position, STANDARD_POSITION};

fn perft(position: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    if depth == 1 {
        return position.legal_moves().len() as u64;
    }

    let moves: Vec<Move> = position.legal_moves().to_vec();
    let mut nodes = 0u64;
    for mv in &moves {
        position.push(mv).expect("generated move must push");
        nodes += perft(position, depth - 1);
        position.undo();
    }
    nodes
}

fn perft_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    group.bench_function("start_depth_1", |b| {
        let mut position = Position::new();
        b.iter(|| perft(black_box(&mut position), black_box(1)))
    });

    group.bench_function("start_depth_2", |b| {
        let mut position = Position::new();
        b.iter(|| perft(black_box(&mut position), black_box(2)))
    });

    group.bench_function("start_depth_3", |b| {
        let mut position = Position::from_fen(STANDARD_POSITION).expect("valid fen");
        b.iter(|| perft(black_box(&mut position), black_box(3)))
    });

    group.finish();
}

criterion_group!(benches, perft_benchmarks);
criterion_main!(benches);
