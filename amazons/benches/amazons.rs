use amazons::{engine, movegen, Board, Engine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const POSITIONS: [(&'static str, &'static str); 7] = [
    ("initial_6", engine::DEFAULT_6),
    ("initial_8", engine::DEFAULT_8),
    ("initial_10", engine::DEFAULT_10),
    (
        "middle",
        "3b2b3/1x8/2x2x4/b2x4xb/4x5/1x3x4/w2x4w1/3x6/x1x3x3/3w2w3 w - 9",
    ),
    ("shooting", "3b2b3/10/10/b8b/10/10/w8w/3w6/10/6w3 w d3 1"),
    ("crowded", "xxbxxxbxxx/xx1xx1xxxx/x1xx1xxxxx/bxxxxxxx1b/x1xxxx1xxx/1xxxxxxxx1/w1xxxxxxxw/xxxxxx1xxx/xxx1xxxxxx/xxxwxxwxxx b - 40"),
    ("large", "5b8b5/20/20/20/20/20/b18b/20/20/20/20/20/20/w18w/20/20/20/20/20/5w8w5 w - 1"),
];

fn engines() -> impl Iterator<Item = (&'static str, Engine)> {
    POSITIONS
        .iter()
        .map(|&(name, fen)| (name, Engine::from_fen(fen).unwrap()))
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, engine) in engines() {
        let board = engine.board().clone();
        let (turn, shooting) = (engine.turn(), engine.shooting());
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::gen_moves(&board, turn, shooting).len()))
        });
    }
}

fn bench_vision(c: &mut Criterion) {
    let mut group = c.benchmark_group("vision");
    for (name, engine) in engines() {
        let board = engine.board().clone();
        group.bench_function(name, |b| {
            b.iter(|| {
                for sq in board.squares() {
                    black_box(board.vision(sq).len());
                }
            })
        });
    }
}

fn bench_make_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_undo");
    for (name, mut engine) in engines() {
        let moves = engine.moves().to_vec();
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    engine.make_move(*mv);
                    black_box(engine.undo());
                }
            })
        });
    }
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    for (name, mut engine) in engines() {
        let moves = engine.moves().to_vec();
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    black_box(engine.push(*mv).is_ok());
                    engine.undo();
                }
            })
        });
    }
}

fn bench_fen(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");
    for &(name, fen) in &POSITIONS {
        group.bench_function(name, |b| {
            b.iter(|| black_box(Engine::from_fen(fen).unwrap().as_fen()))
        });
    }
}

fn bench_has_queen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_queen_moves");
    for (name, engine) in engines() {
        let board: Board = engine.board().clone();
        let turn = engine.turn();
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::has_queen_moves(&board, turn)))
        });
    }
}

criterion_group!(
    amazons,
    bench_gen_moves,
    bench_vision,
    bench_make_undo,
    bench_push,
    bench_fen,
    bench_has_queen_moves,
);

criterion_main!(amazons);
