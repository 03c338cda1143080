use criterion::{black_box, criterion_group, criterion_main, Criterion};
use janggi::{movegen, Board, GameState, Rules, Side, Square};

const BOARDS: [(&str, &str); 4] = [
    (
        "initial",
        "reha1aehr/4g4/1c5c1/s1s1s1s1s/9/9/S1S1S1S1S/1C5C1/4G4/REHA1AEHR",
    ),
    (
        "opened",
        "reha1aehr/4g4/1c5c1/s3s3s/2s3s2/2S3S2/S3S3S/1C5C1/4G4/REHA1AEHR",
    ),
    ("palace_fight", "3a1a3/4g4/4R4/9/9/9/9/4r4/3AGA3/9"),
    ("cannons", "4g4/9/1c5c1/9/1C5C1/9/1c5c1/9/4G4/9"),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, layout)| (name, Board::from_layout(layout).unwrap()))
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::gen_moves(&board, Side::Blue, &Rules::default()).len()))
        });
    }
}

fn bench_gen_moves_strict(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves_strict");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::gen_moves(&board, Side::Blue, &Rules::strict()).len()))
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for side in [Side::Blue, Side::Red] {
                    for sq in Square::iter() {
                        black_box(movegen::is_square_attacked(&board, sq, side));
                    }
                }
            })
        });
    }
}

fn bench_has_safe_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_safe_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::has_safe_moves(&board, Side::Red)))
        });
    }
}

fn bench_select(c: &mut Criterion) {
    let src = "c10".parse().unwrap();
    let dst = "d8".parse().unwrap();
    c.bench_function("select_and_move", |b| {
        b.iter(|| {
            let mut game = GameState::with_rules(Rules::strict());
            game.select(src);
            black_box(game.select(dst));
        })
    });
}

criterion_group!(
    janggi,
    bench_gen_moves,
    bench_gen_moves_strict,
    bench_is_attacked,
    bench_has_safe_moves,
    bench_select,
);

criterion_main!(janggi);
