use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_sim::core::{Board, GameState, PieceQueue, Randomizer};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut now = 0u64;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            state.tick(black_box(now));
            if state.game_over() {
                state.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let full = Board::from_rows(&[
        "iiiiiiiiii",
        "iiiiiiiiii",
        "iiiiiiiiii",
        "iiiiiiiiii",
    ])
    .unwrap();

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = full.clone();
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut queue = PieceQueue::new(Randomizer::seeded(12345));

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            black_box(queue.spawn());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut right = true;

    c.bench_function("move", |b| {
        b.iter(|| {
            let moved = if right {
                state.move_right()
            } else {
                state.move_left()
            };
            if !moved {
                right = !right;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(state.rotate_cw());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if !state.hard_drop() {
                state.restart();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_hard_drop
);
criterion_main!(benches);
