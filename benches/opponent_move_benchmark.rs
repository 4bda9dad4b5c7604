use chess_match::engine::{MoveEngine, ShakmatyEngine};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const PLIES: usize = 20;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("opponent self-play");
    for difficulty in 1..=3u8 {
        group.bench_with_input(
            BenchmarkId::new("difficulty", difficulty),
            &difficulty,
            |b, &difficulty| b.iter(|| self_play(difficulty)),
        );
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

/// Lets the opponent play both sides for a fixed number of plies.
fn self_play(difficulty: u8) {
    let mut engine = ShakmatyEngine::seeded(7);
    engine.new_game();

    for _ in 0..PLIES {
        if engine.terminal_state().finished {
            break;
        }
        let chosen = engine.choose_move(difficulty).unwrap();
        engine.apply_move(chosen.from, chosen.to).unwrap();
    }
}
