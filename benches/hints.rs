//! Hint generation and replay throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_solitaire::games;
use rust_solitaire::{AutoPilot, Game};

fn bench_hints(c: &mut Criterion) {
    let m = games::builtin_manager();
    let mut group = c.benchmark_group("hints");
    for id in [19, 56, 53, 21, 321] {
        let info = m.get(id).unwrap();
        let game = Game::new(info, 7);
        group.bench_with_input(BenchmarkId::from_parameter(&info.name), &game, |b, game| {
            b.iter(|| black_box(game.hints()));
        });
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let m = games::builtin_manager();
    let mut game = Game::new(m.get(19).unwrap(), 7);
    AutoPilot::new().with_max_steps(200).run(&mut game);
    let bytes = game.save().unwrap();
    c.bench_function("load_yukon", |b| {
        b.iter(|| Game::load(&m, black_box(&bytes)).unwrap());
    });
}

criterion_group!(benches, bench_hints, bench_load);
criterion_main!(benches);
