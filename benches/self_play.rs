use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_monopoly::{
    Command, DifficultyProfile, GameBuilder, PlayerId, RulesEngine, SelfPlayConfig, SelfPlayRunner,
};

fn bench_state_clone(c: &mut Criterion) {
    let (_, game) = GameBuilder::new().player_count(4).build(1);

    c.bench_function("monopoly/game_state.clone", |b| {
        b.iter(|| black_box(game.clone()));
    });
}

fn bench_opening_roll(c: &mut Criterion) {
    let (rules, game) = GameBuilder::new().player_count(4).fixed_order().build(1);

    c.bench_function("monopoly/apply_command(roll)", |b| {
        b.iter(|| {
            let mut state = game.clone();
            let result = rules.apply_command(&mut state, PlayerId::new(0), &Command::Roll);
            black_box(result.is_ok());
        })
    });
}

fn bench_self_play(c: &mut Criterion) {
    let runner = SelfPlayRunner::new(
        SelfPlayConfig::default()
            .with_player_count(4)
            .with_profiles(vec![DifficultyProfile::easy(), DifficultyProfile::hard()])
            .with_max_commands(2_000),
    );

    let mut group = c.benchmark_group("monopoly/self_play");
    group.sample_size(10);
    group.bench_function("play_game(4 players, 2000 commands)", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let outcome = runner.play_game(seed);
            black_box(outcome.commands);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_state_clone, bench_opening_roll, bench_self_play);
criterion_main!(benches);
