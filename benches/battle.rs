use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_autobattle::battle::{BattleCoordinator, Combatant};
use rust_autobattle::catalog::starter_registry;
use rust_autobattle::core::Side;

const PLAYER_ROSTER: [&str; 7] = [
    "barbarian_warrior",
    "rallying_standard",
    "barbarian_shieldbearer",
    "bloodletter",
    "frost_fowl",
    "furious_warrior",
    "healer",
];

const MONSTER_ROSTER: [&str; 7] = ["goblin", "witch", "goblin", "goblin", "witch", "goblin", "goblin"];

fn run_battle(seed: u64) -> Side {
    let mut battle = BattleCoordinator::new(
        starter_registry(),
        Combatant::new(Side::Player, 300.0).with_enrage_threshold(0.5),
        Combatant::new(Side::Monster, 300.0),
        seed,
    );
    battle
        .setup_roster(Side::Player, &PLAYER_ROSTER)
        .expect("player roster");
    battle
        .setup_roster(Side::Monster, &MONSTER_ROSTER)
        .expect("monster roster");
    battle.start().expect("start");

    while !battle.is_ended() {
        battle.update(0.1);
    }
    battle.outcome().expect("outcome").winner
}

fn bench_full_battle(c: &mut Criterion) {
    c.bench_function("full_battle", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(run_battle(black_box(seed)))
        })
    });
}

criterion_group!(benches, bench_full_battle);
criterion_main!(benches);
