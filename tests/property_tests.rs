//! Property tests for roster and combatant invariants.

use proptest::prelude::*;

use rust_autobattle::battle::{BattleCoordinator, Combatant, Roster};
use rust_autobattle::cards::{Card, CardArena, CardTemplate};
use rust_autobattle::catalog::{starter_registry, MERCENARY_IDS, MONSTER_IDS};
use rust_autobattle::core::{BattleConfig, CardHandle, GameRng, Side, ROSTER_SIZE};
use rust_autobattle::effects::{ExclusiveTimer, StatusEffectKind};

/// Build a roster with cards in the given slots.
fn roster_from(occupied: &[bool; ROSTER_SIZE]) -> (Roster, CardArena, Vec<(usize, CardHandle)>) {
    let mut arena = CardArena::new();
    let mut roster = Roster::new();
    let mut placed = Vec::new();
    for (slot, _) in occupied.iter().enumerate().filter(|(_, o)| **o) {
        let card = Card::new(CardTemplate::new(format!("c{slot}"), 5.0), Side::Player, slot);
        let handle = arena.insert(card);
        roster.place(slot, handle, &mut arena).unwrap();
        placed.push((slot, handle));
    }
    (roster, arena, placed)
}

#[derive(Clone, Debug)]
enum Hit {
    Damage(f32),
    Poison(f32),
    Heal(f32),
    Shield(f32),
    Shock(f32),
    Sturdy(f32),
}

fn hit() -> impl Strategy<Value = Hit> {
    prop_oneof![
        (0.0f32..60.0).prop_map(Hit::Damage),
        (0.0f32..30.0).prop_map(Hit::Poison),
        (0.0f32..40.0).prop_map(Hit::Heal),
        (0.0f32..25.0).prop_map(Hit::Shield),
        (0.1f32..5.0).prop_map(Hit::Shock),
        (0.1f32..5.0).prop_map(Hit::Sturdy),
    ]
}

fn roster_ids(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(pool), 0..=ROSTER_SIZE)
}

proptest! {
    #[test]
    fn prop_shuffle_then_revert_restores(
        occupied in prop::array::uniform7(any::<bool>()),
        seed in any::<u64>(),
    ) {
        let (mut roster, mut arena, placed) = roster_from(&occupied);
        let mut rng = GameRng::new(seed);

        roster.shuffle(&mut rng, &mut arena);
        prop_assert!(roster.stamps_consistent(&arena));
        roster.revert_shuffle(&mut arena);

        for (slot, handle) in placed {
            prop_assert_eq!(roster.get(slot), Some(handle));
            prop_assert_eq!(arena.get(handle).unwrap().slot_index(), slot);
        }
    }

    #[test]
    fn prop_disrupt_then_revert_restores(
        occupied in prop::array::uniform7(any::<bool>()),
        seed in any::<u64>(),
        swaps in 0usize..20,
    ) {
        let (mut roster, mut arena, placed) = roster_from(&occupied);
        let mut rng = GameRng::new(seed);

        let performed = roster.disrupt(swaps, &mut rng, &mut arena);
        prop_assert_eq!(performed, swaps.min(ROSTER_SIZE));
        prop_assert_eq!(roster.len(), placed.len());
        roster.revert_shuffle(&mut arena);

        for (slot, handle) in placed {
            prop_assert_eq!(roster.get(slot), Some(handle));
        }
    }

    #[test]
    fn prop_remove_insert_round_trip(
        occupied in prop::array::uniform7(any::<bool>()),
        index in 0usize..ROSTER_SIZE,
    ) {
        let (mut roster, mut arena, _) = roster_from(&occupied);
        prop_assume!(roster.get(index).is_some());
        let before = roster.clone();

        let removed = roster.remove(index, &mut arena).unwrap().unwrap();
        let pushed_out = roster.insert(index, removed, &mut arena).unwrap();

        prop_assert!(pushed_out.is_none());
        prop_assert_eq!(&roster, &before);
        prop_assert!(roster.stamps_consistent(&arena));
    }

    #[test]
    fn prop_combatant_bounds(hits in prop::collection::vec(hit(), 1..40)) {
        let config = BattleConfig::default();
        let mut combatant = Combatant::new(Side::Player, 100.0);

        for hit in hits {
            match hit {
                Hit::Damage(amount) => {
                    let before = combatant.shield();
                    let report = combatant.take_damage(amount, &config);
                    prop_assert!(report.absorbed <= before);
                }
                Hit::Poison(amount) => {
                    let shield = combatant.shield();
                    combatant.lose_health(amount);
                    prop_assert_eq!(combatant.shield(), shield);
                }
                Hit::Heal(amount) => combatant.add_health(amount),
                Hit::Shield(amount) => combatant.add_shield(amount),
                Hit::Shock(duration) => {
                    combatant.apply_status(StatusEffectKind::Shock, duration);
                }
                Hit::Sturdy(duration) => {
                    combatant.apply_status(StatusEffectKind::Sturdy, duration);
                }
            }
            prop_assert!(combatant.hp() >= 0.0 && combatant.hp() <= combatant.max_hp());
            prop_assert!(combatant.shield() >= 0.0);
            prop_assert!(combatant.overflow() <= 0.0);
            prop_assert!(!(combatant.modifier().is_shocked() && combatant.modifier().is_sturdy()));
        }
    }

    #[test]
    fn prop_reapply_keeps_longer(d1 in 0.1f32..10.0, d2 in 0.1f32..10.0, elapsed in 0.0f32..5.0) {
        let mut timer = ExclusiveTimer::new();
        timer.apply(StatusEffectKind::Haste, d1);
        timer.tick(elapsed);
        let left = timer.remaining(StatusEffectKind::Haste);
        timer.apply(StatusEffectKind::Haste, d2);

        prop_assert_eq!(timer.remaining(StatusEffectKind::Haste), left.max(d2));
    }

    #[test]
    fn prop_battle_invariants_hold(
        seed in any::<u64>(),
        player in roster_ids(&MERCENARY_IDS),
        monster in roster_ids(&MONSTER_IDS),
        steps in prop::collection::vec(0.01f32..0.7, 1..400),
    ) {
        let mut battle = BattleCoordinator::new(
            starter_registry(),
            Combatant::new(Side::Player, 150.0).with_enrage_threshold(0.5),
            Combatant::new(Side::Monster, 150.0),
            seed,
        );
        battle.setup_roster(Side::Player, &player).unwrap();
        battle.setup_roster(Side::Monster, &monster).unwrap();
        battle.start().unwrap();

        for dt in steps {
            battle.update(dt);
            for side in Side::ALL {
                let combatant = battle.combatant(side);
                prop_assert!(combatant.hp() >= 0.0 && combatant.hp() <= combatant.max_hp());
                prop_assert!(combatant.shield() >= 0.0);
                prop_assert!(combatant.roster().stamps_consistent(battle.arena()));
            }
            if battle.is_ended() {
                break;
            }
        }
    }
}
