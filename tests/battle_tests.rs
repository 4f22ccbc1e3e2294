//! Battle coordinator tests.
//!
//! Full battles driven through `BattleCoordinator::update`, covering the
//! phase fence, trigger scheduling, skills, match resolution and the
//! night phase.

use rust_autobattle::battle::{BattleCoordinator, BattleEvent, BattlePhase, Combatant};
use rust_autobattle::cards::{CardRegistry, CardStat, CardTemplate, Durability, Skill};
use rust_autobattle::catalog::starter_registry;
use rust_autobattle::core::{BattleConfig, BattleError, Side};
use rust_autobattle::effects::StatusEffectKind;

fn test_registry() -> CardRegistry {
    CardRegistry::new()
        .with(
            CardTemplate::new("striker", 1.0)
                .with_damage(10.0)
                .with_skill(Skill::Strike),
        )
        .with(
            CardTemplate::new("brute", 1.0)
                .with_damage(50.0)
                .with_skill(Skill::Strike),
        )
        .with(
            CardTemplate::new("pebble", 1.0)
                .with_damage(1.0)
                .with_skill(Skill::Strike)
                .with_durability(Durability::Finite(3)),
        )
        .with(CardTemplate::new("statue", 7.0))
        .with(CardTemplate::new("idol", 100.0))
        .with(
            CardTemplate::new("linker", 100.0)
                .with_damage(1.0)
                .with_skill(Skill::Strike)
                .with_chain_triggers(1),
        )
        .with(
            CardTemplate::new("bomb", 100.0)
                .with_damage(15.0)
                .with_deathrattle(Skill::Strike),
        )
        .with(
            CardTemplate::new("nest", 1.0)
                .with_summon("chick", 2)
                .with_skill(Skill::Summon),
        )
        .with(CardTemplate::new("chick", 100.0))
        .with(CardTemplate::new("sheep", 99.0).with_damage(1.0))
        .with(
            CardTemplate::new("hexer", 100.0)
                .with_status(StatusEffectKind::Polymorph, 2.0)
                .with_polymorph_into("sheep")
                .with_skill(Skill::Hex {
                    kind: StatusEffectKind::Polymorph,
                    count: 1,
                }),
        )
}

fn battle(player_hp: f32, monster_hp: f32) -> BattleCoordinator {
    BattleCoordinator::new(
        test_registry(),
        Combatant::new(Side::Player, player_hp),
        Combatant::new(Side::Monster, monster_hp),
        42,
    )
}

fn trigger_count(battle: &BattleCoordinator, side: Side, slot: usize) -> usize {
    battle
        .events()
        .iter()
        .filter(|e| {
            matches!(e, BattleEvent::CardTriggered { side: s, slot: i, .. } if *s == side && *i == slot)
        })
        .count()
}

fn run_to_end(battle: &mut BattleCoordinator, dt: f32) {
    for _ in 0..100_000 {
        if battle.is_ended() {
            return;
        }
        battle.update(dt);
    }
    panic!("battle did not end");
}

// === Phase fence ===

/// Test that nothing happens before `start`.
#[test]
fn test_update_is_noop_while_preparing() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["striker"]).unwrap();

    battle.update(5.0);

    assert_eq!(battle.phase(), BattlePhase::Preparing);
    assert_eq!(battle.clock(), 0.0);
    assert_eq!(battle.combatant(Side::Monster).hp(), 100.0);
}

/// Test phase transition errors.
#[test]
fn test_phase_errors() {
    let mut battle = battle(100.0, 100.0);

    assert_eq!(battle.trigger_card(Side::Player, 0), Err(BattleError::NotRunning));
    assert_eq!(battle.prepare_next_battle(), Err(BattleError::NotEnded));

    battle.start().unwrap();
    assert_eq!(battle.start(), Err(BattleError::AlreadyStarted));
    assert_eq!(
        battle.setup_roster(Side::Player, &["striker"]),
        Err(BattleError::EditingLocked)
    );
    assert_eq!(battle.move_card(Side::Player, 0, 1), Err(BattleError::EditingLocked));
}

/// Test that every battle operation is fenced once the battle has ended.
#[test]
fn test_operations_rejected_after_end() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["striker"]).unwrap();
    battle.start().unwrap();
    battle.end_battle(Side::Player);

    assert!(battle.is_ended());
    assert_eq!(battle.trigger_card(Side::Player, 0), Err(BattleError::NotRunning));
    assert_eq!(battle.shuffle_roster(Side::Player), Err(BattleError::NotRunning));
    assert_eq!(
        battle.apply_status_to_combatant(Side::Monster, StatusEffectKind::Bleed, 3.0),
        Err(BattleError::NotRunning)
    );
    assert_eq!(
        battle.spawn_card_to_random_empty_slot(Side::Player, "chick"),
        Err(BattleError::NotRunning)
    );
    assert_eq!(
        battle.apply_status_to_card(Side::Player, 0, StatusEffectKind::Freeze, 2.0, None),
        Err(BattleError::NotRunning)
    );
    assert!(matches!(
        battle.combatant_mut(Side::Player),
        Err(BattleError::NotRunning)
    ));
    let handle = battle.handle_at(Side::Player, 0).unwrap();
    assert!(matches!(battle.card_mut(handle), Err(BattleError::NotRunning)));

    let clock = battle.clock();
    battle.update(10.0);
    assert_eq!(battle.clock(), clock);
    assert_eq!(battle.combatant(Side::Monster).hp(), 100.0);
}

/// Test that `end_battle` only records the first result.
#[test]
fn test_end_battle_is_idempotent() {
    let mut battle = battle(100.0, 100.0);
    battle.start().unwrap();

    battle.end_battle(Side::Monster);
    battle.end_battle(Side::Player);

    assert_eq!(battle.outcome().unwrap().winner, Side::Monster);
    let ended = battle
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::BattleEnded { .. }))
        .count();
    assert_eq!(ended, 1);
}

/// Test that HP carries into the next battle while shields and statuses reset.
#[test]
fn test_prepare_next_battle_keeps_hp() {
    let mut battle = battle(100.0, 100.0);
    battle.start().unwrap();
    let player = battle.combatant_mut(Side::Player).unwrap();
    player.take_damage(30.0, &BattleConfig::default());
    player.add_shield(15.0);
    battle
        .apply_status_to_combatant(Side::Player, StatusEffectKind::Poison, 4.0)
        .unwrap();
    battle.end_battle(Side::Player);

    battle.prepare_next_battle().unwrap();

    let player = battle.combatant(Side::Player);
    assert_eq!(battle.phase(), BattlePhase::Preparing);
    assert_eq!(player.hp(), 70.0);
    assert_eq!(player.shield(), 0.0);
    assert!(player.statuses().is_empty());
    assert!(battle.outcome().is_none());
    assert!(battle.start().is_ok());
}

// === Roster editing ===

/// Test that unknown identifiers leave their slot empty.
#[test]
fn test_setup_roster_skips_unknown_cards() {
    let mut battle = battle(100.0, 100.0);

    let placed = battle
        .setup_roster(Side::Player, &["striker", "dragon", "idol"])
        .unwrap();

    assert_eq!(placed, 2);
    assert!(battle.card_at(Side::Player, 1).is_none());
    assert_eq!(battle.card_at(Side::Player, 2).unwrap().identifier(), "idol");
}

/// Test that a roster larger than seven is rejected.
#[test]
fn test_setup_roster_too_large() {
    let mut battle = battle(100.0, 100.0);
    let ids = ["idol"; 8];
    assert_eq!(
        battle.setup_roster(Side::Player, &ids),
        Err(BattleError::SlotOutOfRange(7))
    );
    assert!(battle.combatant(Side::Player).roster().is_empty());
}

/// Test removing and inserting through the coordinator.
#[test]
fn test_remove_then_insert_round_trip() {
    let mut battle = battle(100.0, 100.0);
    battle
        .setup_roster(Side::Player, &["striker", "idol", "bomb", "chick"])
        .unwrap();
    let before: Vec<_> = (0..4).map(|i| battle.handle_at(Side::Player, i)).collect();

    let removed = battle.remove_card(Side::Player, 1).unwrap().unwrap();
    assert_eq!(removed.identifier(), "idol");
    assert_eq!(battle.card_at(Side::Player, 1).unwrap().identifier(), "bomb");
    assert_eq!(battle.card_at(Side::Player, 1).unwrap().slot_index(), 1);

    let pushed_out = battle.insert_card(Side::Player, 1, removed).unwrap();
    assert!(pushed_out.is_none());

    let identifiers: Vec<_> = (0..4)
        .map(|i| battle.card_at(Side::Player, i).unwrap().identifier().to_string())
        .collect();
    assert_eq!(identifiers, ["striker", "idol", "bomb", "chick"]);
    for slot in 0..4 {
        assert_eq!(battle.card_at(Side::Player, slot).unwrap().slot_index(), slot);
    }
    // Untouched cards keep their handles.
    assert_eq!(battle.handle_at(Side::Player, 0), before[0]);
    assert_eq!(battle.handle_at(Side::Player, 2), before[2]);
}

/// Test that inserting a card owned by the other side fails.
#[test]
fn test_insert_checks_owner() {
    let mut battle = battle(100.0, 100.0);
    let card = test_registry().create_card("idol", Side::Monster, 0).unwrap();

    assert!(matches!(
        battle.insert_card(Side::Player, 0, card),
        Err(BattleError::OwnerMismatch { .. })
    ));
}

// === Triggers ===

/// Test the trigger loop and overshoot carry.
#[test]
fn test_card_triggers_on_cooldown() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["striker"]).unwrap();
    battle.start().unwrap();

    battle.update(0.5);
    assert_eq!(battle.combatant(Side::Monster).hp(), 100.0);

    battle.update(0.5);
    assert_eq!(battle.combatant(Side::Monster).hp(), 90.0);

    battle.update(0.75);
    battle.update(0.5);
    // 1.25 seconds after the first trigger: fired once, 0.25 overshoot carried.
    assert_eq!(battle.combatant(Side::Monster).hp(), 80.0);
    let cooldown = battle.card_at(Side::Player, 0).unwrap().cooldown();
    assert!((cooldown - 0.75).abs() < 1e-5);
}

/// Test that haste doubles the countdown for its duration.
#[test]
fn test_haste_consumes_double_cooldown() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["statue"]).unwrap();
    battle.start().unwrap();
    let handle = battle.handle_at(Side::Player, 0).unwrap();
    assert!(battle
        .apply_status_to_card(Side::Player, 0, StatusEffectKind::Haste, 4.0, None)
        .unwrap());

    for _ in 0..3 {
        battle.update(1.0);
    }
    assert_eq!(battle.card(handle).unwrap().cooldown(), 1.0);
    assert_eq!(trigger_count(&battle, Side::Player, 0), 0);

    battle.update(1.0);
    assert_eq!(trigger_count(&battle, Side::Player, 0), 1);
    assert!(!battle.card(handle).unwrap().is_hasted());
}

/// Test that freeze holds the countdown.
#[test]
fn test_frozen_card_waits() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["striker"]).unwrap();
    battle.start().unwrap();
    let handle = battle.handle_at(Side::Player, 0).unwrap();
    assert!(battle
        .apply_status_to_card(Side::Player, 0, StatusEffectKind::Freeze, 2.0, None)
        .unwrap());

    battle.update(1.0);
    battle.update(1.0);
    assert_eq!(battle.combatant(Side::Monster).hp(), 100.0);
    assert!(!battle.card(handle).unwrap().is_frozen());

    battle.update(1.0);
    assert_eq!(battle.combatant(Side::Monster).hp(), 90.0);
}

/// Test that echo adds casts to the next trigger only.
#[test]
fn test_echo_casts_three_times() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["striker"]).unwrap();
    battle.start().unwrap();
    let handle = battle.handle_at(Side::Player, 0).unwrap();
    assert!(battle
        .apply_status_to_card(Side::Player, 0, StatusEffectKind::Echo, 2.0, None)
        .unwrap());

    battle.update(1.0);
    assert_eq!(battle.combatant(Side::Monster).hp(), 70.0);
    assert_eq!(battle.card(handle).unwrap().echo(), 0);
    assert!(battle.events().iter().any(|e| matches!(
        e,
        BattleEvent::CardTriggered { casts: 3, .. }
    )));

    battle.update(1.0);
    assert_eq!(battle.combatant(Side::Monster).hp(), 60.0);
}

/// Test that a card with durability N triggers exactly N times.
#[test]
fn test_durability_breaks_card() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["pebble"]).unwrap();
    battle.start().unwrap();

    for _ in 0..6 {
        battle.update(1.0);
    }

    assert_eq!(trigger_count(&battle, Side::Player, 0), 3);
    assert_eq!(battle.combatant(Side::Monster).hp(), 97.0);
    assert!(battle.card_at(Side::Player, 0).is_none());
    assert!(battle.events().iter().any(|e| matches!(
        e,
        BattleEvent::CardDestroyed { identifier, .. } if identifier == "pebble"
    )));
}

/// Test that chain triggers ready neighbors once without cascading.
#[test]
fn test_chain_triggers_ready_neighbors_once() {
    let mut battle = battle(100.0, 100.0);
    battle
        .setup_roster(Side::Player, &["linker", "linker", "linker", "idol"])
        .unwrap();
    battle.start().unwrap();

    for slot in [0, 1] {
        let handle = battle.handle_at(Side::Player, slot).unwrap();
        battle.card_mut(handle).unwrap().set_cooldown(0.0);
    }

    battle.trigger_card(Side::Player, 2).unwrap();

    assert_eq!(trigger_count(&battle, Side::Player, 2), 1);
    assert_eq!(trigger_count(&battle, Side::Player, 1), 1);
    // Slot 0 is only a neighbor of the chained card.
    assert_eq!(trigger_count(&battle, Side::Player, 0), 0);
    // The idol in slot 3 was not ready.
    assert_eq!(trigger_count(&battle, Side::Player, 3), 0);
    assert_eq!(battle.combatant(Side::Monster).hp(), 98.0);
    assert_eq!(battle.card_at(Side::Player, 1).unwrap().cooldown(), 100.0);
}

/// Test that a kill mid-roster stops the other side from acting.
#[test]
fn test_battle_stops_when_side_dies() {
    let mut battle = battle(100.0, 50.0);
    battle.setup_roster(Side::Player, &["brute"]).unwrap();
    battle.setup_roster(Side::Monster, &["brute", "brute"]).unwrap();
    battle.start().unwrap();

    battle.update(1.0);

    let outcome = battle.outcome().unwrap();
    assert_eq!(outcome.winner, Side::Player);
    assert!(!outcome.simultaneous);
    assert_eq!(battle.combatant(Side::Player).hp(), 100.0);
    assert_eq!(trigger_count(&battle, Side::Monster, 0), 0);
}

// === Skills ===

/// Test deathrattle resolution on destroy.
#[test]
fn test_deathrattle_fires_on_destroy() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["bomb"]).unwrap();
    battle.start().unwrap();

    battle.destroy_card(Side::Player, 0).unwrap();

    assert_eq!(battle.combatant(Side::Monster).hp(), 85.0);
    assert!(battle.card_at(Side::Player, 0).is_none());
    assert_eq!(battle.destroy_card(Side::Player, 0), Err(BattleError::EmptySlot(0)));
}

/// Test that summons fill the lowest empty slots.
#[test]
fn test_summon_fills_first_empty_slot() {
    let mut battle = battle(100.0, 100.0);
    battle.place_card(Side::Player, 0, "nest").unwrap();
    battle.place_card(Side::Player, 2, "idol").unwrap();
    battle.start().unwrap();

    battle.update(1.0);

    assert_eq!(battle.card_at(Side::Player, 1).unwrap().identifier(), "chick");
    assert_eq!(battle.card_at(Side::Player, 3).unwrap().identifier(), "chick");
    assert!(battle.card_at(Side::Player, 4).is_none());
}

/// Test that spawning into a full roster fails.
#[test]
fn test_spawn_into_full_roster() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["idol"; 7]).unwrap();
    battle.start().unwrap();

    assert_eq!(
        battle.spawn_card_to_random_empty_slot(Side::Player, "chick"),
        Err(BattleError::NoEmptySlot)
    );
}

/// Test polymorph and reversion to the same original handle.
#[test]
fn test_polymorph_reverts_to_original() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["idol"]).unwrap();
    battle.setup_roster(Side::Monster, &["hexer"]).unwrap();
    battle.start().unwrap();
    let original = battle.handle_at(Side::Player, 0).unwrap();

    battle.trigger_card(Side::Monster, 0).unwrap();

    let substitute = battle.handle_at(Side::Player, 0).unwrap();
    assert_ne!(substitute, original);
    let sheep = battle.card(substitute).unwrap();
    assert_eq!(sheep.identifier(), "sheep");
    assert_eq!(sheep.transformation().unwrap().original, original);
    assert!(battle.card(original).is_some());

    battle.update(1.0);
    assert_eq!(battle.handle_at(Side::Player, 0), Some(substitute));

    battle.update(1.0);
    assert_eq!(battle.handle_at(Side::Player, 0), Some(original));
    assert!(battle.card(substitute).is_none());
    assert_eq!(battle.card(original).unwrap().slot_index(), 0);
}

/// Test that transforming a substitute keeps the root original.
#[test]
fn test_repeated_polymorph_links_root() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["idol"]).unwrap();
    battle.start().unwrap();
    let original = battle.handle_at(Side::Player, 0).unwrap();

    let first = battle.mutate_card(Side::Player, 0, "sheep", 5.0).unwrap();
    let second = battle.mutate_card(Side::Player, 0, "chick", 5.0).unwrap();

    assert!(battle.card(first).is_none());
    assert_eq!(
        battle.card(second).unwrap().transformation().unwrap().original,
        original
    );
    assert_eq!(battle.revert_mutation(Side::Player, 0), Ok(original));
    assert_eq!(
        battle.revert_mutation(Side::Player, 0),
        Err(BattleError::NotTransformed(0))
    );
}

/// Test that the end-of-battle reset reverts transformations and shuffles.
#[test]
fn test_end_of_battle_restores_formation() {
    let ids = ["striker", "idol", "bomb", "chick", "linker", "statue", "sheep"];
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &ids).unwrap();
    battle.start().unwrap();

    battle.mutate_card(Side::Player, 3, "sheep", 50.0).unwrap();
    battle.shuffle_roster(Side::Player).unwrap();
    battle.disrupt_roster(Side::Player, 3).unwrap();
    battle.end_battle(Side::Player);

    for (slot, id) in ids.iter().enumerate() {
        let card = battle.card_at(Side::Player, slot).unwrap();
        assert_eq!(card.identifier(), *id);
        assert_eq!(card.slot_index(), slot);
        assert!(!card.is_transformed());
        assert_eq!(card.cooldown(), 0.0);
    }
}

/// Test random card statuses skip immune cards.
#[test]
fn test_random_status_skips_immune() {
    let mut battle = BattleCoordinator::new(
        starter_registry(),
        Combatant::new(Side::Player, 100.0),
        Combatant::new(Side::Monster, 100.0),
        7,
    );
    battle
        .setup_roster(Side::Player, &["frost_fowl", "healer"])
        .unwrap();
    battle.start().unwrap();

    let applied = battle
        .apply_status_to_random_cards(Side::Player, 2, StatusEffectKind::Freeze, 3.0, None)
        .unwrap();

    assert_eq!(applied, 1);
    assert!(!battle.card_at(Side::Player, 0).unwrap().is_frozen());
    assert!(battle.card_at(Side::Player, 1).unwrap().is_frozen());
}

/// Test blood oath shields more while enraged.
#[test]
fn test_blood_oath_enraged_shield() {
    let mut battle = BattleCoordinator::new(
        starter_registry(),
        Combatant::new(Side::Player, 100.0).with_enrage_threshold(0.5),
        Combatant::new(Side::Monster, 100.0),
        7,
    );
    battle
        .setup_roster(Side::Player, &["blood_oath_shieldbearer"])
        .unwrap();
    battle.start().unwrap();

    battle.trigger_card(Side::Player, 0).unwrap();
    assert_eq!(battle.combatant(Side::Player).hp(), 95.0);
    assert_eq!(battle.combatant(Side::Player).shield(), 20.0);

    let config = battle.config().clone();
    let player = battle.combatant_mut(Side::Player).unwrap();
    let shield = player.shield();
    player.add_shield(-shield);
    player.take_damage(55.0, &config);
    assert!(battle.combatant(Side::Player).is_enraged());

    battle.trigger_card(Side::Player, 0).unwrap();
    assert_eq!(battle.combatant(Side::Player).hp(), 35.0);
    assert_eq!(battle.combatant(Side::Player).shield(), 45.0);
}

/// Test neighbor auras and crit scaling.
#[test]
fn test_aura_raises_crit_chance() {
    let mut battle = BattleCoordinator::new(
        starter_registry(),
        Combatant::new(Side::Player, 100.0),
        Combatant::new(Side::Monster, 100.0),
        7,
    );
    battle
        .setup_roster(Side::Player, &["rallying_standard", "barbarian_shieldbearer"])
        .unwrap();
    battle.start().unwrap();
    let handle = battle.handle_at(Side::Player, 1).unwrap();

    let chance = battle.current_stat(Side::Player, handle, CardStat::CritChance);
    assert!((chance - 0.6).abs() < 1e-6);

    battle.trigger_card(Side::Player, 1).unwrap();
    let shield = battle.combatant(Side::Player).shield();
    assert!(shield == 20.0 || shield == 40.0, "shield {shield}");
}

/// Test rampage growth accumulates per cast.
#[test]
fn test_rampage_grows() {
    let mut battle = BattleCoordinator::new(
        starter_registry(),
        Combatant::new(Side::Player, 100.0),
        Combatant::new(Side::Monster, 1000.0),
        7,
    );
    battle.setup_roster(Side::Player, &["furious_warrior"]).unwrap();
    battle.start().unwrap();

    battle.trigger_card(Side::Player, 0).unwrap();
    battle.trigger_card(Side::Player, 0).unwrap();

    assert_eq!(battle.combatant(Side::Monster).hp(), 1000.0 - 10.0 - 15.0);
    assert_eq!(battle.card_at(Side::Player, 0).unwrap().growth(), 10.0);
}

// === Match resolution and night ===

fn night_battle(player_hp: f32, monster_hp: f32, config: BattleConfig) -> BattleCoordinator {
    let mut battle = battle(player_hp, monster_hp).with_config(config).unwrap();
    battle.start().unwrap();
    battle
}

/// Test that a config whose night interval cannot advance is rejected.
#[test]
fn test_zero_night_interval_rejected() {
    let config = BattleConfig::default()
        .with_night_start(0.0)
        .with_night_tick_interval(0.0);

    let result = battle(100.0, 100.0).with_config(config);
    assert!(matches!(
        result,
        Err(BattleError::InvalidConfig("night_tick_interval"))
    ));

    let config = BattleConfig::default().with_night_tick_interval(-0.5);
    assert!(battle(100.0, 100.0).with_config(config).is_err());
}

/// Test a very short night interval still lets each update return.
#[test]
fn test_tiny_night_interval_terminates() {
    let config = BattleConfig::default()
        .with_night_start(0.0)
        .with_night_tick_interval(0.001)
        .with_night_damage(0.0, 0.0);
    let mut battle = night_battle(100.0, 100.0, config);

    battle.update(0.1);

    assert!(battle.is_running());
    assert!(battle.night().tick_timer < 0.001);
}

/// Test card statuses applied through the coordinator.
#[test]
fn test_apply_status_to_card() {
    let mut battle = battle(100.0, 100.0);
    battle.setup_roster(Side::Player, &["striker", "idol"]).unwrap();
    battle.setup_roster(Side::Monster, &["striker"]).unwrap();
    battle.start().unwrap();

    assert!(battle
        .apply_status_to_card(Side::Monster, 0, StatusEffectKind::Freeze, 1.5, None)
        .unwrap());
    assert!(battle.card_at(Side::Monster, 0).unwrap().is_frozen());

    assert!(!battle
        .apply_status_to_card(Side::Player, 0, StatusEffectKind::Bleed, 3.0, None)
        .unwrap());
    assert_eq!(
        battle.apply_status_to_card(Side::Player, 5, StatusEffectKind::Haste, 1.0, None),
        Err(BattleError::EmptySlot(5))
    );

    assert!(battle
        .apply_status_to_card(Side::Player, 1, StatusEffectKind::Polymorph, 2.0, Some("sheep"))
        .unwrap());
    let sheep = battle.card_at(Side::Player, 1).unwrap();
    assert_eq!(sheep.identifier(), "sheep");
    assert!(sheep.is_transformed());
}

/// Test the less negative side wins a simultaneous death.
#[test]
fn test_simultaneous_death_less_negative_wins() {
    let config = BattleConfig::default()
        .with_night_start(0.0)
        .with_night_damage(15.0, 0.0);

    let mut battle = night_battle(10.0, 3.0, config.clone());
    battle.update(0.5);
    let outcome = battle.outcome().unwrap();
    assert!(outcome.simultaneous);
    assert_eq!(outcome.winner, Side::Player);
    assert_eq!(battle.combatant(Side::Player).overflow(), -5.0);
    assert_eq!(battle.combatant(Side::Monster).overflow(), -12.0);

    let mut battle = night_battle(3.0, 10.0, config);
    battle.update(0.5);
    assert_eq!(battle.outcome().unwrap().winner, Side::Monster);
}

/// Test the configured tie-break on equal overflow.
#[test]
fn test_exact_tie_uses_policy() {
    let config = BattleConfig::default()
        .with_night_start(0.0)
        .with_night_damage(15.0, 0.0);

    let mut battle = night_battle(10.0, 10.0, config.clone());
    battle.update(0.5);
    assert_eq!(battle.outcome().unwrap().winner, Side::Player);

    let mut battle = night_battle(10.0, 10.0, config.with_tie_break_winner(Side::Monster));
    battle.update(0.5);
    assert_eq!(battle.outcome().unwrap().winner, Side::Monster);
}

/// Test night starts on schedule and escalates every tick.
#[test]
fn test_night_damage_escalates() {
    let mut battle = battle(1000.0, 1000.0);
    battle.start().unwrap();

    battle.update(59.0);
    assert!(!battle.is_night());
    assert_eq!(battle.combatant(Side::Player).hp(), 1000.0);

    // Crossing dusk: only the second after 60s counts, two ticks of 1 and 2.
    battle.update(2.0);
    assert!(battle.is_night());
    assert_eq!(battle.combatant(Side::Player).hp(), 997.0);
    assert_eq!(battle.combatant(Side::Monster).hp(), 997.0);

    battle.update(0.5);
    assert_eq!(battle.combatant(Side::Player).hp(), 994.0);
    assert_eq!(battle.night().damage, 4.0);

    let nights = battle
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::NightStarted { .. }))
        .count();
    assert_eq!(nights, 1);
}

/// Test night guarantees a battle between passive rosters ends.
#[test]
fn test_night_ends_stalemate() {
    let mut battle = battle(200.0, 150.0);
    battle.setup_roster(Side::Player, &["idol"]).unwrap();
    battle.setup_roster(Side::Monster, &["idol"]).unwrap();
    battle.start().unwrap();

    run_to_end(&mut battle, 0.1);

    assert_eq!(battle.outcome().unwrap().winner, Side::Player);
    assert!(battle.clock() > 60.0);
}

/// Test that a seed fully determines a battle.
#[test]
fn test_same_seed_same_battle() {
    fn play(seed: u64) -> (Vec<BattleEvent>, f32, f32) {
        let mut battle = BattleCoordinator::new(
            starter_registry(),
            Combatant::new(Side::Player, 250.0).with_enrage_threshold(0.5),
            Combatant::new(Side::Monster, 250.0),
            seed,
        );
        battle
            .setup_roster(
                Side::Player,
                &[
                    "barbarian_warrior",
                    "rallying_standard",
                    "barbarian_shieldbearer",
                    "frost_fowl",
                    "bloodletter",
                ],
            )
            .unwrap();
        battle
            .setup_roster(Side::Monster, &["goblin", "witch", "goblin", "witch"])
            .unwrap();
        battle.start().unwrap();
        run_to_end(&mut battle, 0.1);
        (
            battle.drain_events(),
            battle.combatant(Side::Player).hp(),
            battle.combatant(Side::Monster).hp(),
        )
    }

    assert_eq!(play(99), play(99));
}
