//! Battle coordinator: clock, night phase, resolution and roster operations.
//!
//! `BattleCoordinator` owns everything a battle touches: both combatants,
//! the card arena, the registry, the RNG streams and the configuration.
//! Cards never reach their owner or target directly. The coordinator asks a
//! card what happened (`CooldownTick`, `StatusApplication`) and applies the
//! consequences.
//!
//! ## Phases
//!
//! ```text
//! Preparing --start()--> Running --(a side dies)--> Ended
//!     ^                                               |
//!     +------------- prepare_next_battle() -----------+
//! ```
//!
//! - `Preparing`: rosters can be edited; `update` does nothing
//! - `Running`: `update` advances the battle; battle operations are allowed
//! - `Ended`: everything is fenced off until `prepare_next_battle`
//!
//! Battle operations call `ensure_running` and editing operations call
//! `ensure_editing`, so the fence lives in one place.
//!
//! ## Tick Order
//!
//! 1. clock, night start, night damage + status check
//! 2. player roster (slot 0..7), then player statuses
//! 3. monster roster, then monster statuses
//!
//! Each step stops as soon as the battle has ended.

use tracing::{debug, info, warn};

use super::combatant::Combatant;
use super::event::{BattleEvent, BattleOutcome};
use crate::cards::{Card, CardArena, CardRegistry, CardStat, CooldownTick, StatusApplication};
use crate::core::{BattleConfig, BattleError, CardHandle, GameRng, Side, SideMap, ROSTER_SIZE};
use crate::effects::StatusEffectKind;

/// Battle lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    Preparing,
    Running,
    Ended,
}

/// Night attrition state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NightState {
    pub active: bool,
    /// Seconds accumulated toward the next night tick.
    pub tick_timer: f32,
    /// Damage the next night tick deals to both sides.
    pub damage: f32,
}

impl NightState {
    fn new(config: &BattleConfig) -> Self {
        Self {
            active: false,
            tick_timer: 0.0,
            damage: config.night_initial_damage,
        }
    }
}

/// Runs a battle between two combatants.
///
/// ## Example
///
/// ```
/// use rust_autobattle::battle::{BattleCoordinator, Combatant};
/// use rust_autobattle::catalog::starter_registry;
/// use rust_autobattle::core::Side;
///
/// let mut battle = BattleCoordinator::new(
///     starter_registry(),
///     Combatant::new(Side::Player, 100.0),
///     Combatant::new(Side::Monster, 60.0),
///     42,
/// );
/// battle.setup_roster(Side::Player, &["barbarian_warrior"]).unwrap();
/// battle.setup_roster(Side::Monster, &["goblin"]).unwrap();
/// battle.start().unwrap();
///
/// while !battle.is_ended() {
///     battle.update(0.1);
/// }
/// assert!(battle.outcome().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct BattleCoordinator {
    pub(crate) combatants: SideMap<Combatant>,
    pub(crate) arena: CardArena,
    registry: CardRegistry,
    pub(crate) config: BattleConfig,
    roster_rng: GameRng,
    pub(crate) crit_rng: GameRng,
    phase: BattlePhase,
    clock: f32,
    night: NightState,
    outcome: Option<BattleOutcome>,
    events: Vec<BattleEvent>,
}

impl BattleCoordinator {
    /// Create a coordinator in the `Preparing` phase.
    #[must_use]
    pub fn new(registry: CardRegistry, player: Combatant, monster: Combatant, seed: u64) -> Self {
        debug_assert_eq!(player.side(), Side::Player);
        debug_assert_eq!(monster.side(), Side::Monster);

        let config = BattleConfig::default();
        let root = GameRng::new(seed);
        Self {
            combatants: SideMap::from_pair(player, monster),
            arena: CardArena::new(),
            registry,
            night: NightState::new(&config),
            config,
            roster_rng: root.for_context("roster"),
            crit_rng: root.for_context("crit"),
            phase: BattlePhase::Preparing,
            clock: 0.0,
            outcome: None,
            events: Vec::new(),
        }
    }

    /// Replace the configuration.
    ///
    /// Fails with `InvalidConfig` if a tick interval is not positive.
    pub fn with_config(mut self, config: BattleConfig) -> Result<Self, BattleError> {
        config.validate()?;
        self.night = NightState::new(&config);
        self.config = config;
        Ok(self)
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == BattlePhase::Running
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == BattlePhase::Ended
    }

    /// Whether roster editing is currently legal.
    #[must_use]
    pub fn is_editing_allowed(&self) -> bool {
        self.phase == BattlePhase::Preparing
    }

    /// Seconds since `start`.
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    #[must_use]
    pub fn night(&self) -> NightState {
        self.night
    }

    #[must_use]
    pub fn is_night(&self) -> bool {
        self.night.active
    }

    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn arena(&self) -> &CardArena {
        &self.arena
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side]
    }

    /// Mutable access to a combatant. Only while running.
    pub fn combatant_mut(&mut self, side: Side) -> Result<&mut Combatant, BattleError> {
        self.ensure_running()?;
        Ok(&mut self.combatants[side])
    }

    #[must_use]
    pub fn card(&self, handle: CardHandle) -> Option<&Card> {
        self.arena.get(handle)
    }

    /// Mutable access to a live card. Only while running.
    pub fn card_mut(&mut self, handle: CardHandle) -> Result<&mut Card, BattleError> {
        self.ensure_running()?;
        self.arena
            .get_mut(handle)
            .ok_or(BattleError::StaleHandle(handle))
    }

    /// Card in a slot.
    #[must_use]
    pub fn card_at(&self, side: Side, slot: usize) -> Option<&Card> {
        self.combatants[side]
            .roster
            .get(slot)
            .and_then(|h| self.arena.get(h))
    }

    /// Handle in a slot.
    #[must_use]
    pub fn handle_at(&self, side: Side, slot: usize) -> Option<CardHandle> {
        self.combatants[side].roster.get(slot)
    }

    /// Slot a card occupies on `side`.
    #[must_use]
    pub fn slot_of(&self, side: Side, handle: CardHandle) -> Option<usize> {
        self.combatants[side].roster.position_of(handle)
    }

    /// The card facing `slot` on the other side.
    #[must_use]
    pub fn opposite_card(&self, side: Side, slot: usize) -> Option<&Card> {
        self.card_at(side.opponent(), slot)
    }

    /// Stat including growth and neighbor auras.
    #[must_use]
    pub fn current_stat(&self, side: Side, handle: CardHandle, stat: CardStat) -> f32 {
        let Some(card) = self.arena.get(handle) else {
            return 0.0;
        };
        let roster = &self.combatants[side].roster;
        let aura: f32 = roster
            .position_of(handle)
            .map(|slot| {
                roster
                    .neighbors(slot)
                    .into_iter()
                    .filter_map(|n| self.arena.get(n))
                    .map(|n| n.aura_buff_to(card, stat))
                    .sum()
            })
            .unwrap_or(0.0);
        card.stat(stat) + aura
    }

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queued events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub(crate) fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    // === Guards ===

    fn ensure_running(&self) -> Result<(), BattleError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(BattleError::NotRunning)
        }
    }

    fn ensure_editing(&self) -> Result<(), BattleError> {
        if self.is_editing_allowed() {
            Ok(())
        } else {
            Err(BattleError::EditingLocked)
        }
    }

    // === Roster editing (Preparing only) ===

    /// Fill a roster from slot 0 with cards built from identifiers.
    ///
    /// Existing cards are discarded. Identifiers that fail to build are
    /// logged and leave their slot empty. Returns the number of cards placed.
    pub fn setup_roster(&mut self, side: Side, identifiers: &[&str]) -> Result<usize, BattleError> {
        self.ensure_editing()?;
        if identifiers.len() > ROSTER_SIZE {
            return Err(BattleError::SlotOutOfRange(identifiers.len() - 1));
        }

        for slot in 0..ROSTER_SIZE {
            if let Some(old) = self.combatants[side].roster.take(slot)? {
                self.discard(old);
            }
        }

        let mut placed = 0;
        for (slot, identifier) in identifiers.iter().enumerate() {
            match self.registry.create_card(identifier, side, slot) {
                Ok(card) => {
                    let handle = self.arena.insert(card);
                    self.combatants[side].roster.place(slot, handle, &mut self.arena)?;
                    placed += 1;
                }
                Err(err) => warn!(%side, slot, %err, "skipping card during roster setup"),
            }
        }
        Ok(placed)
    }

    /// Build a card into a specific slot, replacing any card there.
    pub fn place_card(
        &mut self,
        side: Side,
        slot: usize,
        identifier: &str,
    ) -> Result<CardHandle, BattleError> {
        self.ensure_editing()?;
        if slot >= ROSTER_SIZE {
            return Err(BattleError::SlotOutOfRange(slot));
        }
        let card = self.registry.create_card(identifier, side, slot)?;
        let handle = self.arena.insert(card);
        if let Some(old) = self.combatants[side].roster.place(slot, handle, &mut self.arena)? {
            self.discard(old);
        }
        self.commit_formation(side);
        Ok(handle)
    }

    /// Take a card out of a roster, shifting later cards left.
    ///
    /// The removed card is handed back to the caller.
    pub fn remove_card(&mut self, side: Side, slot: usize) -> Result<Option<Card>, BattleError> {
        self.ensure_editing()?;
        let removed = self.combatants[side].roster.remove(slot, &mut self.arena)?;
        self.commit_formation(side);
        Ok(removed.and_then(|h| self.arena.remove(h)))
    }

    /// Insert a card, shifting the slot and later cards right.
    ///
    /// Returns the card pushed out of the last slot, if any.
    pub fn insert_card(
        &mut self,
        side: Side,
        slot: usize,
        card: Card,
    ) -> Result<Option<Card>, BattleError> {
        self.ensure_editing()?;
        if slot >= ROSTER_SIZE {
            return Err(BattleError::SlotOutOfRange(slot));
        }
        if card.owner() != side {
            return Err(BattleError::OwnerMismatch {
                identifier: card.identifier().to_string(),
                owner: side,
            });
        }

        let handle = self.arena.insert(card);
        let pushed_out = self.combatants[side]
            .roster
            .insert(slot, handle, &mut self.arena)?;
        self.commit_formation(side);
        Ok(pushed_out.and_then(|h| self.arena.remove(h)))
    }

    /// Move a card within a roster.
    pub fn move_card(&mut self, side: Side, from: usize, to: usize) -> Result<(), BattleError> {
        self.ensure_editing()?;
        self.combatants[side]
            .roster
            .move_card(from, to, &mut self.arena)?;
        self.commit_formation(side);
        Ok(())
    }

    /// Record every card's current slot as its formation slot.
    fn commit_formation(&mut self, side: Side) {
        let occupied: Vec<_> = self.combatants[side].roster.occupied().collect();
        for (slot, handle) in occupied {
            if let Some(card) = self.arena.get_mut(handle) {
                card.set_original_slot_index(slot);
            }
        }
    }

    /// Drop a card from the arena along with any form it replaced.
    fn discard(&mut self, handle: CardHandle) {
        if let Some(card) = self.arena.remove(handle) {
            if let Some(transformation) = card.transformation() {
                self.arena.remove(transformation.original);
            }
        }
    }

    // === Lifecycle ===

    /// Begin the battle.
    ///
    /// Fixes the current formation and fills every card's cooldown.
    pub fn start(&mut self) -> Result<(), BattleError> {
        if self.phase != BattlePhase::Preparing {
            return Err(BattleError::AlreadyStarted);
        }

        for side in Side::ALL {
            self.commit_formation(side);
            let handles: Vec<_> = self.combatants[side].roster.occupied().collect();
            for (_, handle) in handles {
                if let Some(card) = self.arena.get_mut(handle) {
                    card.reset_cooldown();
                }
            }
        }

        self.clock = 0.0;
        self.night = NightState::new(&self.config);
        self.outcome = None;
        self.phase = BattlePhase::Running;
        info!(
            player_cards = self.combatants[Side::Player].roster.len(),
            monster_cards = self.combatants[Side::Monster].roster.len(),
            "battle started"
        );
        Ok(())
    }

    /// Return to `Preparing` after a battle. HP carries over.
    pub fn prepare_next_battle(&mut self) -> Result<(), BattleError> {
        if self.phase != BattlePhase::Ended {
            return Err(BattleError::NotEnded);
        }

        for (_, combatant) in self.combatants.iter_mut() {
            combatant.reset_for_battle();
        }
        self.clock = 0.0;
        self.night = NightState::new(&self.config);
        self.outcome = None;
        self.phase = BattlePhase::Preparing;
        Ok(())
    }

    /// Advance the battle by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !self.is_running() || dt <= 0.0 {
            return;
        }

        self.clock += dt;
        self.update_night(dt);

        for side in Side::ALL {
            if !self.is_running() {
                break;
            }
            self.update_side(side, dt);
        }
    }

    fn update_night(&mut self, dt: f32) {
        let mut elapsed = dt;
        if !self.night.active && self.clock >= self.config.night_start {
            // Only time after dusk counts toward the first tick.
            elapsed = self.clock - self.config.night_start;
            self.night.active = true;
            info!(elapsed = self.clock, "night has fallen");
            self.emit(BattleEvent::NightStarted {
                elapsed: self.clock,
            });
        }
        if !self.night.active {
            return;
        }

        let interval = self.config.night_tick_interval;
        if interval <= 0.0 {
            return;
        }

        self.night.tick_timer += elapsed;
        while self.is_running() && self.night.tick_timer >= interval {
            self.night.tick_timer -= interval;

            let damage = self.night.damage;
            for (_, combatant) in self.combatants.iter_mut() {
                combatant.take_damage(damage, &self.config);
            }
            debug!(damage, "night damage");

            self.check_status();
            self.night.damage += self.config.night_damage_increment;
        }
    }

    fn update_side(&mut self, side: Side, dt: f32) {
        for slot in 0..ROSTER_SIZE {
            if !self.is_running() {
                return;
            }
            let Some(handle) = self.combatants[side].roster.get(slot) else {
                continue;
            };
            let Some(card) = self.arena.get_mut(handle) else {
                continue;
            };

            match card.update_cooldown(dt, &self.config) {
                CooldownTick::RevertRequested => {
                    if let Err(err) = self.revert_slot(side, slot) {
                        warn!(%side, slot, %err, "transformation revert failed");
                    }
                }
                CooldownTick::Ready => {
                    self.trigger_handle(side, handle, true);
                    self.check_status();
                }
                CooldownTick::Counting | CooldownTick::Frozen => {}
            }
        }

        if self.is_running() {
            self.combatants[side].process_statuses(dt, &self.config);
            self.check_status();
        }
    }

    /// Resolve a win if either side is down.
    ///
    /// Both down: the higher (less negative) overflow wins, and an exact tie
    /// goes to `config.tie_break_winner`. Returns the winner once decided.
    pub fn check_status(&mut self) -> Option<Side> {
        if !self.is_running() {
            return self.outcome.map(|o| o.winner);
        }

        let player = &self.combatants[Side::Player];
        let monster = &self.combatants[Side::Monster];

        let (winner, simultaneous) = match (player.is_defeated(), monster.is_defeated()) {
            (false, false) => return None,
            (true, false) => (Side::Monster, false),
            (false, true) => (Side::Player, false),
            (true, true) => {
                let winner = if player.overflow() > monster.overflow() {
                    Side::Player
                } else if monster.overflow() > player.overflow() {
                    Side::Monster
                } else {
                    self.config.tie_break_winner
                };
                (winner, true)
            }
        };

        self.finish(winner, simultaneous);
        Some(winner)
    }

    /// End the battle with a winner. Does nothing unless running.
    pub fn end_battle(&mut self, winner: Side) {
        self.finish(winner, false);
    }

    fn finish(&mut self, winner: Side, simultaneous: bool) {
        if !self.is_running() {
            return;
        }
        self.phase = BattlePhase::Ended;

        for side in Side::ALL {
            self.end_of_battle_reset(side);
        }

        let outcome = BattleOutcome {
            winner,
            elapsed: self.clock,
            simultaneous,
        };
        self.outcome = Some(outcome);
        info!(%winner, elapsed = self.clock, simultaneous, "battle ended");
        self.emit(BattleEvent::BattleEnded { outcome });
    }

    /// Put a roster back in shape for the next battle.
    ///
    /// Reverts transformations, clears buffs and freeze, zeroes cooldowns
    /// and restores the formation.
    fn end_of_battle_reset(&mut self, side: Side) {
        for slot in 0..ROSTER_SIZE {
            let transformed = self
                .card_at(side, slot)
                .is_some_and(Card::is_transformed);
            if transformed {
                if let Err(err) = self.revert_slot(side, slot) {
                    warn!(%side, slot, %err, "could not revert transformation");
                }
            }
        }

        let handles: Vec<_> = self.combatants[side].roster.occupied().collect();
        for (_, handle) in handles {
            if let Some(card) = self.arena.get_mut(handle) {
                card.clear_battle_buffs();
                card.clear_frozen();
                card.set_cooldown(0.0);
            }
        }

        self.combatants[side].roster.revert_shuffle(&mut self.arena);
    }

    // === Battle operations (Running only) ===

    /// Trigger the card in a slot now, regardless of its cooldown.
    pub fn trigger_card(&mut self, side: Side, slot: usize) -> Result<(), BattleError> {
        self.ensure_running()?;
        let handle = self.combatants[side].roster.try_get(slot)?;
        self.trigger_handle(side, handle, true);
        self.check_status();
        Ok(())
    }

    /// Cast, chain, restart the cooldown, then spend durability.
    fn trigger_handle(&mut self, side: Side, handle: CardHandle, allow_chain: bool) {
        let Some(card) = self.arena.get_mut(handle) else {
            return;
        };
        let casts = card.take_casts();
        let chain = card.chain_triggers();
        let skill = card.template().skill.clone();
        let slot = card.slot_index();

        debug!(%side, slot, identifier = card.identifier(), casts, "card triggered");
        self.emit(BattleEvent::CardTriggered {
            side,
            slot,
            handle,
            casts,
        });

        if !skill.is_idle() {
            for _ in 0..casts {
                if !self.is_running() {
                    break;
                }
                self.resolve_skill(side, handle, &skill);
            }
        }

        if allow_chain && chain > 0 && self.is_running() {
            let roster = &self.combatants[side].roster;
            let ready: Vec<_> = roster
                .position_of(handle)
                .map(|pos| roster.neighbors(pos))
                .unwrap_or_default()
                .into_iter()
                .filter(|n| self.arena.get(*n).is_some_and(Card::is_ready))
                .collect();

            for neighbor in ready {
                if !self.is_running() {
                    break;
                }
                self.trigger_handle(side, neighbor, false);
            }
        }

        let Some(card) = self.arena.get_mut(handle) else {
            return;
        };
        card.finish_trigger();

        if card.consume_durability() {
            if let Some(slot) = self.slot_of(side, handle) {
                if let Err(err) = self.destroy_slot(side, slot) {
                    warn!(%side, slot, %err, "failed to destroy exhausted card");
                }
            }
        }
    }

    /// Apply a card-level status to up to `count` random cards of `side`.
    ///
    /// Slots are visited in a shuffled order. Immune and empty slots are
    /// skipped without counting. Polymorph transforms the card in place.
    /// Returns how many cards were affected.
    pub fn apply_status_to_random_cards(
        &mut self,
        side: Side,
        count: usize,
        kind: StatusEffectKind,
        amount: f32,
        extra: Option<&str>,
    ) -> Result<usize, BattleError> {
        self.ensure_running()?;
        if count == 0 {
            return Ok(0);
        }

        let mut order: [usize; ROSTER_SIZE] = std::array::from_fn(|i| i);
        self.roster_rng.shuffle(&mut order);

        let mut applied = 0;
        for slot in order {
            if self.combatants[side].roster.get(slot).is_none() {
                continue;
            }
            match self.apply_status_to_slot(side, slot, kind, amount, extra) {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(err) => warn!(%side, slot, %err, "card status failed"),
            }

            if applied >= count {
                break;
            }
        }
        Ok(applied)
    }

    /// Apply a card-level status to the card in one slot.
    ///
    /// Returns false if the card is immune or the kind is not card-level.
    /// Polymorph transforms the card in place.
    pub fn apply_status_to_card(
        &mut self,
        side: Side,
        slot: usize,
        kind: StatusEffectKind,
        amount: f32,
        extra: Option<&str>,
    ) -> Result<bool, BattleError> {
        self.ensure_running()?;
        self.apply_status_to_slot(side, slot, kind, amount, extra)
    }

    fn apply_status_to_slot(
        &mut self,
        side: Side,
        slot: usize,
        kind: StatusEffectKind,
        amount: f32,
        extra: Option<&str>,
    ) -> Result<bool, BattleError> {
        let handle = self.combatants[side].roster.try_get(slot)?;
        let card = self
            .arena
            .get_mut(handle)
            .ok_or(BattleError::StaleHandle(handle))?;

        match card.apply_status_effect(kind, amount, extra) {
            StatusApplication::PolymorphRequested { into, duration } => {
                self.transform_slot(side, slot, &into, duration)?;
                Ok(true)
            }
            StatusApplication::Immune => {
                debug!(%side, slot, %kind, "card is immune");
                Ok(false)
            }
            result => Ok(result.is_applied()),
        }
    }

    /// Apply a combatant-level status. Returns false for card-level kinds.
    pub fn apply_status_to_combatant(
        &mut self,
        side: Side,
        kind: StatusEffectKind,
        amount: f32,
    ) -> Result<bool, BattleError> {
        self.ensure_running()?;
        Ok(self.combatants[side].apply_status(kind, amount))
    }

    pub fn reduce_status(
        &mut self,
        side: Side,
        kind: StatusEffectKind,
        amount: u32,
    ) -> Result<(), BattleError> {
        self.ensure_running()?;
        self.combatants[side].reduce_status(kind, amount);
        Ok(())
    }

    pub fn reduce_status_percent(
        &mut self,
        side: Side,
        kind: StatusEffectKind,
        fraction: f32,
    ) -> Result<(), BattleError> {
        self.ensure_running()?;
        self.combatants[side].reduce_status_percent(kind, fraction);
        Ok(())
    }

    /// Replace the card in a slot with a new card for `duration` seconds.
    pub fn mutate_card(
        &mut self,
        side: Side,
        slot: usize,
        identifier: &str,
        duration: f32,
    ) -> Result<CardHandle, BattleError> {
        self.ensure_running()?;
        self.transform_slot(side, slot, identifier, duration)
    }

    /// Restore the original card in a transformed slot.
    pub fn revert_mutation(&mut self, side: Side, slot: usize) -> Result<CardHandle, BattleError> {
        self.ensure_running()?;
        self.revert_slot(side, slot)
    }

    /// Destroy the card in a slot, running its deathrattle first.
    pub fn destroy_card(&mut self, side: Side, slot: usize) -> Result<(), BattleError> {
        self.ensure_running()?;
        self.destroy_slot(side, slot)
    }

    /// Build a card into the lowest empty slot.
    pub fn spawn_card_to_random_empty_slot(
        &mut self,
        side: Side,
        identifier: &str,
    ) -> Result<CardHandle, BattleError> {
        self.ensure_running()?;
        self.spawn(side, identifier)
    }

    /// Shuffle a roster.
    pub fn shuffle_roster(&mut self, side: Side) -> Result<(), BattleError> {
        self.ensure_running()?;
        self.shuffle(side);
        Ok(())
    }

    /// Swap random pairs of slots. Returns the swaps performed.
    pub fn disrupt_roster(&mut self, side: Side, swaps: usize) -> Result<usize, BattleError> {
        self.ensure_running()?;
        Ok(self.disrupt(side, swaps))
    }

    // === Unfenced internals ===

    pub(crate) fn transform_slot(
        &mut self,
        side: Side,
        slot: usize,
        identifier: &str,
        duration: f32,
    ) -> Result<CardHandle, BattleError> {
        let current = self.combatants[side].roster.try_get(slot)?;
        let current_card = self.arena.try_get(current)?;

        // A substitute being transformed again links back to the root card.
        let (original, intermediate) = match current_card.transformation() {
            Some(t) => (t.original, Some(current)),
            None => (current, None),
        };
        let formation_slot = self
            .arena
            .get(original)
            .map_or(slot, Card::original_slot_index);

        let mut substitute = self
            .registry
            .create_card(identifier, side, slot)
            .inspect_err(|err| warn!(%side, slot, %err, "cannot build substitute"))?;
        substitute.set_original_slot_index(formation_slot);
        substitute.set_transformation(original, duration);

        let handle = self.arena.insert(substitute);
        self.combatants[side]
            .roster
            .place(slot, handle, &mut self.arena)?;
        if let Some(intermediate) = intermediate {
            self.arena.remove(intermediate);
        }

        debug!(%side, slot, identifier, duration, "card transformed");
        self.emit(BattleEvent::CardTransformed {
            side,
            slot,
            original,
            substitute: handle,
        });
        Ok(handle)
    }

    pub(crate) fn revert_slot(&mut self, side: Side, slot: usize) -> Result<CardHandle, BattleError> {
        let current = self.combatants[side].roster.try_get(slot)?;
        let transformation = self
            .arena
            .try_get(current)?
            .transformation()
            .ok_or(BattleError::NotTransformed(slot))?;
        let original = transformation.original;
        if !self.arena.contains(original) {
            return Err(BattleError::StaleHandle(original));
        }

        self.combatants[side]
            .roster
            .place(slot, original, &mut self.arena)?;
        self.arena.remove(current);

        debug!(%side, slot, "transformation reverted");
        self.emit(BattleEvent::CardReverted {
            side,
            slot,
            original,
        });
        Ok(original)
    }

    pub(crate) fn destroy_slot(&mut self, side: Side, slot: usize) -> Result<(), BattleError> {
        let handle = self.combatants[side].roster.try_get(slot)?;
        let card = self.arena.try_get(handle)?;
        let identifier = card.identifier().to_string();

        if let Some(deathrattle) = card.template().deathrattle.clone() {
            self.resolve_skill(side, handle, &deathrattle);
        }

        let slot = self.slot_of(side, handle).unwrap_or(slot);
        self.combatants[side].roster.take(slot)?;
        self.discard(handle);

        debug!(%side, slot, identifier = identifier.as_str(), "card destroyed");
        self.emit(BattleEvent::CardDestroyed {
            side,
            slot,
            identifier,
        });
        Ok(())
    }

    pub(crate) fn spawn(&mut self, side: Side, identifier: &str) -> Result<CardHandle, BattleError> {
        let Some(slot) = self.combatants[side].roster.first_empty() else {
            warn!(%side, identifier, "no empty slot for summon");
            return Err(BattleError::NoEmptySlot);
        };

        let card = self
            .registry
            .create_card(identifier, side, slot)
            .inspect_err(|err| warn!(%side, slot, %err, "summon failed"))?;
        let handle = self.arena.insert(card);
        self.combatants[side]
            .roster
            .place(slot, handle, &mut self.arena)?;

        debug!(%side, slot, identifier, "card summoned");
        self.emit(BattleEvent::CardSummoned { side, slot, handle });
        Ok(handle)
    }

    pub(crate) fn shuffle(&mut self, side: Side) {
        self.combatants[side]
            .roster
            .shuffle(&mut self.roster_rng, &mut self.arena);
        debug!(%side, "roster shuffled");
        self.emit(BattleEvent::RosterShuffled { side });
    }

    pub(crate) fn disrupt(&mut self, side: Side, swaps: usize) -> usize {
        if swaps == 0 {
            return 0;
        }
        let performed = self.combatants[side]
            .roster
            .disrupt(swaps, &mut self.roster_rng, &mut self.arena);
        debug!(%side, swaps = performed, "roster disrupted");
        self.emit(BattleEvent::RosterDisrupted {
            side,
            swaps: performed,
        });
        performed
    }
}
