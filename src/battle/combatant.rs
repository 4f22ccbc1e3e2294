//! Combatants: one side's body and roster.
//!
//! A `Combatant` is the thing that wins or loses: it has HP, a shield, a
//! seven-slot `Roster`, stacking statuses and the shock/sturdy modifier. The
//! player side can also carry progression (level/XP) and an enrage
//! threshold.
//!
//! ## Damage Paths
//!
//! - `take_damage`: shock/sturdy multiplier, round, shield first, then HP
//! - `lose_health`: straight to HP (poison)
//!
//! HP never drops below zero. How far below zero a hit would have taken it
//! is kept as `overflow`, which breaks ties when both sides die together.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::roster::Roster;
use crate::core::{BattleConfig, Side};
use crate::effects::{DamageModifier, StackTick, StatusEffectEngine, StatusEffectKind};

/// Max HP gained per level.
pub const HP_PER_LEVEL: f32 = 10.0;

/// XP needed for each level.
pub const XP_PER_LEVEL: u32 = 10;

/// What a `take_damage` call did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DamageReport {
    /// Damage after multipliers and rounding.
    pub total: f32,
    pub absorbed: f32,
    pub to_health: f32,
}

/// Level and experience.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: XP_PER_LEVEL,
        }
    }
}

/// One side of a battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    side: Side,
    hp: f32,
    max_hp: f32,
    shield: f32,
    overflow: f32,

    pub(crate) roster: Roster,
    statuses: StatusEffectEngine,
    modifier: DamageModifier,

    progression: Option<Progression>,
    enrage_threshold: Option<f32>,
}

impl Combatant {
    /// Create a combatant at full HP with an empty roster.
    #[must_use]
    pub fn new(side: Side, max_hp: f32) -> Self {
        let max_hp = max_hp.max(1.0);
        Self {
            side,
            hp: max_hp,
            max_hp,
            shield: 0.0,
            overflow: 0.0,
            roster: Roster::new(),
            statuses: StatusEffectEngine::new(),
            modifier: DamageModifier::new(),
            progression: None,
            enrage_threshold: None,
        }
    }

    /// Track level and XP.
    #[must_use]
    pub fn with_progression(mut self) -> Self {
        self.progression = Some(Progression::default());
        self
    }

    /// Become enraged below `fraction` of max HP.
    #[must_use]
    pub fn with_enrage_threshold(mut self, fraction: f32) -> Self {
        self.enrage_threshold = Some(fraction);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The side this combatant attacks.
    #[must_use]
    pub fn target(&self) -> Side {
        self.side.opponent()
    }

    #[must_use]
    pub fn hp(&self) -> f32 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    #[must_use]
    pub fn shield(&self) -> f32 {
        self.shield
    }

    /// Lowest raw HP reached this battle (0 if HP never went negative).
    #[must_use]
    pub fn overflow(&self) -> f32 {
        self.overflow
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0.0
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn statuses(&self) -> &StatusEffectEngine {
        &self.statuses
    }

    #[must_use]
    pub fn modifier(&self) -> &DamageModifier {
        &self.modifier
    }

    #[must_use]
    pub fn progression(&self) -> Option<Progression> {
        self.progression
    }

    /// Below the enrage threshold. Always false without one.
    #[must_use]
    pub fn is_enraged(&self) -> bool {
        self.enrage_threshold
            .is_some_and(|fraction| self.hp < self.max_hp * fraction)
    }

    // === Health ===

    /// Take a hit through the damage modifier and shield.
    pub fn take_damage(&mut self, amount: f32, config: &BattleConfig) -> DamageReport {
        let total = (amount * self.modifier.multiplier(config)).round().max(0.0);

        let absorbed = total.min(self.shield);
        self.shield -= absorbed;
        let to_health = total - absorbed;

        if to_health > 0.0 {
            self.lose_health(to_health);
        }

        debug!(side = %self.side, total, absorbed, hp = self.hp, "took damage");
        DamageReport {
            total,
            absorbed,
            to_health,
        }
    }

    /// Lose HP directly, ignoring shield and modifiers.
    pub fn lose_health(&mut self, amount: f32) {
        let raw = self.hp - amount;
        if raw < 0.0 {
            self.overflow = self.overflow.min(raw);
        }
        self.hp = raw.max(0.0);
    }

    /// Restore HP up to max.
    pub fn add_health(&mut self, amount: f32) {
        self.hp = (self.hp + amount).clamp(0.0, self.max_hp);
    }

    pub fn add_shield(&mut self, amount: f32) {
        self.shield = (self.shield + amount).max(0.0);
    }

    /// Raise max HP and heal to full.
    pub fn increase_max_hp(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.max_hp += amount;
        self.hp = self.max_hp;
    }

    /// Lower max HP (never below 1), clamping current HP.
    pub fn decrease_max_hp(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.max_hp = (self.max_hp - amount).max(1.0);
        self.hp = self.hp.min(self.max_hp);
    }

    /// Gain XP. Each level raises max HP and heals to full.
    ///
    /// Returns the number of levels gained. Does nothing without progression.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        let Some(progression) = &mut self.progression else {
            return 0;
        };

        progression.xp += amount;
        let mut gained = 0;
        while progression.xp >= progression.xp_to_next {
            progression.xp -= progression.xp_to_next;
            progression.level += 1;
            gained += 1;
        }

        if gained > 0 {
            self.max_hp += HP_PER_LEVEL * gained as f32;
            self.hp = self.max_hp;
        }
        gained
    }

    // === Statuses ===

    /// Apply a combatant-level status.
    ///
    /// Stacking kinds add `amount` stacks; shock/sturdy last `amount`
    /// seconds. Returns false for card-level kinds.
    pub fn apply_status(&mut self, kind: StatusEffectKind, amount: f32) -> bool {
        if kind.is_stacking() {
            self.statuses.apply(kind, amount.max(0.0).round() as u32)
        } else {
            self.modifier.apply(kind, amount)
        }
    }

    pub fn reduce_status(&mut self, kind: StatusEffectKind, amount: u32) {
        self.statuses.reduce(kind, amount);
    }

    pub fn reduce_status_percent(&mut self, kind: StatusEffectKind, fraction: f32) {
        self.statuses.reduce_by_percent(kind, fraction);
    }

    /// Run DoT/HoT ticks and count down shock/sturdy.
    ///
    /// Ticks resolve in order and stop once this combatant is defeated.
    /// Returns the ticks that were resolved.
    pub fn process_statuses(&mut self, dt: f32, config: &BattleConfig) -> Vec<StackTick> {
        let fired = self.statuses.tick(dt, config);
        let mut resolved = Vec::with_capacity(fired.len());

        for tick in fired {
            if self.is_defeated() {
                break;
            }
            match tick.kind {
                StatusEffectKind::Bleed | StatusEffectKind::Burn => {
                    self.take_damage(tick.amount, config);
                }
                StatusEffectKind::Poison => self.lose_health(tick.amount),
                StatusEffectKind::Heal => self.add_health(tick.amount),
                _ => {}
            }
            debug!(side = %self.side, kind = %tick.kind, amount = tick.amount, "status tick");
            resolved.push(tick);
        }

        if let Some(expired) = self.modifier.tick(dt) {
            debug!(side = %self.side, kind = %expired, "modifier wore off");
        }
        resolved
    }

    /// Clear per-battle state: shield, statuses, modifier, overflow.
    pub fn reset_for_battle(&mut self) {
        self.shield = 0.0;
        self.overflow = 0.0;
        self.statuses.clear();
        self.modifier.clear();
    }
}
