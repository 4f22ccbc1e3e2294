//! Battle configuration.
//!
//! `BattleConfig` collects every tunable the simulation reads: the night
//! phase schedule, DoT/HoT tick intervals, damage-taken multipliers, cooldown
//! rate multipliers and the simultaneous-death tie-break policy.
//!
//! All fields have defaults, so a partial config deserializes cleanly:
//!
//! ```
//! use rust_autobattle::core::BattleConfig;
//!
//! let config = BattleConfig::default().with_night_start(30.0);
//! assert_eq!(config.night_start, 30.0);
//! assert_eq!(config.night_tick_interval, 0.5);
//! ```

use serde::{Deserialize, Serialize};

use super::error::BattleError;
use super::side::Side;

/// Number of slots in every roster. Fixed.
pub const ROSTER_SIZE: usize = 7;

/// Tunables for one battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    // === Night phase ===
    /// Seconds of battle before night falls.
    pub night_start: f32,

    /// Seconds between night damage ticks.
    pub night_tick_interval: f32,

    /// Damage dealt to both sides on the first night tick.
    pub night_initial_damage: f32,

    /// Added to the night damage after every tick.
    pub night_damage_increment: f32,

    // === Stacking statuses ===
    /// Seconds between bleed ticks.
    pub bleed_interval: f32,

    /// Seconds between poison ticks.
    pub poison_interval: f32,

    /// Seconds between burn ticks.
    pub burn_interval: f32,

    /// Seconds between heal-over-time ticks.
    pub heal_interval: f32,

    // === Multipliers ===
    /// Damage taken while shocked.
    pub shock_multiplier: f32,

    /// Damage taken while sturdy.
    pub sturdy_multiplier: f32,

    /// Cooldown countdown rate while hasted.
    pub haste_rate: f32,

    /// Cooldown countdown rate while slowed.
    pub slow_rate: f32,

    /// Multiplier applied to a skill's value on a critical hit.
    pub crit_multiplier: f32,

    // === Resolution ===
    /// Winner when both sides die on the same tick with identical overflow.
    ///
    /// This is a policy choice, not a derived rule.
    pub tie_break_winner: Side,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            night_start: 60.0,
            night_tick_interval: 0.5,
            night_initial_damage: 1.0,
            night_damage_increment: 1.0,
            bleed_interval: 1.5,
            poison_interval: 3.0,
            burn_interval: 0.5,
            heal_interval: 2.0,
            shock_multiplier: 1.2,
            sturdy_multiplier: 0.8,
            haste_rate: 2.0,
            slow_rate: 0.5,
            crit_multiplier: 2.0,
            tie_break_winner: Side::Player,
        }
    }
}

impl BattleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set when night falls.
    #[must_use]
    pub fn with_night_start(mut self, seconds: f32) -> Self {
        self.night_start = seconds;
        self
    }

    /// Set the night tick interval.
    #[must_use]
    pub fn with_night_tick_interval(mut self, seconds: f32) -> Self {
        self.night_tick_interval = seconds;
        self
    }

    /// Set the first night tick's damage and the per-tick escalation.
    #[must_use]
    pub fn with_night_damage(mut self, initial: f32, increment: f32) -> Self {
        self.night_initial_damage = initial;
        self.night_damage_increment = increment;
        self
    }

    /// Set the simultaneous-death tie-break winner.
    #[must_use]
    pub fn with_tie_break_winner(mut self, side: Side) -> Self {
        self.tie_break_winner = side;
        self
    }

    /// Set the haste and slow countdown rates.
    #[must_use]
    pub fn with_cooldown_rates(mut self, haste: f32, slow: f32) -> Self {
        self.haste_rate = haste;
        self.slow_rate = slow;
        self
    }

    /// Check that every schedule field can drive the tick loops.
    ///
    /// Tick intervals must be positive and finite, and night must start at a
    /// finite, non-negative time.
    pub fn validate(&self) -> Result<(), BattleError> {
        let intervals = [
            ("night_tick_interval", self.night_tick_interval),
            ("bleed_interval", self.bleed_interval),
            ("poison_interval", self.poison_interval),
            ("burn_interval", self.burn_interval),
            ("heal_interval", self.heal_interval),
        ];
        for (field, value) in intervals {
            if !(value.is_finite() && value > 0.0) {
                return Err(BattleError::InvalidConfig(field));
            }
        }
        if !(self.night_start.is_finite() && self.night_start >= 0.0) {
            return Err(BattleError::InvalidConfig("night_start"));
        }
        Ok(())
    }

    /// Set the shock and sturdy damage-taken multipliers.
    #[must_use]
    pub fn with_damage_multipliers(mut self, shock: f32, sturdy: f32) -> Self {
        self.shock_multiplier = shock;
        self.sturdy_multiplier = sturdy;
        self
    }
}
