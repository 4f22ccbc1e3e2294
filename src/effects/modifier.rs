//! Damage-taken modifiers.
//!
//! A combatant can be **shocked** (takes more damage) or **sturdy** (takes
//! less), never both. Applying one clears the other; reapplying the active
//! one keeps the longer duration.

use serde::{Deserialize, Serialize};

use super::status::StatusEffectKind;
use super::timer::ExclusiveTimer;
use crate::core::BattleConfig;

/// Shock/sturdy state of a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageModifier {
    timer: ExclusiveTimer<StatusEffectKind>,
}

impl DamageModifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply shock or sturdy for `duration` seconds.
    ///
    /// Returns false (and changes nothing) for any other kind.
    pub fn apply(&mut self, kind: StatusEffectKind, duration: f32) -> bool {
        if !kind.is_damage_modifier() {
            return false;
        }
        self.timer.apply(kind, duration);
        true
    }

    #[must_use]
    pub fn is_shocked(&self) -> bool {
        self.timer.is(StatusEffectKind::Shock)
    }

    #[must_use]
    pub fn is_sturdy(&self) -> bool {
        self.timer.is(StatusEffectKind::Sturdy)
    }

    /// Remaining seconds of `kind`.
    #[must_use]
    pub fn remaining(&self, kind: StatusEffectKind) -> f32 {
        self.timer.remaining(kind)
    }

    /// Multiplier for incoming damage.
    #[must_use]
    pub fn multiplier(&self, config: &BattleConfig) -> f32 {
        match self.timer.active() {
            Some(StatusEffectKind::Shock) => config.shock_multiplier,
            Some(StatusEffectKind::Sturdy) => config.sturdy_multiplier,
            _ => 1.0,
        }
    }

    /// Count down. Returns the kind that wore off, if any.
    pub fn tick(&mut self, dt: f32) -> Option<StatusEffectKind> {
        self.timer.tick(dt)
    }

    pub fn clear(&mut self) {
        self.timer.clear();
    }
}
