//! Stacking damage/heal-over-time bookkeeping.
//!
//! `StatusEffectEngine` holds one counter per stacking kind (bleed, poison,
//! burn, heal). Each counter has its own tick timer that only runs while
//! the counter has stacks. When a timer reaches its interval the engine
//! emits a `StackTick` worth one point per stack and restarts the timer.
//!
//! The engine does not touch HP itself. It reports ticks in resolution
//! order (bleed, poison, burn, heal) and the owner routes each one:
//! bleed and burn through shield, poison straight to HP, heal to HP.
//!
//! Burn is self-depleting: it loses one stack every time it ticks.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::status::StatusEffectKind;
use crate::core::BattleConfig;

/// Stacks of one kind plus the time since its last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StackCounter {
    pub stacks: u32,
    pub elapsed: f32,
}

/// A periodic tick produced by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackTick {
    pub kind: StatusEffectKind,
    /// Damage or heal amount (stacks at tick time).
    pub amount: f32,
}

/// Per-entity stacking status state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectEngine {
    bleed: StackCounter,
    poison: StackCounter,
    burn: StackCounter,
    heal: StackCounter,
}

impl StatusEffectEngine {
    /// Create an engine with no stacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: StatusEffectKind) -> Option<&StackCounter> {
        match kind {
            StatusEffectKind::Bleed => Some(&self.bleed),
            StatusEffectKind::Poison => Some(&self.poison),
            StatusEffectKind::Burn => Some(&self.burn),
            StatusEffectKind::Heal => Some(&self.heal),
            _ => None,
        }
    }

    fn counter_mut(&mut self, kind: StatusEffectKind) -> Option<&mut StackCounter> {
        match kind {
            StatusEffectKind::Bleed => Some(&mut self.bleed),
            StatusEffectKind::Poison => Some(&mut self.poison),
            StatusEffectKind::Burn => Some(&mut self.burn),
            StatusEffectKind::Heal => Some(&mut self.heal),
            _ => None,
        }
    }

    /// Current stacks of `kind` (0 for non-stacking kinds).
    #[must_use]
    pub fn stacks(&self, kind: StatusEffectKind) -> u32 {
        self.counter(kind).map_or(0, |c| c.stacks)
    }

    /// Add stacks. Returns false if `kind` is not a stacking kind.
    pub fn apply(&mut self, kind: StatusEffectKind, stacks: u32) -> bool {
        match self.counter_mut(kind) {
            Some(counter) => {
                counter.stacks = counter.stacks.saturating_add(stacks);
                true
            }
            None => false,
        }
    }

    /// Remove a fixed number of stacks, flooring at zero.
    pub fn reduce(&mut self, kind: StatusEffectKind, amount: u32) {
        if let Some(counter) = self.counter_mut(kind) {
            counter.stacks = counter.stacks.saturating_sub(amount);
        }
    }

    /// Remove a fraction of stacks: `floor(stacks * (1 - fraction))` remain.
    ///
    /// `fraction` is clamped to `[0, 1]`.
    pub fn reduce_by_percent(&mut self, kind: StatusEffectKind, fraction: f32) {
        let keep = 1.0 - fraction.clamp(0.0, 1.0);
        if let Some(counter) = self.counter_mut(kind) {
            counter.stacks = (counter.stacks as f32 * keep).floor() as u32;
        }
    }

    /// Drop every stack and timer.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if any counter has stacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        StatusEffectKind::STACKING.iter().all(|k| self.stacks(*k) == 0)
    }

    /// Advance all timers by `dt` and collect the ticks that fired.
    pub fn tick(&mut self, dt: f32, config: &BattleConfig) -> SmallVec<[StackTick; 4]> {
        let mut fired = SmallVec::new();

        for kind in StatusEffectKind::STACKING {
            let interval = Self::interval(kind, config);
            let Some(counter) = self.counter_mut(kind) else {
                continue;
            };
            if counter.stacks == 0 {
                continue;
            }

            counter.elapsed += dt;
            if counter.elapsed < interval {
                continue;
            }
            counter.elapsed = 0.0;

            fired.push(StackTick {
                kind,
                amount: counter.stacks as f32,
            });

            if kind == StatusEffectKind::Burn {
                counter.stacks -= 1;
            }
        }

        fired
    }

    /// Tick interval for a stacking kind.
    #[must_use]
    pub fn interval(kind: StatusEffectKind, config: &BattleConfig) -> f32 {
        match kind {
            StatusEffectKind::Bleed => config.bleed_interval,
            StatusEffectKind::Poison => config.poison_interval,
            StatusEffectKind::Burn => config.burn_interval,
            StatusEffectKind::Heal => config.heal_interval,
            _ => f32::INFINITY,
        }
    }
}
