//! Mutually exclusive timed states.
//!
//! Several statuses come in opposed pairs where at most one may be active:
//! shock/sturdy on a combatant, haste/slow on a card. `ExclusiveTimer`
//! stores the single active state and its remaining duration, so the
//! "at most one" invariant holds by construction.
//!
//! Reapplying the active state keeps the **longer** of the remaining and new
//! durations. Applying the opposite state replaces it outright.

use serde::{Deserialize, Serialize};

/// At most one of several timed states, with its remaining seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExclusiveTimer<K> {
    active: Option<(K, f32)>,
}

impl<K> Default for ExclusiveTimer<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: Copy + PartialEq> ExclusiveTimer<K> {
    /// Create an empty timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `kind` for `duration` seconds.
    pub fn apply(&mut self, kind: K, duration: f32) {
        self.active = match self.active {
            Some((current, remaining)) if current == kind => Some((kind, remaining.max(duration))),
            _ => Some((kind, duration)),
        };
    }

    /// The active state, if any.
    #[must_use]
    pub fn active(&self) -> Option<K> {
        self.active.map(|(kind, _)| kind)
    }

    /// Check whether `kind` is the active state.
    #[must_use]
    pub fn is(&self, kind: K) -> bool {
        self.active() == Some(kind)
    }

    /// Remaining seconds of `kind` (0 if it is not active).
    #[must_use]
    pub fn remaining(&self, kind: K) -> f32 {
        match self.active {
            Some((current, remaining)) if current == kind => remaining,
            _ => 0.0,
        }
    }

    /// Count down by `dt`. Returns the state that expired on this tick.
    pub fn tick(&mut self, dt: f32) -> Option<K> {
        let (kind, remaining) = self.active?;
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.active = None;
            Some(kind)
        } else {
            self.active = Some((kind, remaining));
            None
        }
    }

    /// Drop the active state.
    pub fn clear(&mut self) {
        self.active = None;
    }
}
