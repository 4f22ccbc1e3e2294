//! Outbound battle notifications.
//!
//! The coordinator queues a `BattleEvent` for everything a presentation
//! layer might react to. Callers pull them with `drain_events`.

use serde::{Deserialize, Serialize};

use crate::core::{CardHandle, Side};

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub winner: Side,
    /// Battle clock when it ended.
    pub elapsed: f32,
    /// Both sides were at or below zero HP.
    pub simultaneous: bool,
}

impl BattleOutcome {
    #[must_use]
    pub fn loser(&self) -> Side {
        self.winner.opponent()
    }
}

/// Something that happened during a battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    NightStarted {
        elapsed: f32,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
    CardTriggered {
        side: Side,
        slot: usize,
        handle: CardHandle,
        casts: u32,
    },
    CardDestroyed {
        side: Side,
        slot: usize,
        identifier: String,
    },
    CardSummoned {
        side: Side,
        slot: usize,
        handle: CardHandle,
    },
    CardTransformed {
        side: Side,
        slot: usize,
        original: CardHandle,
        substitute: CardHandle,
    },
    CardReverted {
        side: Side,
        slot: usize,
        original: CardHandle,
    },
    RosterShuffled {
        side: Side,
    },
    RosterDisrupted {
        side: Side,
        swaps: usize,
    },
}

impl BattleEvent {
    /// Side the event concerns, if it is side-specific.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            BattleEvent::NightStarted { .. } | BattleEvent::BattleEnded { .. } => None,
            BattleEvent::CardTriggered { side, .. }
            | BattleEvent::CardDestroyed { side, .. }
            | BattleEvent::CardSummoned { side, .. }
            | BattleEvent::CardTransformed { side, .. }
            | BattleEvent::CardReverted { side, .. }
            | BattleEvent::RosterShuffled { side }
            | BattleEvent::RosterDisrupted { side, .. } => Some(*side),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_side() {
        assert_eq!(BattleEvent::NightStarted { elapsed: 60.0 }.side(), None);
        assert_eq!(
            BattleEvent::RosterShuffled { side: Side::Monster }.side(),
            Some(Side::Monster)
        );
    }

    #[test]
    fn test_outcome_serde() {
        let outcome = BattleOutcome {
            winner: Side::Player,
            elapsed: 12.5,
            simultaneous: true,
        };
        assert_eq!(outcome.loser(), Side::Monster);

        let json = serde_json::to_string(&BattleEvent::BattleEnded { outcome }).unwrap();
        let back: BattleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BattleEvent::BattleEnded { outcome });
    }
}
