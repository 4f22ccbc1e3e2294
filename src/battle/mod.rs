//! Battle simulation: rosters, combatants, events and the coordinator.
//!
//! ## Key Types
//!
//! - `Roster`: Seven slots of card handles with shift/shuffle/disrupt ops
//! - `Combatant`: HP, shield, statuses and a roster for one side
//! - `BattleCoordinator`: Owns both combatants and drives the tick loop
//! - `BattleEvent`: Notifications queued for a presentation layer

pub mod combatant;
pub mod coordinator;
pub mod event;
mod resolver;
pub mod roster;

pub use combatant::{Combatant, DamageReport, Progression, HP_PER_LEVEL, XP_PER_LEVEL};
pub use coordinator::{BattleCoordinator, BattlePhase, NightState};
pub use event::{BattleEvent, BattleOutcome};
pub use roster::Roster;
