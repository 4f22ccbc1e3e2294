//! Status effects.
//!
//! - `StatusEffectKind`: every status the engine understands
//! - `StatusEffectEngine`: DoT/HoT stacks with per-kind tick timers
//! - `DamageModifier`: the shock/sturdy pair on a combatant
//! - `ExclusiveTimer`: "at most one of these, with a duration" storage,
//!   shared by shock/sturdy and haste/slow
//!
//! ## Routing
//!
//! Stacking kinds and damage modifiers land on a combatant. Everything else
//! (freeze, haste, slow, echo, price modifiers, polymorph) lands on a card.
//! `StatusEffectKind::is_card_level` tells the two apart.

mod modifier;
mod stacks;
mod status;
mod timer;

pub use modifier::DamageModifier;
pub use stacks::{StackCounter, StackTick, StatusEffectEngine};
pub use status::StatusEffectKind;
pub use timer::ExclusiveTimer;
