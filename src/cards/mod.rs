//! Card system: templates, skills, runtime cards, storage and lookup.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Static card data (stats, skill, payloads, immunities)
//! - `Skill`: Closed set of things a card can do when it triggers
//! - `Card`: Runtime card state (cooldown, timers, echo, growth, transformation)
//! - `CardArena`: Handle-indexed storage for every live card
//! - `CardRegistry`: Identifier lookup that builds new cards

pub mod arena;
pub mod definition;
pub mod instance;
pub mod registry;
pub mod skill;

pub use arena::CardArena;
pub use definition::{Aura, CardStat, CardTemplate, Durability, Rarity, SummonPayload};
pub use instance::{
    roll_crit, Card, CooldownTick, StatusApplication, Transformation, DEFAULT_POLYMORPH_SUBSTITUTE,
};
pub use registry::CardRegistry;
pub use skill::Skill;
