//! # rust-autobattle
//!
//! A tick-driven two-roster card battle engine.
//!
//! Two combatants each field up to seven cards. Every card is a
//! cooldown-driven actor: when its cooldown runs out it casts its skill
//! against the opposing side or its own. Battles end when a combatant's HP
//! reaches zero, and an escalating night phase guarantees they end.
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: The `BattleCoordinator` owns both combatants and
//!    every card. Cards are addressed by `CardHandle` and never hold
//!    references to their owner or target.
//!
//! 2. **Deterministic**: All randomness flows from one seeded `GameRng`.
//!    The same seed and the same `update` sequence replay the same battle.
//!
//! 3. **Closed Variants**: Sides, skills and status kinds are enums, so
//!    every dispatch is checked at compile time.
//!
//! ## Modules
//!
//! - `core`: Sides, handles, RNG, configuration, errors
//! - `effects`: Status kinds, DoT/HoT stacks, shock/sturdy
//! - `cards`: Templates, skills, runtime cards, arena, registry
//! - `battle`: Rosters, combatants, events, the coordinator
//! - `catalog`: Starter cards

pub mod core;
pub mod effects;
pub mod cards;
pub mod battle;
pub mod catalog;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BattleError, CardHandle, GameRng, GameRngState, Side, SideMap, ROSTER_SIZE,
};

pub use crate::effects::{DamageModifier, StatusEffectEngine, StatusEffectKind};

pub use crate::cards::{
    Card, CardArena, CardRegistry, CardStat, CardTemplate, Durability, Rarity, Skill,
    StatusApplication,
};

pub use crate::battle::{
    BattleCoordinator, BattleEvent, BattleOutcome, BattlePhase, Combatant, Roster,
};

pub use crate::catalog::starter_registry;
