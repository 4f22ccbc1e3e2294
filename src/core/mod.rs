//! Core engine types: sides, card handles, RNG, configuration, errors.
//!
//! These are the leaf building blocks shared by every other module.

pub mod side;
pub mod handle;
pub mod rng;
pub mod config;
pub mod error;

pub use side::{Side, SideMap};
pub use handle::CardHandle;
pub use rng::{GameRng, GameRngState};
pub use config::{BattleConfig, ROSTER_SIZE};
pub use error::BattleError;
