//! Starter card catalog.
//!
//! A small set of ready-made cards so the engine can run a battle without
//! any external content:
//! - Mercenaries (player side): warriors, shieldbearers, healers and a few
//!   status and support cards
//! - Monsters: goblin and witch
//! - Sheep, the polymorph substitute, which either side may own

mod starter;

pub use starter::{starter_registry, MERCENARY_IDS, MONSTER_IDS};
