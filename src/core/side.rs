//! Battle sides and per-side data storage.
//!
//! ## Side
//!
//! A battle always has exactly two sides: the player's lord and the
//! monster party. Every card is owned by one side, and every side attacks
//! the other. `Side` is a closed variant so ownership dispatch is checked
//! at compile time.
//!
//! ## SideMap
//!
//! Fixed two-entry storage indexed by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Owner of a combatant and of every card in its roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The player's lord and mercenaries.
    Player,
    /// The monster party.
    Monster,
}

impl Side {
    /// Both sides in update order (player first).
    pub const ALL: [Side; 2] = [Side::Player, Side::Monster];

    /// The side this side attacks.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Monster,
            Side::Monster => Side::Player,
        }
    }

    /// Storage index (0 = player, 1 = monster).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Monster => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Monster => write!(f, "Monster"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_autobattle::core::{Side, SideMap};
///
/// let mut hp: SideMap<f32> = SideMap::new(|side| match side {
///     Side::Player => 100.0,
///     Side::Monster => 80.0,
/// });
///
/// hp[Side::Monster] -= 20.0;
/// assert_eq!(hp[Side::Monster], 60.0);
/// assert_eq!(hp[Side::Player], 100.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Player), factory(Side::Monster)],
        }
    }

    /// Create a SideMap from explicit player and monster values.
    pub fn from_pair(player: T, monster: T) -> Self {
        Self {
            data: [player, monster],
        }
    }

    /// Create a SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_pair(value.clone(), value)
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Borrow both entries mutably at once.
    pub fn both_mut(&mut self) -> (&mut T, &mut T) {
        let [player, monster] = &mut self.data;
        (player, monster)
    }

    /// Iterate over (Side, &T) pairs in update order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs in update order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
