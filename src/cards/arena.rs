//! Card storage keyed by handle.
//!
//! The arena owns every live card in a battle. Rosters and transformation
//! links hold `CardHandle`s into it. Handles are allocated monotonically and
//! never reused, so removing a card leaves any outstanding handle stale
//! rather than pointing it at a different card.

use rustc_hash::FxHashMap;

use super::instance::Card;
use crate::core::{BattleError, CardHandle};

/// Handle-indexed card storage.
///
/// ## Example
///
/// ```
/// use rust_autobattle::cards::{Card, CardArena, CardTemplate};
/// use rust_autobattle::core::Side;
///
/// let mut arena = CardArena::new();
/// let goblin = arena.insert(Card::new(CardTemplate::new("goblin", 6.0), Side::Monster, 0));
///
/// assert_eq!(arena.get(goblin).map(|c| c.identifier()), Some("goblin"));
///
/// arena.remove(goblin);
/// assert!(arena.get(goblin).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardArena {
    cards: FxHashMap<CardHandle, Card>,
    next_handle: CardHandle,
}

impl CardArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a card and return its new handle.
    pub fn insert(&mut self, card: Card) -> CardHandle {
        let handle = self.next_handle;
        self.next_handle = handle.next();
        self.cards.insert(handle, card);
        handle
    }

    /// Remove a card, invalidating its handle.
    pub fn remove(&mut self, handle: CardHandle) -> Option<Card> {
        self.cards.remove(&handle)
    }

    #[must_use]
    pub fn get(&self, handle: CardHandle) -> Option<&Card> {
        self.cards.get(&handle)
    }

    pub fn get_mut(&mut self, handle: CardHandle) -> Option<&mut Card> {
        self.cards.get_mut(&handle)
    }

    /// Get a card or a `StaleHandle` error.
    pub fn try_get(&self, handle: CardHandle) -> Result<&Card, BattleError> {
        self.cards.get(&handle).ok_or(BattleError::StaleHandle(handle))
    }

    /// Get a card mutably or a `StaleHandle` error.
    pub fn try_get_mut(&mut self, handle: CardHandle) -> Result<&mut Card, BattleError> {
        self.cards
            .get_mut(&handle)
            .ok_or(BattleError::StaleHandle(handle))
    }

    #[must_use]
    pub fn contains(&self, handle: CardHandle) -> bool {
        self.cards.contains_key(&handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over live cards (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (CardHandle, &Card)> {
        self.cards.iter().map(|(h, c)| (*h, c))
    }
}
