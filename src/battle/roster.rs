//! Seven-slot card rosters.
//!
//! A `Roster` is the ordered formation of one combatant: seven slots, each
//! empty or holding a `CardHandle`. Every structural operation re-stamps the
//! current slot index of each card it moved through the `CardArena`, and in
//! debug builds verifies that every card's stamp matches its slot.
//!
//! ## Reflow
//!
//! `remove` and `insert` shift cards like a list:
//!
//! ```text
//! [A B C D E F G]  remove(2)     -> [A B D E F G _]
//! [A B D E F G _]  insert(2, C)  -> [A B C D E F G]
//! ```
//!
//! `shuffle` and `disrupt` only touch current slot indices. The formation
//! slot recorded at creation (`original_slot_index`) is what
//! `revert_shuffle` restores.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardArena;
use crate::core::{BattleError, CardHandle, GameRng, ROSTER_SIZE};

/// One combatant's slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    slots: [Option<CardHandle>; ROSTER_SIZE],
}

fn check_index(index: usize) -> Result<(), BattleError> {
    if index < ROSTER_SIZE {
        Ok(())
    } else {
        Err(BattleError::SlotOutOfRange(index))
    }
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle in a slot. `None` for empty or out-of-range slots.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CardHandle> {
        self.slots.get(index).copied().flatten()
    }

    /// Handle in a slot, or an error for out-of-range and empty slots.
    pub fn try_get(&self, index: usize) -> Result<CardHandle, BattleError> {
        check_index(index)?;
        self.slots[index].ok_or(BattleError::EmptySlot(index))
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<CardHandle>; ROSTER_SIZE] {
        &self.slots
    }

    /// Occupied slots in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, CardHandle)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|h| (i, h)))
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Lowest empty slot.
    #[must_use]
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Slot holding `handle`.
    #[must_use]
    pub fn position_of(&self, handle: CardHandle) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(handle))
    }

    /// Occupied immediate neighbors of a slot, left first.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> SmallVec<[CardHandle; 2]> {
        let mut out = SmallVec::new();
        if let Some(left) = index.checked_sub(1).and_then(|i| self.get(i)) {
            out.push(left);
        }
        if let Some(right) = self.get(index + 1) {
            out.push(right);
        }
        out
    }

    /// Put a card in a slot, replacing whatever was there.
    ///
    /// Returns the replaced handle. The replaced card keeps its stale stamp.
    pub fn place(
        &mut self,
        index: usize,
        handle: CardHandle,
        arena: &mut CardArena,
    ) -> Result<Option<CardHandle>, BattleError> {
        check_index(index)?;
        let previous = self.slots[index].replace(handle);
        self.stamp(arena);
        Ok(previous)
    }

    /// Empty a slot without shifting.
    pub fn take(&mut self, index: usize) -> Result<Option<CardHandle>, BattleError> {
        check_index(index)?;
        Ok(self.slots[index].take())
    }

    /// Remove a slot and shift everything after it one position left.
    ///
    /// Returns the removed handle (`None` if the slot was empty).
    pub fn remove(
        &mut self,
        index: usize,
        arena: &mut CardArena,
    ) -> Result<Option<CardHandle>, BattleError> {
        check_index(index)?;
        let removed = self.slots[index];
        self.slots[index..].rotate_left(1);
        self.slots[ROSTER_SIZE - 1] = None;
        self.stamp(arena);
        Ok(removed)
    }

    /// Insert at a slot, shifting it and everything after it one position
    /// right.
    ///
    /// Returns the card pushed out of the last slot, if any. The caller
    /// owns it from then on.
    pub fn insert(
        &mut self,
        index: usize,
        handle: CardHandle,
        arena: &mut CardArena,
    ) -> Result<Option<CardHandle>, BattleError> {
        check_index(index)?;
        let pushed_out = self.slots[ROSTER_SIZE - 1];
        self.slots[index..].rotate_right(1);
        self.slots[index] = Some(handle);
        self.stamp(arena);
        Ok(pushed_out)
    }

    /// Move a card: remove it, then insert it at `to`.
    pub fn move_card(
        &mut self,
        from: usize,
        to: usize,
        arena: &mut CardArena,
    ) -> Result<(), BattleError> {
        check_index(to)?;
        let handle = self.try_get(from)?;
        self.remove(from, arena)?;
        let pushed_out = self.insert(to, handle, arena)?;
        debug_assert!(pushed_out.is_none(), "remove always frees the last slot");
        Ok(())
    }

    /// Fisher-Yates permutation of all seven slots.
    pub fn shuffle(&mut self, rng: &mut GameRng, arena: &mut CardArena) {
        rng.shuffle(&mut self.slots);
        self.stamp(arena);
    }

    /// Put every card back on its formation slot.
    ///
    /// Cards whose formation slot is taken go to the first empty slot.
    pub fn revert_shuffle(&mut self, arena: &mut CardArena) {
        let cards: SmallVec<[CardHandle; ROSTER_SIZE]> = self.slots.iter().flatten().copied().collect();
        self.slots = [None; ROSTER_SIZE];

        for handle in cards {
            let original = arena
                .get(handle)
                .map_or(ROSTER_SIZE, |c| c.original_slot_index());

            let target = if original < ROSTER_SIZE && self.slots[original].is_none() {
                Some(original)
            } else {
                self.first_empty()
            };

            if let Some(index) = target {
                self.slots[index] = Some(handle);
            }
        }

        self.stamp(arena);
    }

    /// Swap `swaps` random pairs of distinct slots (capped at seven).
    ///
    /// Returns the number of swaps performed.
    pub fn disrupt(&mut self, swaps: usize, rng: &mut GameRng, arena: &mut CardArena) -> usize {
        let count = swaps.min(ROSTER_SIZE);
        for _ in 0..count {
            let (a, b) = loop {
                let a = rng.gen_range_usize(0..ROSTER_SIZE);
                let b = rng.gen_range_usize(0..ROSTER_SIZE);
                if a != b {
                    break (a, b);
                }
            };
            self.slots.swap(a, b);
        }
        self.stamp(arena);
        count
    }

    /// Write each card's current slot into the arena.
    fn stamp(&self, arena: &mut CardArena) {
        for (index, handle) in self.occupied() {
            if let Some(card) = arena.get_mut(handle) {
                card.set_slot_index(index);
            }
        }
        debug_assert!(self.stamps_consistent(arena), "slot stamps out of sync");
    }

    /// Check that every card's stamp matches its slot.
    #[must_use]
    pub fn stamps_consistent(&self, arena: &CardArena) -> bool {
        self.occupied()
            .all(|(i, h)| arena.get(h).map_or(true, |c| c.slot_index() == i))
    }
}
