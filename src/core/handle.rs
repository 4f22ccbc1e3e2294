//! Card handles.
//!
//! Every card that exists in a battle lives in the `CardArena` and is
//! addressed by a `CardHandle`. Rosters store handles, not cards, and a
//! transformation substitute stores the handle of the card it replaced.
//!
//! Handles are allocated monotonically and never reused, so a handle whose
//! card has been removed from the arena is simply stale: lookups return
//! `None` instead of aliasing a newer card.
//!
//! ```
//! use rust_autobattle::core::CardHandle;
//!
//! let a = CardHandle::new(3);
//! assert_eq!(a.raw(), 3);
//! assert_eq!(format!("{}", a), "#3");
//! ```

use serde::{Deserialize, Serialize};

/// Arena key for a card instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardHandle(pub u32);

impl CardHandle {
    /// Create a handle from a raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The handle allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
