//! Battle error type.
//!
//! Every fallible engine operation returns `Result<T, BattleError>`. None of
//! these are fatal: a failed operation leaves the battle state untouched,
//! and callers decide whether to log and continue.

use thiserror::Error;

use super::handle::CardHandle;
use super::side::Side;

/// Errors returned by roster, content and coordinator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("slot index {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("slot {0} is empty")]
    EmptySlot(usize),

    #[error("no empty slot available")]
    NoEmptySlot,

    #[error("unknown card identifier `{0}`")]
    UnknownCard(String),

    #[error("card `{identifier}` cannot be owned by {owner}")]
    OwnerMismatch { identifier: String, owner: Side },

    #[error("card handle {0} no longer refers to a live card")]
    StaleHandle(CardHandle),

    #[error("card in slot {0} is not transformed")]
    NotTransformed(usize),

    #[error("battle is not running")]
    NotRunning,

    #[error("roster editing is only allowed while preparing")]
    EditingLocked,

    #[error("battle has already started")]
    AlreadyStarted,

    #[error("battle has not ended")]
    NotEnded,

    #[error("config field `{0}` must be a positive, finite number")]
    InvalidConfig(&'static str),
}
