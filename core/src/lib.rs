#![no_std]

extern crate alloc;

pub use board::*;
pub use card::*;
pub use currency::*;
pub use error::*;
pub use flip::*;
pub use game::*;

mod board;
mod card;
mod currency;
mod error;
mod flip;
mod game;

/// Outcome of clicking a card
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Flipped,
    /// Second card of the turn flipped, the caller should run [`MemoryGame::check_for_match`] for `session` once
    /// `after` has passed.
    CheckScheduled {
        session: SessionId,
        after: FlipDuration,
    },
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flipped => true,
            Self::CheckScheduled { .. } => true,
        }
    }
}

/// Outcome of resolving a pair of flipped cards
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    NoChange,
    Mismatch,
    Matched,
    Won,
}

impl MatchOutcome {
    pub const fn has_update(self) -> bool {
        use MatchOutcome::*;
        match self {
            NoChange => false,
            Mismatch => true,
            Matched => true,
            Won => true,
        }
    }
}
