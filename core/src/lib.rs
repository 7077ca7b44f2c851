pub use board::*;
pub use card::*;
pub use error::*;
pub use score::*;
pub use session::*;
pub use theme::*;
pub use types::*;

mod board;
mod card;
mod error;
mod score;
mod session;
mod theme;
mod types;

/// Outcome of attempting to flip a single card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    /// Second card of a selection was flipped; the pair awaits resolution.
    PairPending,
}

impl FlipOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            PairPending => true,
        }
    }

    /// Whether a match check must be scheduled for the flipped pair
    pub const fn needs_resolution(self) -> bool {
        matches!(self, Self::PairPending)
    }
}

/// Outcome of resolving a flipped pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    NoChange,
    Matched,
    Mismatched,
    /// The matched pair was the last one left on the board.
    AllMatched,
}

impl MatchOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use MatchOutcome::*;
        match self {
            NoChange => false,
            Matched => true,
            Mismatched => true,
            AllMatched => true,
        }
    }
}
