use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Face-up/face-down state of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Flipped,
    Matched,
}

impl CardState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// A face-up card shows its symbol; matched cards stay face up.
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: Symbol,
    pub state: CardState,
}

impl Card {
    pub const fn hidden(symbol: Symbol) -> Self {
        Self {
            symbol,
            state: CardState::Hidden,
        }
    }
}
