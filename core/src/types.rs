use serde::{Deserialize, Serialize};

/// Position of a card slot on the board.
pub type CardIndex = u8;

/// Count type used for pair counts and card counts.
pub type PairCount = u8;

/// Opaque index into the selected theme's symbol set. Two cards share a
/// symbol exactly when they form a pair.
pub type Symbol = u8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn pair_count(self) -> PairCount {
        use Difficulty::*;
        match self {
            Easy => 6,
            Medium => 8,
            Hard => 12,
        }
    }

    pub const fn card_count(self) -> usize {
        2 * self.pair_count() as usize
    }

    /// Stable lowercase key, also used as a CSS class on the board grid.
    pub const fn key(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
        }
    }
}
