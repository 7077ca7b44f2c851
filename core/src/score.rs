use serde::{Deserialize, Serialize};

use crate::{Difficulty, Theme};

/// A finished session's result, compared lexicographically: moves first,
/// then time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub moves: u32,
    pub time_secs: u32,
}

impl ScoreEntry {
    /// Record rule: strictly fewer moves, or equal moves and strictly less
    /// time.
    pub const fn beats(self, best: Self) -> bool {
        self.moves < best.moves || (self.moves == best.moves && self.time_secs < best.time_secs)
    }
}

/// Best score per difficulty. `None` means no record yet, which any result
/// beats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreTable {
    easy: Option<ScoreEntry>,
    medium: Option<ScoreEntry>,
    hard: Option<ScoreEntry>,
}

impl HighScoreTable {
    pub fn best(&self, difficulty: Difficulty) -> Option<ScoreEntry> {
        use Difficulty::*;
        match difficulty {
            Easy => self.easy,
            Medium => self.medium,
            Hard => self.hard,
        }
    }

    fn slot_mut(&mut self, difficulty: Difficulty) -> &mut Option<ScoreEntry> {
        use Difficulty::*;
        match difficulty {
            Easy => &mut self.easy,
            Medium => &mut self.medium,
            Hard => &mut self.hard,
        }
    }

    /// Stores `entry` when it sets a new record, reporting whether it did.
    pub fn submit(&mut self, difficulty: Difficulty, entry: ScoreEntry) -> bool {
        let slot = self.slot_mut(difficulty);
        match *slot {
            Some(best) if !entry.beats(best) => false,
            _ => {
                log::debug!("new {} record: {:?}", difficulty.key(), entry);
                *slot = Some(entry);
                true
            }
        }
    }
}

/// Result summary handed to the presentation layer when a session finishes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub moves: u32,
    pub time_secs: u32,
    pub max_combo: u32,
    pub is_new_record: bool,
}
