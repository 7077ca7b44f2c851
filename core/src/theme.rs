use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Card face set the player picks on the welcome screen. The symbol data is
/// what the board is dealt from; how faces are drawn is up to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Classic,
    Animals,
    Food,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Self::Classic, Self::Animals, Self::Food];

    pub const fn label(self) -> &'static str {
        use Theme::*;
        match self {
            Classic => "Classic",
            Animals => "Animals",
            Food => "Food",
        }
    }

    pub const fn symbols(self) -> &'static [&'static str; 12] {
        use Theme::*;
        match self {
            Classic => &[
                "🌟", "🚀", "🎮", "🎯", "🎨", "🎪", "🎭", "🎰", "🎲", "🎸", "🎺", "🎻",
            ],
            Animals => &[
                "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮",
            ],
            Food => &[
                "🍎", "🍌", "🍉", "🍇", "🍓", "🍒", "🍑", "🍍", "🥥", "🥝", "🍅", "🍆",
            ],
        }
    }

    /// Face glyph for a symbol index; out-of-range symbols get a placeholder.
    pub fn symbol_face(self, symbol: Symbol) -> &'static str {
        self.symbols()
            .get(usize::from(symbol))
            .copied()
            .unwrap_or("?")
    }
}
