use serde::{Deserialize, Serialize};

use crate::{Card, GameError, PairCount, Result, Symbol};

/// Validated arrangement of symbols over the board slots. Invariant: every
/// symbol occurs on exactly two slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    symbols: Vec<Symbol>,
}

impl BoardLayout {
    /// Uniformly shuffled layout of `pair_count` doubled symbols.
    pub fn random(pair_count: PairCount, seed: u64) -> Self {
        use rand::prelude::*;

        let mut symbols: Vec<Symbol> = (0..pair_count).chain(0..pair_count).collect();

        // Fisher-Yates: swap each slot with a uniformly chosen one at or
        // below it, from the last slot down.
        let mut rng = SmallRng::seed_from_u64(seed);
        for i in (1..symbols.len()).rev() {
            let j = rng.random_range(0..=i);
            symbols.swap(i, j);
        }

        log::debug!("dealt {} pairs from seed {}", pair_count, seed);
        Self { symbols }
    }

    /// Layout with a fixed arrangement, validated for the two-of-each
    /// invariant. Mainly useful for deterministic boards in tests.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.len() % 2 != 0 {
            return Err(GameError::UnbalancedLayout);
        }

        let mut sorted = symbols.clone();
        sorted.sort_unstable();
        for pair in sorted.chunks(2) {
            if pair[0] != pair[1] {
                return Err(GameError::UnbalancedLayout);
            }
        }
        for window in sorted.windows(3) {
            if window[0] == window[2] {
                return Err(GameError::UnbalancedLayout);
            }
        }

        Ok(Self { symbols })
    }

    pub fn pair_count(&self) -> PairCount {
        (self.symbols.len() / 2).try_into().unwrap_or(PairCount::MAX)
    }

    pub fn card_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Fresh board of face-down cards in layout order.
    pub fn deal(&self) -> Vec<Card> {
        self.symbols.iter().map(|&s| Card::hidden(s)).collect()
    }
}
