use std::ops::Index;

use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod session;
mod types;

/// Largest pair count a `CardId` can still address.
pub const MAX_PAIRS: PairCount = PairCount::MAX / 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pairs: PairCount,
}

impl GameConfig {
    pub const fn new_unchecked(pairs: PairCount) -> Self {
        Self { pairs }
    }

    pub fn new(pairs: PairCount) -> Self {
        let clamped = pairs.clamp(1, MAX_PAIRS);
        if clamped != pairs {
            log::warn!("Pair count {} out of range, clamped to {}", pairs, clamped);
        }
        Self::new_unchecked(clamped)
    }

    pub const fn easy() -> Self {
        Self { pairs: 6 }
    }

    pub const fn hard() -> Self {
        Self { pairs: 12 }
    }

    pub const fn total_cards(&self) -> CardCount {
        double(self.pairs)
    }
}

/// Ordered symbol layout for one playthrough. Every symbol occurs exactly
/// twice, so `len == 2 * pair_count`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub(crate) symbols: Vec<SymbolId>,
    pub(crate) pairs: PairCount,
}

impl Deck {
    /// Builds a deck from an explicit layout, for tests and replays. The
    /// layout must stay within what a `CardId` can address.
    pub fn from_symbols(symbols: Vec<SymbolId>) -> Result<Self> {
        if symbols.len() > double(MAX_PAIRS) as usize {
            return Err(GameError::UnbalancedDeck);
        }

        let mut occurrences = [0u16; 1 << SymbolId::BITS];
        for &symbol in &symbols {
            occurrences[symbol as usize] += 1;
        }
        if occurrences.iter().any(|&count| count != 0 && count != 2) {
            return Err(GameError::UnbalancedDeck);
        }

        let pairs = (symbols.len() / 2)
            .try_into()
            .map_err(|_| GameError::UnbalancedDeck)?;
        Ok(Self { symbols, pairs })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig { pairs: self.pairs }
    }

    pub fn validate_card(&self, card: CardId) -> Result<CardId> {
        if (card as usize) < self.symbols.len() {
            Ok(card)
        } else {
            Err(GameError::InvalidCard)
        }
    }

    pub fn pair_count(&self) -> PairCount {
        self.pairs
    }

    pub fn total_cards(&self) -> CardCount {
        self.symbols.len().try_into().unwrap()
    }

    pub fn iter_symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.iter().copied()
    }
}

impl Index<CardId> for Deck {
    type Output = SymbolId;

    fn index(&self, card: CardId) -> &Self::Output {
        &self.symbols[card as usize]
    }
}
