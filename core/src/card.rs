use serde::{Deserialize, Serialize};

use crate::SymbolId;

/// Canonical player-visible state stored by the gameplay engine. The symbol
/// is only carried once the card is face up.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Revealed(SymbolId),
    Matched(SymbolId),
}

impl CardFace {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Symbol shown to the player, `None` while the card is face down.
    pub const fn symbol(self) -> Option<SymbolId> {
        match self {
            Self::Hidden => None,
            Self::Revealed(symbol) => Some(symbol),
            Self::Matched(symbol) => Some(symbol),
        }
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}
