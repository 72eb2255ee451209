/// Position of a card within the deck's fixed order.
pub type CardId = u8;

/// Identifier of a symbol in the deck's alphabet.
pub type SymbolId = u8;

/// Count type used for pairs in a deck.
pub type PairCount = u8;

/// Count type used for total cards in a deck.
pub type CardCount = u8;

/// Count type used for the per-session move and match counters.
pub type MoveCount = u16;

pub const fn double(pairs: PairCount) -> CardCount {
    (pairs as CardCount).saturating_mul(2)
}
