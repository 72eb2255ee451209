use crate::*;

pub trait DeckGenerator {
    fn generate(self, config: GameConfig) -> Deck;
}

/// Duplicates the symbol alphabet and applies a uniform Fisher-Yates shuffle.
/// The seed comes from the caller so the embedding UI controls the entropy
/// source.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: GameConfig) -> Deck {
        use rand::prelude::*;

        let pairs = config.pairs;
        let mut symbols: Vec<SymbolId> = (0..pairs).flat_map(|symbol| [symbol, symbol]).collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        symbols.shuffle(&mut rng);

        log::debug!("Generated {}-pair deck from seed {}", pairs, self.seed);
        Deck { symbols, pairs }
    }
}
