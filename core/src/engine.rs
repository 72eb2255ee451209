use core::num::Saturating;

use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Where the engine is within the current pair attempt.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No unresolved card is face up.
    Idle,
    /// One card is up, waiting for its partner.
    OneUp(CardId),
    /// A mismatched pair is on display; reveals are ignored until settled.
    Locked(CardId, CardId),
}

impl RoundPhase {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked(..))
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    FirstUp,
    Matched,
    Mismatched,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            FirstUp => true,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettleOutcome {
    NoChange,
    Settled,
}

impl SettleOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Settled => true,
        }
    }
}

/// One playthrough from the first reveal to the last match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    deck: Deck,
    faces: Vec<CardFace>,
    phase: RoundPhase,
    moves: Saturating<MoveCount>,
    matches: Saturating<MoveCount>,
    state: EngineState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl MatchEngine {
    pub fn new(deck: Deck) -> Self {
        let total_cards = deck.total_cards();
        Self {
            deck,
            faces: vec![CardFace::default(); total_cards as usize],
            phase: Default::default(),
            moves: Saturating(0),
            matches: Saturating(0),
            state: Default::default(),
            started_at: None,
            ended_at: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pair_count(&self) -> PairCount {
        self.deck.pair_count()
    }

    pub fn total_cards(&self) -> CardCount {
        self.deck.total_cards()
    }

    /// Completed pair evaluations, match or mismatch alike.
    pub fn move_count(&self) -> MoveCount {
        self.moves.0
    }

    pub fn match_count(&self) -> MoveCount {
        self.matches.0
    }

    /// How many pairs are still face down.
    pub fn pairs_left(&self) -> PairCount {
        self.deck.pair_count() - self.matches.0 as PairCount
    }

    pub fn face_at(&self, card: CardId) -> CardFace {
        self.faces[card as usize]
    }

    pub fn iter_faces(&self) -> impl Iterator<Item = (CardId, CardFace)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(card, &face)| (card as CardId, face))
    }

    /// How many seconds have passed since the first reveal, 0 before it.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Turns a hidden card face up. Reveals while locked, on an already
    /// face-up card, or after the game is won are benign no-ops; only an
    /// out-of-range id is an error.
    pub fn reveal(&mut self, card: CardId) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let card = self.deck.validate_card(card)?;

        if self.state.is_finished() || self.phase.is_locked() {
            return Ok(NoChange);
        }
        if !self.face_at(card).is_hidden() {
            return Ok(NoChange);
        }

        let symbol = self.deck[card];
        self.faces[card as usize] = CardFace::Revealed(symbol);
        self.mark_started();
        log::debug!("Card {} up, symbol {}", card, symbol);

        // the lock guard above leaves only Idle and OneUp to handle
        Ok(if let RoundPhase::OneUp(first) = self.phase {
            self.evaluate_pair(first, card)
        } else {
            self.phase = RoundPhase::OneUp(card);
            FirstUp
        })
    }

    /// Flips a mismatched pair back down after the display delay. No-op
    /// unless the engine is locked.
    pub fn settle_mismatch(&mut self) -> SettleOutcome {
        use SettleOutcome::*;

        match self.phase {
            RoundPhase::Locked(first, second) => {
                self.faces[first as usize] = CardFace::Hidden;
                self.faces[second as usize] = CardFace::Hidden;
                self.phase = RoundPhase::Idle;
                Settled
            }
            _ => NoChange,
        }
    }

    fn evaluate_pair(&mut self, first: CardId, second: CardId) -> RevealOutcome {
        // the move counter tracks pair attempts, not individual reveals
        self.moves += 1;

        let first_symbol = self.deck[first];
        let second_symbol = self.deck[second];
        log::debug!(
            "Evaluating cards {} and {}: symbols {} vs {}",
            first,
            second,
            first_symbol,
            second_symbol
        );

        if first_symbol == second_symbol {
            self.faces[first as usize] = CardFace::Matched(first_symbol);
            self.faces[second as usize] = CardFace::Matched(second_symbol);
            self.matches += 1;
            self.phase = RoundPhase::Idle;

            if self.matches == Saturating(self.deck.pair_count() as MoveCount) {
                self.end_game();
                RevealOutcome::Won
            } else {
                RevealOutcome::Matched
            }
        } else {
            self.phase = RoundPhase::Locked(first, second);
            RevealOutcome::Mismatched
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = EngineState::Active;
            self.started_at = Some(Utc::now());
        }
    }

    fn end_game(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.state = EngineState::Won;
        self.ended_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(symbols: &[SymbolId]) -> MatchEngine {
        MatchEngine::new(Deck::from_symbols(symbols.to_vec()).unwrap())
    }

    #[test]
    fn revealing_the_same_card_twice_does_not_complete_a_pair() {
        let mut engine = engine(&[0, 1, 0, 1]);
        assert_eq!(engine.elapsed_secs(), 0);

        assert_eq!(engine.reveal(0).unwrap(), RevealOutcome::FirstUp);
        assert!(!engine.reveal(0).unwrap().has_update());

        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.face_at(0), CardFace::Revealed(0));
    }

    #[test]
    fn matching_pair_counts_both_a_match_and_a_move() {
        let mut engine = engine(&[0, 0, 1, 1]);

        assert_eq!(engine.reveal(0).unwrap(), RevealOutcome::FirstUp);
        assert_eq!(engine.reveal(1).unwrap(), RevealOutcome::Matched);

        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.match_count(), 1);
        assert!(engine.face_at(0).is_matched());
        assert_eq!(engine.face_at(1), CardFace::Matched(0));
        assert_eq!(engine.face_at(1).symbol(), Some(0));
        assert!(!engine.is_locked());
    }

    #[test]
    fn mismatched_pair_counts_a_move_and_locks_until_settled() {
        let mut engine = engine(&[0, 1, 0, 1]);

        engine.reveal(0).unwrap();
        assert_eq!(engine.reveal(1).unwrap(), RevealOutcome::Mismatched);

        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.match_count(), 0);
        assert!(engine.is_locked());

        // reveals during the display window leave the board untouched
        assert_eq!(engine.reveal(2).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.face_at(2), CardFace::Hidden);

        assert_eq!(engine.settle_mismatch(), SettleOutcome::Settled);
        assert_eq!(engine.face_at(0), CardFace::Hidden);
        assert_eq!(engine.face_at(1), CardFace::Hidden);
        assert!(!engine.is_locked());
    }

    #[test]
    fn settle_without_a_locked_pair_is_a_no_op() {
        let mut engine = engine(&[0, 0, 1, 1]);

        assert_eq!(engine.settle_mismatch(), SettleOutcome::NoChange);

        engine.reveal(0).unwrap();
        assert_eq!(engine.settle_mismatch(), SettleOutcome::NoChange);
        assert_eq!(engine.face_at(0), CardFace::Revealed(0));
    }

    #[test]
    fn revealing_a_matched_card_is_a_no_op() {
        let mut engine = engine(&[0, 0, 1, 1]);

        engine.reveal(0).unwrap();
        engine.reveal(1).unwrap();

        assert_eq!(engine.reveal(0).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.face_at(0), CardFace::Matched(0));
        assert_eq!(engine.move_count(), 1);
    }

    #[test]
    fn out_of_range_card_is_an_error() {
        let mut engine = engine(&[0, 0]);

        assert_eq!(engine.reveal(7), Err(GameError::InvalidCard));
    }

    #[test]
    fn won_is_signalled_exactly_once_on_the_last_match() {
        let mut engine = engine(&[0, 0, 1, 1]);

        engine.reveal(0).unwrap();
        assert_eq!(engine.reveal(1).unwrap(), RevealOutcome::Matched);
        engine.reveal(2).unwrap();
        assert_eq!(engine.reveal(3).unwrap(), RevealOutcome::Won);

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.pairs_left(), 0);

        // the session stays interactive but nothing changes anymore
        assert_eq!(engine.reveal(0).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.move_count(), 2);
        assert_eq!(engine.match_count(), 2);
    }

    #[test]
    fn mismatch_then_match_scenario_on_an_easy_deck() {
        // worked example: positions 0 and 6 hold the same symbol
        let mut engine = engine(&[0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5]);

        engine.reveal(0).unwrap();
        assert_eq!(engine.reveal(1).unwrap(), RevealOutcome::Mismatched);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.match_count(), 0);
        engine.settle_mismatch();
        assert_eq!(engine.face_at(0), CardFace::Hidden);
        assert_eq!(engine.face_at(1), CardFace::Hidden);

        engine.reveal(0).unwrap();
        assert_eq!(engine.reveal(6).unwrap(), RevealOutcome::Matched);
        assert_eq!(engine.move_count(), 2);
        assert_eq!(engine.match_count(), 1);
        assert_eq!(engine.face_at(0), CardFace::Matched(0));
        assert_eq!(engine.face_at(6), CardFace::Matched(0));
    }

    #[test]
    fn engine_survives_a_serde_round_trip_mid_game() {
        let mut engine = engine(&[0, 1, 0, 1]);
        engine.reveal(0).unwrap();
        engine.reveal(1).unwrap();

        let saved = serde_json::to_string(&engine).unwrap();
        let mut restored: MatchEngine = serde_json::from_str(&saved).unwrap();

        assert_eq!(restored, engine);
        assert!(restored.is_locked());
        restored.settle_mismatch();
        assert_eq!(restored.face_at(0), CardFace::Hidden);
    }
}
