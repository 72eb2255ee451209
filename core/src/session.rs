use serde::{Deserialize, Serialize};

use crate::*;

/// Monotonic identity distinguishing one playthrough from the next.
pub type SessionId = u64;

/// Handle for the delayed mismatch revert. It carries the identity of the
/// session that scheduled it, so a restart during the display window
/// invalidates it instead of corrupting the new game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevertTicket {
    session: SessionId,
}

/// Owns the current engine and hands out session-tagged revert tickets. The
/// embedding UI translates taps into `reveal` calls and schedules `settle`
/// after its display delay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchController {
    engine: MatchEngine,
    session: SessionId,
}

impl MatchController {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            engine: Self::build_engine(config, seed),
            session: 0,
        }
    }

    /// Discards the previous session entirely: fresh deck, zeroed counters,
    /// and a new session id that orphans any pending revert ticket.
    pub fn start(&mut self, config: GameConfig, seed: u64) {
        self.engine = Self::build_engine(config, seed);
        self.session += 1;
        log::debug!("Session {} started with {} pairs", self.session, config.pairs);
    }

    fn build_engine(config: GameConfig, seed: u64) -> MatchEngine {
        let deck = RandomDeckGenerator::new(seed).generate(config);
        MatchEngine::new(deck)
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn reveal(&mut self, card: CardId) -> Result<RevealOutcome> {
        self.engine.reveal(card)
    }

    /// Ticket to schedule after a `Mismatched` outcome, while the engine is
    /// still locked.
    pub fn revert_ticket(&self) -> Option<RevertTicket> {
        self.engine.is_locked().then_some(RevertTicket {
            session: self.session,
        })
    }

    /// Delayed revert callback. Tickets from an earlier session fire against
    /// a game that no longer exists and are ignored.
    pub fn settle(&mut self, ticket: RevertTicket) -> SettleOutcome {
        if ticket.session != self.session {
            log::debug!(
                "Ignoring revert ticket from stale session {}",
                ticket.session
            );
            return SettleOutcome::NoChange;
        }
        self.engine.settle_mismatch()
    }
}
