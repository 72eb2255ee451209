use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card id")]
    InvalidCard,
    #[error("Every symbol in a deck must appear exactly twice")]
    UnbalancedDeck,
}

pub type Result<T> = std::result::Result<T, GameError>;
