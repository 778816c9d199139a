use thiserror::Error;

/// Fatal engine conditions. None of these are retried: each one signals a
/// caller bug or a broken sequencing invariant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid hand: {0}")]
    InvalidHand(String),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Insufficient deck: requested {requested}, remaining {remaining}")]
    InsufficientDeck { requested: usize, remaining: usize },
    #[error("Betting round overrun on {street}: more than {limit} actions")]
    BettingRoundOverrun { street: String, limit: usize },
    #[error("Invalid seating: {0}")]
    InvalidSeating(String),
    #[error("Invalid table config: {0}")]
    InvalidConfig(String),
    #[error("{0} has no chips left")]
    StackExhausted(String),
}
