use thiserror::Error;

/// Errors raised while running a game of blackjack.
///
/// `DeckExhausted` ends the game. The stake variants are only seen when an input source hands the
/// table a stake it should have rejected itself.
#[derive(Debug, Error, PartialEq)]
pub enum BlackjackGameError {
    #[error("no more cards left in the deck")]
    DeckExhausted,
    #[error("stake of {stake:.2} exceeds the balance of {balance:.2}")]
    StakeExceedsBalance { stake: f64, balance: f64 },
    #[error("stake must be a non-negative amount, got {0}")]
    InvalidStake(f64),
    #[error("unrecognised card `{0}`")]
    InvalidCard(String),
    #[error("input closed before a decision was made")]
    InputClosed,
}
