use thiserror::Error;

use crate::Rank;

/// Malformed input handed to the calculation. Decisions that the rules forbid are
/// not errors: they are simply missing from the expectation table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid rank: {0:?}, expected one of A 2 3 4 5 6 7 8 9 10 J Q K")]
    InvalidRank(String),
    #[error("Invalid number of decks: {0}, it must be in [1, 8]")]
    InvalidNumberOfDecks(u8),
    #[error("Invalid blackjack payout: {0}, only 1.5 (3:2) and 1.2 (6:5) are supported")]
    InvalidBlackjackPayout(f64),
    #[error("Invalid resplit limit: {0}, it must be in [0, 6]")]
    InvalidResplitLimit(u8),
    #[error("Too many cards of rank {rank}: {count}")]
    TooManyCards { rank: Rank, count: u16 },
    #[error("A hand needs at least one card")]
    EmptyHand,
    #[error("No card left in the shoe to complete the hand")]
    ShoeExhausted,
}
