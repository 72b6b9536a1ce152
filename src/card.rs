use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::Error;

static RANK_TO_CARD_VALUE: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// One of the 13 ranks of a standard deck. Suits never matter here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display,
)]
pub enum Rank {
    #[strum(to_string = "A", serialize = "a")]
    Ace = 0,
    #[strum(to_string = "2")]
    Two,
    #[strum(to_string = "3")]
    Three,
    #[strum(to_string = "4")]
    Four,
    #[strum(to_string = "5")]
    Five,
    #[strum(to_string = "6")]
    Six,
    #[strum(to_string = "7")]
    Seven,
    #[strum(to_string = "8")]
    Eight,
    #[strum(to_string = "9")]
    Nine,
    #[strum(to_string = "10", serialize = "T", serialize = "t")]
    Ten,
    #[strum(to_string = "J", serialize = "j")]
    Jack,
    #[strum(to_string = "Q", serialize = "q")]
    Queen,
    #[strum(to_string = "K", serialize = "k")]
    King,
}

impl Rank {
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Card value with Ace counted as 1. Ten and the face cards share the value
    /// 10, which is also what pairs are compared by.
    pub fn card_value(&self) -> u8 {
        RANK_TO_CARD_VALUE[self.index()]
    }

    /// Blackjack point value with Ace counted as 11.
    pub fn points(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            _ => self.card_value(),
        }
    }

    /// All ranks having the given card value (in [1, 10]).
    pub fn with_card_value(card_value: u8) -> impl Iterator<Item = Rank> {
        Rank::iter().filter(move |rank| rank.card_value() == card_value)
    }

    /// Parses a rank symbol, reporting the offending text on failure.
    pub fn parse(symbol: &str) -> Result<Rank, Error> {
        let symbol = symbol.trim();
        Rank::from_str(symbol).map_err(|_| Error::InvalidRank(symbol.to_string()))
    }
}
