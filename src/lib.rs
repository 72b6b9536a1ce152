pub mod calculation;
mod card;
mod error;
mod hand;
mod shoe;
mod statearray;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::EnumIter;

pub use calculation::{
    evaluate_dealer_distribution, evaluate_hand, evaluate_many, probability_dealer_natural,
    solve_hand, DealerDistribution, DealerOutcome, ExpectationTable, HandSolution,
    MultiHandSolution,
};
pub use card::Rank;
pub use error::Error;
pub use hand::{Hand, Totals};
pub use shoe::{DrawnCard, Shoe};
pub use statearray::{CardCount, StateArray};

pub const MAX_NUMBER_OF_DECKS: u8 = 8;
pub const MAX_RESPLIT_LIMITS: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub number_of_decks: u8,
    pub dealer_hit_on_soft17: bool,
    pub payout_blackjack: f64, // Only supports 1.5 (3:2) or 1.2 (6:5).
    pub allow_late_surrender: bool,
    pub allow_double: bool,
    pub allow_das: bool,
    pub resplit_limits: u8, // Extra splits allowed after the first one.
    pub allow_decisions_after_split_aces: bool,
    pub allow_resplit_aces: bool,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 6,
            dealer_hit_on_soft17: false,
            payout_blackjack: 1.5,
            allow_late_surrender: false,
            allow_double: true,
            allow_das: true,
            resplit_limits: 3,
            allow_decisions_after_split_aces: false,
            allow_resplit_aces: false,
        }
    }
}

impl Rule {
    /// Checks the parts of the rule that the calculation cannot work around.
    pub fn validate(&self) -> Result<(), Error> {
        if self.number_of_decks == 0 || self.number_of_decks > MAX_NUMBER_OF_DECKS {
            return Err(Error::InvalidNumberOfDecks(self.number_of_decks));
        }
        let payout_ok = [1.5, 1.2]
            .iter()
            .any(|p| (self.payout_blackjack - p).abs() < 1e-9);
        if !payout_ok {
            return Err(Error::InvalidBlackjackPayout(self.payout_blackjack));
        }
        if self.resplit_limits > MAX_RESPLIT_LIMITS {
            return Err(Error::InvalidResplitLimit(self.resplit_limits));
        }
        Ok(())
    }

    /// Split aces get exactly one more card each and must stand.
    pub fn split_aces_one_card(&self) -> bool {
        !self.allow_decisions_after_split_aces
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Serialize_enum_str, Deserialize_enum_str,
)]
pub enum Decision {
    Stand,
    Hit,
    Double,
    Surrender,
    Split,
}

/// State of one node of the player's decision tree, apart from the cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisionContext {
    pub dealer_up_card: Rank,
    pub can_double: bool,
    pub can_split: bool,
    pub split_depth: u8,
    pub from_split_aces: bool,
}

impl DecisionContext {
    /// Context of a freshly dealt hand.
    pub fn initial(rule: &Rule, dealer_up_card: Rank) -> Self {
        DecisionContext {
            dealer_up_card,
            can_double: rule.allow_double,
            can_split: true,
            split_depth: 0,
            from_split_aces: false,
        }
    }

    /// Context of each hand produced by splitting a pair of the given card value.
    pub fn after_split(&self, rule: &Rule, pair_card_value: u8) -> Self {
        let split_depth = self.split_depth + 1;
        let from_split_aces = pair_card_value == 1;
        DecisionContext {
            dealer_up_card: self.dealer_up_card,
            can_double: rule.allow_double && rule.allow_das,
            can_split: split_depth <= rule.resplit_limits
                && (!from_split_aces || rule.allow_resplit_aces),
            split_depth,
            from_split_aces,
        }
    }

    pub fn must_stand_after_one_card(&self, rule: &Rule) -> bool {
        self.from_split_aces && rule.split_aces_one_card()
    }

    /// Packs the flags into the low bits of a memoization key. The up card is
    /// fixed for a whole calculation and is left out.
    pub(crate) fn key_bits(&self) -> u16 {
        (self.can_double as u16)
            | ((self.can_split as u16) << 1)
            | ((self.from_split_aces as u16) << 2)
            | ((self.split_depth as u16) << 3)
    }
}
