use super::{DealerKey, Solver};
use crate::{CardCount, Shoe};
use std::cmp::Ordering;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Final result of the dealer's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum DealerOutcome {
    #[strum(to_string = "bust")]
    Bust = 0,
    #[strum(to_string = "17")]
    Seventeen,
    #[strum(to_string = "18")]
    Eighteen,
    #[strum(to_string = "19")]
    Nineteen,
    #[strum(to_string = "20")]
    Twenty,
    #[strum(to_string = "21")]
    TwentyOne,
}

impl DealerOutcome {
    fn index(&self) -> usize {
        *self as usize
    }

    /// The final total, None for a bust.
    pub fn sum(&self) -> Option<u16> {
        match self {
            DealerOutcome::Bust => None,
            _ => Some(16 + self.index() as u16),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DealerDistribution {
    // 0 for Bust.
    // [1, 5] for [17, 21].
    probabilities: [f64; 6],
}

impl DealerDistribution {
    pub fn probability(&self, outcome: DealerOutcome) -> f64 {
        self.probabilities[outcome.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DealerOutcome, f64)> + '_ {
        DealerOutcome::iter().map(|outcome| (outcome, self.probability(outcome)))
    }

    /// Sum over all outcomes. 1 unless the shoe ran out while the dealer was
    /// still drawing.
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Player's expectation when standing on the given total, which must not be
    /// a bust or a natural Blackjack.
    pub fn stand_expectation(&self, player_actual_sum: u16) -> f64 {
        self.p_worse_than_player(player_actual_sum) - self.p_better_than_player(player_actual_sum)
    }

    pub fn p_worse_than_player(&self, player_actual_sum: u16) -> f64 {
        self.iter()
            .filter(|(outcome, _)| match outcome.sum() {
                None => true,
                Some(sum) => sum < player_actual_sum,
            })
            .map(|(_, p)| p)
            .sum()
    }

    pub fn p_better_than_player(&self, player_actual_sum: u16) -> f64 {
        self.iter()
            .filter(|(outcome, _)| match outcome.sum() {
                None => false,
                Some(sum) => sum.cmp(&player_actual_sum) == Ordering::Greater,
            })
            .map(|(_, p)| p)
            .sum()
    }

    fn end_with_bust() -> Self {
        let mut odds = Self::default();
        odds.probabilities[DealerOutcome::Bust.index()] = 1.0;
        odds
    }

    fn end_with_normal(dealer_actual_sum: u16) -> Self {
        let mut odds = Self::default();
        odds.probabilities[(dealer_actual_sum - 16) as usize] = 1.0;
        odds
    }

    fn add_assign_with_p(&mut self, rhs: &Self, p: f64) {
        for i in 0..self.probabilities.len() {
            self.probabilities[i] += rhs.probabilities[i] * p;
        }
    }
}

impl<'a> Solver<'a> {
    /// Distribution of the dealer's final total given the up card. The hole card
    /// is simply the first card the dealer draws from the shoe.
    pub fn dealer_distribution(&mut self, shoe: &mut Shoe) -> DealerDistribution {
        let dealer_hand = self.dealer_up_card_hand();
        self.memoization_dealer_gets_cards(shoe, dealer_hand)
    }

    fn dealer_must_stand(&self, dealer_hand: &CardCount) -> bool {
        let actual_sum = dealer_hand.get_actual_sum();
        match actual_sum.cmp(&17) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => !dealer_hand.is_soft() || !self.rule.dealer_hit_on_soft17,
        }
    }

    fn memoization_dealer_gets_cards(
        &mut self,
        shoe: &mut Shoe,
        dealer_hand: CardCount,
    ) -> DealerDistribution {
        // Case 1: Dealer must stand. A two-card 21 ends here as well.
        if dealer_hand.bust() {
            return DealerDistribution::end_with_bust();
        }
        if self.dealer_must_stand(&dealer_hand) {
            return DealerDistribution::end_with_normal(dealer_hand.get_actual_sum());
        }

        let key = DealerKey {
            shoe: shoe.signature(),
            sum: dealer_hand.get_sum(),
            has_ace: dealer_hand.has_ace(),
        };
        if let Some(odds) = self.dealer_odds.get(&key) {
            return *odds;
        }

        // Case 2: Dealer must hit. An empty shoe leaves the mass at 0.
        let mut odds = DealerDistribution::default();
        for card_value in 1..=10 {
            let p = shoe.proportion(card_value);
            if p == 0.0 {
                continue;
            }
            if let Some(mut drawn) = shoe.draw_value(card_value) {
                let next_hand = dealer_hand.with_card(card_value);
                let next_state_odds = self.memoization_dealer_gets_cards(&mut drawn, next_hand);
                odds.add_assign_with_p(&next_state_odds, p);
            }
        }

        self.dealer_odds.insert(key, odds);
        odds
    }
}
