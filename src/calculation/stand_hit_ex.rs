use super::{probability_dealer_natural, ExpectationTable, PlayerKey, Solver};
use crate::{CardCount, Decision, DecisionContext, Shoe};

const SURRENDER_EXPECTATION: f64 = -0.5;

impl<'a> Solver<'a> {
    pub(super) fn memoization_expectation_table(
        &mut self,
        hand: CardCount,
        context: &DecisionContext,
        shoe: &mut Shoe,
    ) -> ExpectationTable {
        // Obvious case 1: Bust.
        if hand.bust() {
            return ExpectationTable::only(Decision::Stand, -1.0);
        }

        // Obvious case 2: Natural Blackjack. It can only push against a dealer natural.
        if hand.is_natural() && context.split_depth == 0 {
            let p_dealer_also_natural = probability_dealer_natural(self.dealer_up_card, shoe);
            return ExpectationTable::only(
                Decision::Stand,
                (1.0 - p_dealer_also_natural) * self.rule.payout_blackjack,
            );
        }

        let key = PlayerKey {
            shoe: shoe.signature(),
            hand: hand.signature(),
            context: context.key_bits(),
        };
        if let Some(table) = self.player_ex.get(&key) {
            return *table;
        }

        let mut table = ExpectationTable::default();
        let can_draw = !shoe.is_empty();
        let must_stand = context.must_stand_after_one_card(self.rule);

        if hand.get_total() == 1 {
            // A split hand still waiting for its second card. Nothing is offered
            // once the shoe is empty.
            if can_draw {
                table.hit = Some(self.hit_expectation(hand, context, shoe));
            }
        } else {
            table.stand = Some(self.stand_expectation(hand, shoe));

            if can_draw && !must_stand {
                table.hit = Some(self.hit_expectation(hand, context, shoe));
            }
            if can_draw
                && !must_stand
                && hand.get_total() == 2
                && context.can_double
                && self.rule.allow_double
            {
                table.double = Some(self.double_expectation(hand, shoe));
            }
            let initial_two_cards = hand.get_total() == 2 && context.split_depth == 0;
            if initial_two_cards && self.rule.allow_late_surrender {
                table.surrender = Some(SURRENDER_EXPECTATION);
            }
            if can_draw && context.can_split {
                if let Some(pair_value) = hand.pair_value() {
                    table.split = Some(self.split_expectation(pair_value, context, shoe));
                }
            }
        }

        self.player_ex.insert(key, table);
        table
    }

    /// Best expectation of the hand. A hand with nothing offered carries no weight.
    pub(super) fn best_expectation(
        &mut self,
        hand: CardCount,
        context: &DecisionContext,
        shoe: &mut Shoe,
    ) -> f64 {
        self.memoization_expectation_table(hand, context, shoe)
            .best()
            .map_or(0.0, |(_, ex)| ex)
    }

    /// Player's expectation when standing now. Note that a natural Blackjack is
    /// handled before getting here.
    fn stand_expectation(&mut self, hand: CardCount, shoe: &mut Shoe) -> f64 {
        if hand.bust() {
            return -1.0;
        }
        let odds = self.dealer_distribution(shoe);
        odds.stand_expectation(hand.get_actual_sum())
    }

    /// Takes one more card, then plays on the best way under the same context.
    /// When the context forces split aces to stand, the child hand only offers Stand.
    pub(super) fn hit_expectation(
        &mut self,
        hand: CardCount,
        context: &DecisionContext,
        shoe: &mut Shoe,
    ) -> f64 {
        let mut ex_hit = 0.0;
        for card_value in 1..=10 {
            let p = shoe.proportion(card_value);
            if p == 0.0 {
                continue;
            }
            if let Some(mut drawn) = shoe.draw_value(card_value) {
                let next_hand = hand.with_card(card_value);
                let ex_max = self.best_expectation(next_hand, context, &mut drawn);
                ex_hit += p * ex_max;
            }
        }
        ex_hit
    }

    /// Exactly one more card at twice the bet, then stand.
    fn double_expectation(&mut self, hand: CardCount, shoe: &mut Shoe) -> f64 {
        let mut ex_double = 0.0;
        for card_value in 1..=10 {
            let p = shoe.proportion(card_value);
            if p == 0.0 {
                continue;
            }
            if let Some(mut drawn) = shoe.draw_value(card_value) {
                ex_double += p * self.stand_expectation(hand.with_card(card_value), &mut drawn);
            }
        }
        2.0 * ex_double
    }
}
