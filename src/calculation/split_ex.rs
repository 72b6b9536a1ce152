use super::Solver;
use crate::{CardCount, DecisionContext, Shoe};

impl<'a> Solver<'a> {
    /// Sum of the expectations of the two hands made by splitting a pair.
    ///
    /// Each hand gets its second card from the shoe as it stands when that hand
    /// is played; the two second cards are not enumerated jointly. This slightly
    /// misweights the case where both hands would want the same scarce card.
    pub(super) fn split_expectation(
        &mut self,
        pair_card_value: u8,
        context: &DecisionContext,
        shoe: &mut Shoe,
    ) -> f64 {
        let split_context = context.after_split(self.rule, pair_card_value);
        let split_hand = CardCount::single(pair_card_value);

        let mut ex_split = 0.0;
        for _ in 0..2 {
            ex_split += self.hit_expectation(split_hand, &split_context, shoe);
        }
        ex_split
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::ExpectationTable;
    use crate::{Decision, Rank, Rule};

    fn pair_table(rule: &Rule, pair_card_value: u8, dealer_up_card: Rank) -> ExpectationTable {
        let mut shoe = Shoe::with_number_of_decks(rule.number_of_decks).unwrap();
        let hand = CardCount::single(pair_card_value).with_card(pair_card_value);
        let context = DecisionContext::initial(rule, dealer_up_card);
        let mut solver = Solver::new(rule, dealer_up_card);
        solver.memoization_expectation_table(hand, &context, &mut shoe)
    }

    #[test]
    fn split_is_two_equal_hands() {
        let rule = Rule {
            number_of_decks: 2,
            resplit_limits: 0,
            ..Default::default()
        };
        let mut shoe = Shoe::with_number_of_decks(2).unwrap();
        let context = DecisionContext::initial(&rule, Rank::Ten);
        let split_context = context.after_split(&rule, 8);
        let mut solver = Solver::new(&rule, Rank::Ten);
        let one_hand = solver.hit_expectation(CardCount::single(8), &split_context, &mut shoe);
        let both = solver.split_expectation(8, &context, &mut shoe);
        assert_eq!(both, 2.0 * one_hand);
    }

    #[test]
    fn resplitting_never_hurts() {
        let no_resplit = Rule {
            number_of_decks: 2,
            resplit_limits: 0,
            ..Default::default()
        };
        let resplit = Rule {
            resplit_limits: 2,
            ..no_resplit
        };
        let ex_no_resplit = pair_table(&no_resplit, 8, Rank::Seven).split.unwrap();
        let ex_resplit = pair_table(&resplit, 8, Rank::Seven).split.unwrap();
        assert!(ex_resplit >= ex_no_resplit - 1e-12);
    }

    #[test]
    fn eights_against_six_split() {
        let rule = Rule {
            number_of_decks: 2,
            ..Default::default()
        };
        let table = pair_table(&rule, 8, Rank::Six);
        let ex_split = table.split.unwrap();
        assert!(ex_split > table.stand.unwrap());
        assert!(ex_split > table.hit.unwrap());
        assert_eq!(table.best(), Some((Decision::Split, ex_split)));
    }

    #[test]
    fn eights_against_ten_hit() {
        // A dealer natural is an ordinary 21 here, which takes the value out of
        // splitting against a ten.
        let rule = Rule {
            number_of_decks: 2,
            ..Default::default()
        };
        let table = pair_table(&rule, 8, Rank::Ten);
        let ex_hit = table.hit.unwrap();
        assert!(ex_hit > table.stand.unwrap());
        assert!(ex_hit > table.split.unwrap());
        assert_eq!(table.best(), Some((Decision::Hit, ex_hit)));
    }

    #[test]
    fn split_aces_with_decisions_allowed_can_hit() {
        let rule = Rule {
            number_of_decks: 1,
            allow_decisions_after_split_aces: true,
            ..Default::default()
        };
        let mut shoe = Shoe::with_number_of_decks(1).unwrap();
        let context = DecisionContext::initial(&rule, Rank::Six).after_split(&rule, 1);
        let mut solver = Solver::new(&rule, Rank::Six);
        let hand = CardCount::single(1).with_card(5);
        let table = solver.memoization_expectation_table(hand, &context, &mut shoe);
        assert!(table.get(Decision::Hit).is_some());
        assert!(table.get(Decision::Double).is_some());
        assert_eq!(table.get(Decision::Surrender), None);
    }
}
