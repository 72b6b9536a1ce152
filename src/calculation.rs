use super::{Decision, DecisionContext, Rule};
use crate::{CardCount, Error, Hand, Rank, Shoe, StateArray};
use log::{debug, trace};
use std::fmt;
use strum::IntoEnumIterator;

mod dealer_play;
mod split_ex;
mod stand_hit_ex;

pub use dealer_play::{DealerDistribution, DealerOutcome};

/// Expectation of every decision offered for a hand, in units of the original
/// bet. A missing entry means the decision is not offered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExpectationTable {
    pub stand: Option<f64>,
    pub hit: Option<f64>,
    pub double: Option<f64>,
    pub surrender: Option<f64>,
    pub split: Option<f64>,
}

impl ExpectationTable {
    pub fn get(&self, decision: Decision) -> Option<f64> {
        match decision {
            Decision::Stand => self.stand,
            Decision::Hit => self.hit,
            Decision::Double => self.double,
            Decision::Surrender => self.surrender,
            Decision::Split => self.split,
        }
    }

    pub fn set(&mut self, decision: Decision, ex: f64) {
        let slot = match decision {
            Decision::Stand => &mut self.stand,
            Decision::Hit => &mut self.hit,
            Decision::Double => &mut self.double,
            Decision::Surrender => &mut self.surrender,
            Decision::Split => &mut self.split,
        };
        *slot = Some(ex);
    }

    /// Offered decisions with their expectations.
    pub fn iter(&self) -> impl Iterator<Item = (Decision, f64)> + '_ {
        Decision::iter().filter_map(|decision| self.get(decision).map(|ex| (decision, ex)))
    }

    /// The decision with the highest expectation. Ties go to the decision listed
    /// first in `Decision`.
    pub fn best(&self) -> Option<(Decision, f64)> {
        let mut best: Option<(Decision, f64)> = None;
        for (decision, ex) in self.iter() {
            match best {
                Some((_, max_ex)) if max_ex >= ex => {}
                _ => best = Some((decision, ex)),
            }
        }
        best
    }

    fn only(decision: Decision, ex: f64) -> Self {
        let mut table = ExpectationTable::default();
        table.set(decision, ex);
        table
    }
}

impl fmt::Display for ExpectationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (decision, ex) in self.iter() {
            writeln!(f, "{:<10}{:+.6}", decision.to_string(), ex)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandSolution {
    pub table: ExpectationTable,
    pub best_decision: Decision,
    pub best_expectation: f64,
}

impl HandSolution {
    fn from_table(table: ExpectationTable) -> Option<Self> {
        table.best().map(|(best_decision, best_expectation)| HandSolution {
            table,
            best_decision,
            best_expectation,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiHandSolution {
    pub per_hand: Vec<HandSolution>,
    pub total_expectation: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct DealerKey {
    shoe: u128,
    sum: u16,
    has_ace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PlayerKey {
    shoe: u128,
    hand: u128,
    context: u16,
}

/// Everything one top-level calculation memoizes. The tables are only valid for
/// a single rule and dealer up card, so a solver is never reused across calls.
pub struct Solver<'a> {
    rule: &'a Rule,
    dealer_up_card: Rank,
    dealer_odds: StateArray<DealerKey, DealerDistribution>,
    player_ex: StateArray<PlayerKey, ExpectationTable>,
}

impl<'a> Solver<'a> {
    pub fn new(rule: &'a Rule, dealer_up_card: Rank) -> Self {
        Solver {
            rule,
            dealer_up_card,
            dealer_odds: StateArray::new(),
            player_ex: StateArray::new(),
        }
    }

    /// Expectation table of the given hand. The shoe is back to its original
    /// counts when this returns.
    pub fn expectation_table(
        &mut self,
        hand: &Hand,
        context: &DecisionContext,
        shoe: &mut Shoe,
    ) -> Result<ExpectationTable, Error> {
        if hand.is_empty() {
            return Err(Error::EmptyHand);
        }
        let table = self.memoization_expectation_table(hand.card_count(), context, shoe);
        trace!(
            "memoized {} player states, {} dealer states",
            self.player_ex.len(),
            self.dealer_odds.len()
        );
        Ok(table)
    }

    fn dealer_up_card_hand(&self) -> CardCount {
        CardCount::single(self.dealer_up_card.card_value())
    }
}

/// Probability that the dealer's hole card completes a natural.
pub fn probability_dealer_natural(dealer_up_card: Rank, shoe: &Shoe) -> f64 {
    match dealer_up_card.card_value() {
        1 => shoe.proportion(10),
        10 => shoe.proportion(1),
        _ => 0.0,
    }
}

/// Distribution of the dealer's final total, the hole card included in the
/// unknown cards.
pub fn evaluate_dealer_distribution(
    dealer_up_card: Rank,
    shoe: &mut Shoe,
    rule: &Rule,
) -> Result<DealerDistribution, Error> {
    rule.validate()?;
    let mut solver = Solver::new(rule, dealer_up_card);
    Ok(solver.dealer_distribution(shoe))
}

pub fn evaluate_hand(
    hand: &Hand,
    context: &DecisionContext,
    shoe: &mut Shoe,
    rule: &Rule,
) -> Result<ExpectationTable, Error> {
    rule.validate()?;
    let mut solver = Solver::new(rule, context.dealer_up_card);
    let table = solver.expectation_table(hand, context, shoe)?;
    debug!(
        "hand {} against {}: {:?}",
        hand,
        context.dealer_up_card,
        table.best()
    );
    Ok(table)
}

/// Like `evaluate_hand`, also picking the best decision.
pub fn solve_hand(
    hand: &Hand,
    context: &DecisionContext,
    shoe: &mut Shoe,
    rule: &Rule,
) -> Result<HandSolution, Error> {
    let table = evaluate_hand(hand, context, shoe, rule)?;
    // Only a one-card hand facing an empty shoe is offered nothing.
    HandSolution::from_table(table).ok_or(Error::ShoeExhausted)
}

/// Solves several hands sharing one shoe. Each hand sees the others' cards as
/// removed, but their future play is not taken into account.
pub fn evaluate_many(
    hands: &[Hand],
    dealer_up_card: Rank,
    rule: &Rule,
) -> Result<MultiHandSolution, Error> {
    rule.validate()?;
    if hands.iter().any(Hand::is_empty) {
        return Err(Error::EmptyHand);
    }
    let mut shoe = Shoe::init(rule.number_of_decks, hands, dealer_up_card)?;
    let context = DecisionContext::initial(rule, dealer_up_card);
    let mut solver = Solver::new(rule, dealer_up_card);

    let mut per_hand = Vec::with_capacity(hands.len());
    for hand in hands {
        let table = solver.expectation_table(hand, &context, &mut shoe)?;
        let solution = HandSolution::from_table(table).ok_or(Error::ShoeExhausted)?;
        debug!(
            "hand {} against {}: {} ({:+.6})",
            hand, dealer_up_card, solution.best_decision, solution.best_expectation
        );
        per_hand.push(solution);
    }
    let total_expectation = per_hand.iter().map(|s| s.best_expectation).sum();

    Ok(MultiHandSolution {
        per_hand,
        total_expectation,
    })
}
