use std::fmt;
use std::str::FromStr;

use crate::{CardCount, Error, Rank};

/// Hard, soft and best totals of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Every Ace counted as 1.
    pub hard: u16,
    /// Present iff an Ace is counting as 11.
    pub soft: Option<u16>,
    pub is_soft: bool,
    pub best: u16,
}

/// Cards dealt to one party, in dealing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Rank>,
}

impl Hand {
    pub fn new(cards: Vec<Rank>) -> Hand {
        Hand { cards }
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Each Ace counts 11 when the Aces not yet assigned can still count 1
    /// without busting, otherwise 1.
    pub fn totals(&self) -> Totals {
        let mut best: u16 = 0;
        let mut aces: u16 = 0;
        for rank in &self.cards {
            match rank {
                Rank::Ace => aces += 1,
                _ => best += rank.points() as u16,
            }
        }
        let hard = best + aces;

        let mut remaining_aces = aces;
        let mut soft_aces = 0;
        while remaining_aces > 0 {
            remaining_aces -= 1;
            if best + 11 + remaining_aces <= 21 {
                best += 11;
                soft_aces += 1;
            } else {
                best += 1;
            }
        }

        let is_soft = soft_aces > 0;
        Totals {
            hard,
            soft: is_soft.then_some(best),
            is_soft,
            best,
        }
    }

    pub fn is_bust(&self) -> bool {
        self.totals().best > 21
    }

    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.cards.contains(&Rank::Ace) && self.totals().best == 21
    }

    /// Two cards of equal card value. A Jack and a King make a pair.
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].card_value() == self.cards[1].card_value()
    }

    /// The order-free composition the calculation works on.
    pub fn card_count(&self) -> CardCount {
        let mut card_count = CardCount::default();
        for rank in &self.cards {
            card_count.add_card(rank.card_value());
        }
        card_count
    }
}

impl FromStr for Hand {
    type Err = Error;

    /// Parses rank symbols separated by commas or whitespace, e.g. "A,K" or "8 8".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|symbol| !symbol.is_empty())
            .map(Rank::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if cards.is_empty() {
            return Err(Error::EmptyHand);
        }
        Ok(Hand { cards })
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<String> = self.cards.iter().map(|rank| rank.to_string()).collect();
        write!(f, "{}", symbols.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::Rng;
    use strum::IntoEnumIterator;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn hard_totals() {
        let totals = hand("10,6").totals();
        assert_eq!(totals.hard, 16);
        assert_eq!(totals.best, 16);
        assert_eq!(totals.soft, None);
        assert!(!totals.is_soft);
    }

    #[test]
    fn soft_totals() {
        let totals = hand("A,6").totals();
        assert_eq!(totals.hard, 7);
        assert_eq!(totals.soft, Some(17));
        assert!(totals.is_soft);
        assert_eq!(totals.best, 17);
    }

    #[test]
    fn several_aces_count_at_most_one_eleven() {
        let totals = hand("A,A").totals();
        assert_eq!(totals.hard, 2);
        assert_eq!(totals.best, 12);
        assert!(totals.is_soft);

        let totals = hand("A,A,A,8").totals();
        assert_eq!(totals.best, 21);
        assert!(totals.is_soft);

        let totals = hand("A,A,K,9").totals();
        assert_eq!(totals.best, 21);
        assert!(!totals.is_soft);
    }

    #[test]
    fn ace_turns_hard_when_eleven_would_bust() {
        let totals = hand("A,6,9").totals();
        assert_eq!(totals.best, 16);
        assert!(!totals.is_soft);
        assert_eq!(totals.soft, None);
    }

    #[test]
    fn bust_natural_pair() {
        assert!(hand("K,Q,2").is_bust());
        assert!(!hand("A,A,K,9").is_bust());
        assert!(hand("A,K").is_natural());
        assert!(hand("Q,A").is_natural());
        assert!(!hand("A,5,5").is_natural());
        assert!(!hand("10,10,A").is_natural());
        assert!(hand("8,8").is_pair());
        assert!(hand("J,K").is_pair());
        assert!(!hand("8,9").is_pair());
        assert!(!hand("8,8,8").is_pair());
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Hand>(), Err(Error::EmptyHand));
        assert_eq!(" , ".parse::<Hand>(), Err(Error::EmptyHand));
        assert_eq!(
            "A,X".parse::<Hand>(),
            Err(Error::InvalidRank(String::from("X")))
        );
        assert_eq!(hand("A K").cards(), &[Rank::Ace, Rank::King]);
        assert_eq!(hand("10, J").to_string(), "10,J");
    }

    #[test]
    fn order_does_not_change_totals() {
        let ranks: Vec<Rank> = Rank::iter().collect();
        let mut rng = rand::thread_rng();
        for _turn in 0..100 {
            let number_of_cards = rng.gen_range(1..=6);
            let mut cards: Vec<Rank> = (0..number_of_cards)
                .map(|_| *ranks.choose(&mut rng).unwrap())
                .collect();
            let totals = Hand::new(cards.clone()).totals();
            cards.shuffle(&mut rng);
            assert_eq!(Hand::new(cards).totals(), totals);
        }
    }

    #[test]
    fn agrees_with_card_count() {
        let ranks: Vec<Rank> = Rank::iter().collect();
        let mut rng = rand::thread_rng();
        for _turn in 0..100 {
            let number_of_cards = rng.gen_range(1..=6);
            let cards: Vec<Rank> = (0..number_of_cards)
                .map(|_| *ranks.choose(&mut rng).unwrap())
                .collect();
            let hand = Hand::new(cards);
            let card_count = hand.card_count();
            let totals = hand.totals();
            assert_eq!(totals.hard, card_count.get_sum());
            assert_eq!(totals.best, card_count.get_actual_sum());
            assert_eq!(totals.is_soft, card_count.is_soft());
            assert_eq!(hand.is_natural(), card_count.is_natural());
            assert_eq!(hand.is_pair(), card_count.pair_value().is_some());
        }
    }
}
