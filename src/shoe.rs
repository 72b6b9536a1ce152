use std::ops::{Deref, DerefMut};

use log::warn;
use strum::IntoEnumIterator;

use crate::{CardCount, Error, Hand, Rank, MAX_NUMBER_OF_DECKS};

/// Cards not dealt yet, counted per rank.
///
/// Alongside the 13 rank counts the shoe keeps a `CardCount` by card value,
/// which is what probabilities and memoization keys are computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    number_of_decks: u8,
    counts: [u16; 13],
    card_count: CardCount,
}

impl Shoe {
    /// Creates a full shoe.
    pub fn with_number_of_decks(number_of_decks: u8) -> Result<Shoe, Error> {
        if number_of_decks == 0 || number_of_decks > MAX_NUMBER_OF_DECKS {
            return Err(Error::InvalidNumberOfDecks(number_of_decks));
        }
        Ok(Shoe {
            number_of_decks,
            counts: [(number_of_decks as u16) * 4; 13],
            card_count: CardCount::with_number_of_decks(number_of_decks),
        })
    }

    /// Creates a full shoe, then takes out every card already visible on the table.
    pub fn init(
        number_of_decks: u8,
        visible_hands: &[Hand],
        dealer_up_card: Rank,
    ) -> Result<Shoe, Error> {
        let mut shoe = Shoe::with_number_of_decks(number_of_decks)?;
        for hand in visible_hands {
            for &rank in hand.cards() {
                shoe.remove_visible(rank);
            }
        }
        shoe.remove_visible(dealer_up_card);
        Ok(shoe)
    }

    /// Creates a shoe from explicit per-rank counts, indexed by `Rank::index`.
    /// Counts above what the decks hold are rejected.
    pub fn from_counts(number_of_decks: u8, counts: [u16; 13]) -> Result<Shoe, Error> {
        let mut shoe = Shoe::with_number_of_decks(number_of_decks)?;
        for rank in Rank::iter() {
            let count = counts[rank.index()];
            if count > shoe.counts[rank.index()] {
                return Err(Error::TooManyCards { rank, count });
            }
            for _ in count..shoe.counts[rank.index()] {
                shoe.remove_visible(rank);
            }
        }
        Ok(shoe)
    }

    /// Takes out a card seen on the table. A rank that is already exhausted
    /// stays at zero. Returns whether a card was removed.
    pub fn remove_visible(&mut self, rank: Rank) -> bool {
        if self.counts[rank.index()] == 0 {
            warn!("visible card {} is not in the shoe any more, ignored", rank);
            return false;
        }
        self.counts[rank.index()] -= 1;
        self.card_count.remove_card(rank.card_value());
        true
    }

    pub fn count(&self, rank: Rank) -> u16 {
        self.counts[rank.index()]
    }

    /// Number of cards of the given card value (in [1, 10]).
    pub fn value_count(&self, card_value: u8) -> u16 {
        self.card_count[card_value]
    }

    pub fn total(&self) -> u16 {
        self.card_count.get_total()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Probability that the next card has the given card value.
    pub fn proportion(&self, card_value: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.value_count(card_value) as f64 / total as f64
    }

    pub fn card_count(&self) -> &CardCount {
        &self.card_count
    }

    /// Exact key of the remaining composition by card value.
    pub fn signature(&self) -> u128 {
        self.card_count.signature()
    }

    /// Takes a card of the given rank out of the shoe. The card goes back in when
    /// the returned guard is dropped. Returns None if no such card is left.
    pub fn draw(&mut self, rank: Rank) -> Option<DrawnCard<'_>> {
        if self.counts[rank.index()] == 0 {
            return None;
        }
        self.counts[rank.index()] -= 1;
        self.card_count.remove_card(rank.card_value());
        Some(DrawnCard { shoe: self, rank })
    }

    /// Like `draw`, picking any rank of the given card value. All such ranks
    /// lead to the same totals and pairs, so which one is taken never matters.
    pub fn draw_value(&mut self, card_value: u8) -> Option<DrawnCard<'_>> {
        let rank = Rank::with_card_value(card_value).find(|&rank| self.count(rank) > 0)?;
        self.draw(rank)
    }

    /// Puts a drawn card back. Exact inverse of a draw.
    pub(crate) fn undraw(&mut self, rank: Rank) {
        debug_assert!(self.counts[rank.index()] < (self.number_of_decks as u16) * 4);
        self.counts[rank.index()] += 1;
        self.card_count.add_card(rank.card_value());
    }
}

/// A card temporarily taken out of a shoe. Dereferences to the shoe so the
/// calculation can keep going with the card removed.
pub struct DrawnCard<'a> {
    shoe: &'a mut Shoe,
    rank: Rank,
}

impl DrawnCard<'_> {
    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl Deref for DrawnCard<'_> {
    type Target = Shoe;
    fn deref(&self) -> &Self::Target {
        self.shoe
    }
}

impl DerefMut for DrawnCard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.shoe
    }
}

impl Drop for DrawnCard<'_> {
    fn drop(&mut self) {
        self.shoe.undraw(self.rank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_shoe() {
        let shoe = Shoe::with_number_of_decks(2).unwrap();
        assert_eq!(shoe.total(), 104);
        assert_eq!(shoe.count(Rank::Queen), 8);
        assert_eq!(shoe.value_count(10), 32);
        assert_eq!(shoe.value_count(1), 8);
        assert!((shoe.proportion(10) - 32.0 / 104.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_number_of_decks() {
        assert_eq!(
            Shoe::with_number_of_decks(0),
            Err(Error::InvalidNumberOfDecks(0))
        );
        assert_eq!(
            Shoe::with_number_of_decks(9),
            Err(Error::InvalidNumberOfDecks(9))
        );
    }

    #[test]
    fn init_removes_visible_cards() {
        let hands = vec!["A,K".parse().unwrap(), "8,8".parse().unwrap()];
        let shoe = Shoe::init(1, &hands, Rank::Eight).unwrap();
        assert_eq!(shoe.total(), 47);
        assert_eq!(shoe.count(Rank::Ace), 3);
        assert_eq!(shoe.count(Rank::King), 3);
        assert_eq!(shoe.count(Rank::Eight), 1);
        assert_eq!(shoe.value_count(10), 15);
    }

    #[test]
    fn init_clamps_at_zero() {
        let hands = vec!["7,7,7,7,7".parse().unwrap()];
        let shoe = Shoe::init(1, &hands, Rank::Seven).unwrap();
        assert_eq!(shoe.count(Rank::Seven), 0);
        assert_eq!(shoe.total(), 48);
    }

    #[test]
    fn drawn_card_goes_back_on_drop() {
        let mut shoe = Shoe::with_number_of_decks(1).unwrap();
        let before = shoe.clone();
        {
            let mut drawn = shoe.draw(Rank::Five).unwrap();
            assert_eq!(drawn.rank(), Rank::Five);
            assert_eq!(drawn.count(Rank::Five), 3);
            assert_eq!(drawn.total(), 51);
            let nested = drawn.draw_value(5).unwrap();
            assert_eq!(nested.count(Rank::Five), 2);
        }
        assert_eq!(shoe, before);
    }

    #[test]
    fn draw_exhausted_rank() {
        let mut shoe = Shoe::from_counts(1, [0, 4, 4, 4, 4, 4, 4, 4, 4, 0, 0, 2, 0]).unwrap();
        assert!(shoe.draw(Rank::Ace).is_none());
        assert!(shoe.draw_value(1).is_none());
        let drawn = shoe.draw_value(10).unwrap();
        assert_eq!(drawn.rank(), Rank::Queen);
    }

    #[test]
    fn from_counts_rejects_too_many_cards() {
        assert_eq!(
            Shoe::from_counts(1, [5; 13]),
            Err(Error::TooManyCards {
                rank: Rank::Ace,
                count: 5
            })
        );
        let shoe = Shoe::from_counts(1, [1; 13]).unwrap();
        assert_eq!(shoe.total(), 13);
        assert_eq!(shoe.value_count(10), 4);
    }

    #[test]
    fn empty_shoe() {
        let mut shoe = Shoe::from_counts(1, [0; 13]).unwrap();
        assert!(shoe.is_empty());
        assert_eq!(shoe.proportion(10), 0.0);
        assert!(shoe.draw_value(10).is_none());
    }
}
