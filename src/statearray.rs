use std::collections::HashMap;
use std::hash::Hash;

const LANE_BITS: u32 = 8;
const LANE_UNITS: [u128; 10] = get_lane_units();

const fn get_lane_units() -> [u128; 10] {
    let mut ret: [u128; 10] = [0; 10];

    let mut i = 0;
    while i < ret.len() {
        ret[i] = 1 << (LANE_BITS * i as u32);
        i += 1;
    }

    ret
}

/// Memoization table of one calculation.
#[derive(Debug, Clone)]
pub struct StateArray<K: Hash + Eq, T> {
    data: HashMap<K, T>,
}

impl<K: Hash + Eq, T> Default for StateArray<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, T> StateArray<K, T> {
    pub fn new() -> StateArray<K, T> {
        StateArray {
            data: HashMap::new(),
        }
    }

    pub fn contains_state(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&T> {
        self.data.get(key)
    }

    pub fn insert(&mut self, key: K, value: T) {
        self.data.insert(key, value);
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }
}

/// Numbers of cards of each card value (from 1 to 10 inclusive), used both for
/// the cards left in a shoe and for the composition of a hand.
///
/// `signature` packs every count into its own 8-bit lane, so two card counts
/// are equal iff their signatures are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CardCount {
    counts: [u16; 10],
    signature: u128,
    sum: u16,
    total: u16,
}

impl CardCount {
    pub fn new(counts: &[u16; 10]) -> CardCount {
        let mut card_count = CardCount {
            counts: *counts,
            signature: 0,
            sum: 0,
            total: 0,
        };

        card_count.propagate_counts();

        card_count
    }

    pub fn with_number_of_decks(number_of_decks: u8) -> CardCount {
        let mut counts = [(number_of_decks as u16) * 4; 10];
        counts[9] = (number_of_decks as u16) * 16;
        Self::new(&counts)
    }

    /// A hand holding exactly one card of the given card value.
    pub fn single(card_value: u8) -> CardCount {
        let mut card_count = CardCount::default();
        card_count.add_card(card_value);
        card_count
    }

    /// Add a card of given card value.
    ///
    /// Note that this method won't check if the card value is valid.
    pub fn add_card(&mut self, card_value: u8) {
        let index = (card_value - 1) as usize;
        self.counts[index] += 1;
        self.signature += LANE_UNITS[index];
        self.sum += card_value as u16;
        self.total += 1;
    }

    /// Remove a card of given card value.
    ///
    /// Note that this method won't check if the card value is valid. Callers
    /// must make sure the number of the given card value is not 0.
    pub fn remove_card(&mut self, card_value: u8) {
        let index = (card_value - 1) as usize;
        debug_assert!(self.counts[index] > 0);
        self.counts[index] -= 1;
        self.signature -= LANE_UNITS[index];
        self.sum -= card_value as u16;
        self.total -= 1;
    }

    /// Copy of this count with one more card of the given card value.
    pub fn with_card(&self, card_value: u8) -> CardCount {
        let mut next = *self;
        next.add_card(card_value);
        next
    }

    /// Note that this method treats Ace as 1.
    pub fn get_sum(&self) -> u16 {
        self.sum
    }

    pub fn get_total(&self) -> u16 {
        self.total
    }

    pub fn signature(&self) -> u128 {
        self.signature
    }

    pub fn has_ace(&self) -> bool {
        self.counts[0] > 0
    }

    /// An Ace is counting as 11.
    pub fn is_soft(&self) -> bool {
        self.has_ace() && self.sum + 10 <= 21
    }

    pub fn bust(&self) -> bool {
        self.sum > 21
    }

    pub fn is_natural(&self) -> bool {
        self.total == 2 && self.counts[0] == 1 && self.counts[9] == 1
    }

    /// Card value of the pair if this holds exactly two cards of equal value.
    pub fn pair_value(&self) -> Option<u8> {
        if self.total != 2 {
            return None;
        }
        self.counts
            .iter()
            .position(|&count| count == 2)
            .map(|index| (index + 1) as u8)
    }

    pub fn get_actual_sum(&self) -> u16 {
        if self.is_soft() {
            self.sum + 10
        } else {
            self.sum
        }
    }

    fn propagate_counts(&mut self) {
        self.signature = 0;
        self.sum = 0;
        self.total = 0;
        for i in 0..self.counts.len() {
            self.signature += (self.counts[i] as u128) * LANE_UNITS[i];
            self.sum += ((i + 1) as u16) * self.counts[i];
            self.total += self.counts[i];
        }
    }
}

impl std::ops::Index<u8> for CardCount {
    type Output = u16;
    fn index(&self, index: u8) -> &Self::Output {
        &self.counts[(index - 1) as usize]
    }
}
