use rand::Rng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

use crate::types::{Card, Rank, Suit};

pub const CARDS_PER_DECK: usize = 52;

/// A Shoe of cards, dealt from the back of `cards`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Build a shoe of `decks` standard 52-card decks and shuffle it with a uniform permutation.
    /// At least one deck is always used.
    pub fn new<R: Rng + ?Sized>(decks: u32, rng: &mut R) -> Self {
        let mut shoe = Shoe::ordered(decks);
        shoe.cards.shuffle(rng);
        shoe
    }

    /// Build an unshuffled shoe, deck after deck in suit and rank order.
    pub fn ordered(decks: u32) -> Self {
        let decks = decks.max(1);
        let mut cards = Vec::with_capacity(decks as usize * CARDS_PER_DECK);
        for _ in 0..decks {
            for suit in Suit::iter() {
                for rank in Rank::iter() {
                    let id = cards.len() as u32;
                    cards.push(Card::new(rank, suit, id));
                }
            }
        }
        Shoe { cards }
    }

    /// Build a shoe whose next draws are exactly `draw_order`, first card first. Card identities
    /// are renumbered so they stay unique.
    #[cfg(test)]
    pub fn stacked<I, C>(draw_order: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Card>,
    {
        let mut cards: Vec<Card> = draw_order.into_iter().map(Into::into).collect();
        for (id, card) in cards.iter_mut().enumerate() {
            card.id = id as u32;
        }
        cards.reverse();
        Shoe { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the next card, or None if the shoe is spent.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Whether fewer than `threshold` cards remain.
    pub fn needs_reshuffle(&self, threshold: usize) -> bool {
        self.cards.len() < threshold
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Iterator for Shoe {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        self.draw()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::deck::*;

    #[test]
    fn test_shoe_composition() {
        let mut rng = StdRng::seed_from_u64(7);
        for decks in [1, 6, 8] {
            let shoe = Shoe::new(decks, &mut rng);
            assert_eq!(shoe.len(), CARDS_PER_DECK * decks as usize);

            let mut counts: HashMap<(Rank, Suit), u32> = HashMap::new();
            for card in shoe.cards() {
                *counts.entry((card.rank, card.suit)).or_default() += 1;
            }
            assert_eq!(counts.len(), CARDS_PER_DECK);
            assert!(counts.values().all(|&n| n == decks));

            let ids: HashSet<u32> = shoe.cards().iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), shoe.len());
        }
    }

    #[test]
    fn test_shuffle_permutes() {
        let mut rng = StdRng::seed_from_u64(99);
        let shuffled = Shoe::new(8, &mut rng);
        assert_ne!(shuffled, Shoe::ordered(8));
    }

    #[test]
    fn test_draw_until_empty() {
        let mut shoe = Shoe::stacked([Rank::Ace, Rank::King]);
        assert_eq!(shoe.draw().map(|c| c.rank), Some(Rank::Ace));
        assert!(shoe.needs_reshuffle(2));
        assert_eq!(shoe.draw().map(|c| c.rank), Some(Rank::King));
        assert!(shoe.is_empty());
        assert_eq!(shoe.draw(), None);
    }

    #[test]
    fn test_zero_decks_builds_one() {
        assert_eq!(Shoe::ordered(0).len(), CARDS_PER_DECK);
    }
}
