use std::ops;
use std::ops::Index;

use crate::types::Card;

/// A Hand containing the cards dealt to the Player or the Banker.
#[derive(PartialEq, Eq, Clone, Debug, Default, Hash)]
pub struct Hand {
    /// All cards in this Hand, in the order they were dealt.
    pub cards: Vec<Card>,
}

/// Build a Hand from cards or ranks. Ranks become Spades with identity 0.
#[macro_export]
macro_rules! hand {
    ( $( $x:expr ),* ) => {
        {
            #[allow(unused_mut)]
            let mut temp_vec: Vec<$crate::types::Card> = Vec::new();
            $(
                temp_vec.push($crate::types::Card::from($x));
            )*
            $crate::hand::Hand { cards: temp_vec }
        }
    };
}

impl Hand {
    /// Point total of this hand: the sum of card values, modulo 10.
    pub fn score(&self) -> u8 {
        score(&self.cards)
    }

    /// Checks whether the first two cards dealt share a rank. Any third card is ignored.
    pub fn is_pair(&self) -> bool {
        is_pair(&self.cards)
    }

    /// The drawn third card, if any.
    pub fn third_card(&self) -> Option<&Card> {
        self.cards.get(2)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

pub fn score(cards: &[Card]) -> u8 {
    let sum: u32 = cards.iter().map(|c| c.value() as u32).sum();
    (sum % 10) as u8
}

pub fn is_pair(cards: &[Card]) -> bool {
    match cards {
        [first, second, ..] => first.rank == second.rank,
        _ => false,
    }
}

impl Index<usize> for Hand {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}

impl ops::AddAssign<Card> for Hand {
    fn add_assign(&mut self, rhs: Card) {
        self.cards.push(rhs);
    }
}
