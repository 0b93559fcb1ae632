use std::cmp::Ordering;

use crate::hand::{score, Hand};
use crate::types::{Card, Side, Winner};

/// The final cards of a completed round, in deal order within each hand.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct RoundCards {
    pub player: Hand,
    pub banker: Hand,
}

/// Everything settlement needs to know about how a round ended.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct HandResult {
    pub winner: Winner,
    pub player_score: u8,
    pub banker_score: u8,
    pub is_player_pair: bool,
    pub is_banker_pair: bool,
}

impl RoundCards {
    pub fn result(&self) -> HandResult {
        let player_score = self.player.score();
        let banker_score = self.banker.score();
        HandResult {
            winner: winner(player_score, banker_score),
            player_score,
            banker_score,
            is_player_pair: self.player.is_pair(),
            is_banker_pair: self.banker.is_pair(),
        }
    }

    /// Whether the initial two-card deal ended the round.
    pub fn is_natural(&self) -> bool {
        is_natural(score(first_two(&self.player)), score(first_two(&self.banker)))
    }

    /// Cards in the order they left the shoe: P, B, P, B, then any third cards.
    pub fn deal_order(&self) -> Vec<(Side, Card)> {
        let mut order = Vec::with_capacity(self.player.len() + self.banker.len());
        for i in 0..2 {
            if let Some(&c) = self.player.cards.get(i) {
                order.push((Side::Player, c));
            }
            if let Some(&c) = self.banker.cards.get(i) {
                order.push((Side::Banker, c));
            }
        }
        if let Some(&c) = self.player.third_card() {
            order.push((Side::Player, c));
        }
        if let Some(&c) = self.banker.third_card() {
            order.push((Side::Banker, c));
        }
        order
    }
}

fn first_two(hand: &Hand) -> &[Card] {
    &hand.cards[..hand.len().min(2)]
}

pub fn winner(player_score: u8, banker_score: u8) -> Winner {
    match player_score.cmp(&banker_score) {
        Ordering::Greater => Winner::Player,
        Ordering::Less => Winner::Banker,
        Ordering::Equal => Winner::Tie,
    }
}

/// An 8 or 9 on either side's first two cards ends the round.
pub fn is_natural(player_score: u8, banker_score: u8) -> bool {
    player_score >= 8 || banker_score >= 8
}

/// Player draws on 0-5 and stands on 6-7.
pub fn player_draws(player_score: u8) -> bool {
    player_score <= 5
}

/// Whether the Banker draws a third card, given its two-card score and the value of the
/// Player's third card (None if the Player stood).
pub fn banker_draws(banker_score: u8, player_third: Option<u8>) -> bool {
    match player_third {
        None => banker_score <= 5,
        Some(p3) => match banker_score {
            0..=2 => true,
            3 => p3 != 8,
            4 => (2..=7).contains(&p3),
            5 => (4..=7).contains(&p3),
            6 => p3 == 6 || p3 == 7,
            _ => false,
        },
    }
}

/// Deal one complete round from `cards`, drawing only what the table rules call for.
/// Returns None if the cards run out before the round is complete.
pub fn deal_round<I>(cards: &mut I) -> Option<RoundCards>
where
    I: Iterator<Item = Card>,
{
    let mut round = RoundCards::default();
    round.player += cards.next()?;
    round.banker += cards.next()?;
    round.player += cards.next()?;
    round.banker += cards.next()?;

    let player_score = round.player.score();
    let banker_score = round.banker.score();

    if is_natural(player_score, banker_score) {
        return Some(round);
    }

    let player_third = if player_draws(player_score) {
        let card = cards.next()?;
        round.player += card;
        Some(card.value())
    } else {
        None
    };

    if banker_draws(banker_score, player_third) {
        round.banker += cards.next()?;
    }

    Some(round)
}

/// Resolve a round from a fixed sequence of cards in shoe order. Unused trailing cards are ignored.
pub fn resolve(cards: &[Card]) -> Option<RoundCards> {
    deal_round(&mut cards.iter().copied())
}
