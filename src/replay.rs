//! Paced reveal of an already-resolved round, for displays that animate the deal.
//!
//! Nothing here influences the outcome: the round is fully dealt and settled before a
//! [RevealStep] sequence is built from it.

use std::thread;
use std::time::Duration;

use crate::round::RoundCards;
use crate::types::{Card, Side};

pub const INITIAL_CARD_PAUSE: Duration = Duration::from_millis(500);
/// Pause after the fourth card, before any third cards or the result.
pub const INITIAL_DEAL_PAUSE: Duration = Duration::from_millis(800);
pub const THIRD_CARD_PAUSE: Duration = Duration::from_millis(800);

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RevealStep {
    pub side: Side,
    pub card: Card,
    /// Cards showing for this side once this step is revealed.
    pub showing: usize,
    /// Wait after revealing this card.
    pub pause: Duration,
    pub caption: Option<&'static str>,
}

/// The reveal sequence for a round: the four initial cards alternating Player and Banker, then
/// the Player's and Banker's third cards.
pub fn reveal_sequence(cards: &RoundCards) -> Vec<RevealStep> {
    let mut steps = Vec::with_capacity(6);
    let (mut player_showing, mut banker_showing) = (0, 0);

    for (n, (side, card)) in cards.deal_order().into_iter().enumerate() {
        let showing = match side {
            Side::Player => { player_showing += 1; player_showing }
            Side::Banker => { banker_showing += 1; banker_showing }
        };
        let (pause, caption) = match n {
            0..=2 => (INITIAL_CARD_PAUSE, None),
            3 => (INITIAL_DEAL_PAUSE, None),
            _ => (THIRD_CARD_PAUSE, Some(match side {
                Side::Player => "Player draws...",
                Side::Banker => "Banker draws...",
            })),
        };
        steps.push(RevealStep { side, card, showing, pause, caption });
    }
    steps
}

pub fn total_duration(steps: &[RevealStep]) -> Duration {
    steps.iter().map(|s| s.pause).sum()
}

/// Hand each step to `on_step`, sleeping for its pause afterwards.
pub fn play_back<F: FnMut(&RevealStep)>(steps: &[RevealStep], mut on_step: F) {
    for step in steps {
        on_step(step);
        thread::sleep(step.pause);
    }
}
