use std::ops::Index;

use chrono::{DateTime, Utc};
use enum_map::EnumMap;
use rust_decimal::Decimal;

use crate::hand::Hand;
use crate::round::{HandResult, RoundCards};
use crate::rules::Payouts;
use crate::types::{BetPosition, Winner};

/// Stakes on each of the five betting positions. A zero stake means no bet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bets(EnumMap<BetPosition, Decimal>);

impl Bets {
    /// Bets builder, mostly for tests and configured strategies.
    pub fn with(mut self, position: BetPosition, stake: Decimal) -> Self {
        self.0[position] += stake;
        self
    }

    pub fn stake(&self, position: BetPosition) -> Decimal {
        self.0[position]
    }

    pub fn add(&mut self, position: BetPosition, amount: Decimal) {
        self.0[position] += amount;
    }

    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|stake| stake.is_zero())
    }

    /// Positions with a non-zero stake.
    pub fn placed(&self) -> impl Iterator<Item = (BetPosition, Decimal)> + '_ {
        self.0.iter().filter(|(_, stake)| !stake.is_zero()).map(|(p, &s)| (p, s))
    }
}

impl Index<BetPosition> for Bets {
    type Output = Decimal;

    fn index(&self, index: BetPosition) -> &Self::Output {
        &self.0[index]
    }
}

/// A finished round. Created once and never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub winner: Winner,
    pub player_score: u8,
    pub banker_score: u8,
    pub is_player_pair: bool,
    pub is_banker_pair: bool,
    /// Stake plus profit paid back across all positions.
    pub total_return: Decimal,
    pub total_staked: Decimal,
    /// Player balance once this round's return was paid.
    pub balance_after: Decimal,
    pub timestamp: DateTime<Utc>,
    pub player_hand: Hand,
    pub banker_hand: Hand,
}

impl RoundOutcome {
    /// `balance` is what the player holds off the table when the round is dealt.
    pub fn new(cards: RoundCards, bets: &Bets, payouts: &Payouts, balance: Decimal) -> Self {
        let result = cards.result();
        let total_return = settle(bets, &result, payouts);
        RoundOutcome {
            winner: result.winner,
            player_score: result.player_score,
            banker_score: result.banker_score,
            is_player_pair: result.is_player_pair,
            is_banker_pair: result.is_banker_pair,
            total_return,
            total_staked: bets.total(),
            balance_after: balance.saturating_add(total_return),
            timestamp: Utc::now(),
            player_hand: cards.player,
            banker_hand: cards.banker,
        }
    }

    pub fn net_profit(&self) -> Decimal {
        self.total_return - self.total_staked
    }

    /// Banker won with a final 6 and Banker bets were paid at the reduced rate.
    pub fn is_super_six(&self) -> bool {
        is_super_six(self.winner, self.banker_score)
    }
}

fn is_super_six(winner: Winner, banker_score: u8) -> bool {
    winner == Winner::Banker && banker_score == 6
}

/// Total returned (stake plus profit) for a single position. Zero on a loss, the stake alone on a push.
pub fn position_return(position: BetPosition, stake: Decimal, result: &HandResult, payouts: &Payouts) -> Decimal {
    if stake.is_zero() {
        return Decimal::ZERO;
    }
    let win = |odds: Decimal| stake.saturating_add(stake.saturating_mul(odds));

    match (position, result.winner) {
        (BetPosition::Player, Winner::Player) => win(payouts.player),
        (BetPosition::Banker, Winner::Banker) => {
            if is_super_six(result.winner, result.banker_score) {
                win(payouts.banker_super_six)
            } else {
                win(payouts.banker)
            }
        }
        (BetPosition::Player | BetPosition::Banker, Winner::Tie) => stake,
        (BetPosition::Tie, Winner::Tie) => win(payouts.tie),
        (BetPosition::PlayerPair, _) if result.is_player_pair => win(payouts.pair),
        (BetPosition::BankerPair, _) if result.is_banker_pair => win(payouts.pair),
        _ => Decimal::ZERO,
    }
}

/// Settle every position independently and return the total amount paid back.
pub fn settle(bets: &Bets, result: &HandResult, payouts: &Payouts) -> Decimal {
    bets.placed()
        .map(|(position, stake)| position_return(position, stake, result, payouts))
        .sum()
}
