use derive_more::{Add, AddAssign};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::settlement::RoundOutcome;

/// Running counters folded together one round at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Add, AddAssign)]
pub struct RoundTally {
    pub rounds: u64,
    pub total_wagered: Decimal,
    pub wins: u64,
    pub losses: u64,
    /// Rounds with a net profit of exactly zero.
    pub pushes: u64,
}

impl From<&RoundOutcome> for RoundTally {
    fn from(outcome: &RoundOutcome) -> Self {
        let net = outcome.net_profit();
        RoundTally {
            rounds: 1,
            total_wagered: outcome.total_staked,
            wins: (net > Decimal::ZERO) as u64,
            losses: (net < Decimal::ZERO) as u64,
            pushes: net.is_zero() as u64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PnlPoint {
    pub round: u64,
    pub cumulative: Decimal,
}

/// Session performance: counters plus the cumulative profit-and-loss series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStats {
    tally: RoundTally,
    pnl: Vec<PnlPoint>,
}

impl Default for SessionStats {
    fn default() -> Self {
        SessionStats {
            tally: RoundTally::default(),
            pnl: vec![PnlPoint { round: 0, cumulative: Decimal::ZERO }],
        }
    }
}

impl SessionStats {
    /// Fold one completed round in and return the new PnL point.
    pub fn record(&mut self, outcome: &RoundOutcome) -> PnlPoint {
        self.tally += RoundTally::from(outcome);
        let point = PnlPoint {
            round: self.pnl.len() as u64,
            cumulative: self.cumulative_profit() + outcome.net_profit(),
        };
        self.pnl.push(point);
        point
    }

    pub fn tally(&self) -> RoundTally {
        self.tally
    }

    /// Cumulative PnL, starting with the zero point before any round.
    pub fn pnl(&self) -> &[PnlPoint] {
        &self.pnl
    }

    pub fn cumulative_profit(&self) -> Decimal {
        self.pnl.last().map_or(Decimal::ZERO, |p| p.cumulative)
    }

    /// Percentage of decided (non-push) rounds won, 0 before any round is decided.
    pub fn win_rate(&self) -> Decimal {
        let decided = self.tally.wins + self.tally.losses;
        if decided == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.tally.wins) * dec!(100) / Decimal::from(decided)
    }

    /// Return on investment as a percentage of the total wagered, 0 before anything is wagered.
    pub fn roi(&self) -> Decimal {
        if self.tally.total_wagered.is_zero() {
            return Decimal::ZERO;
        }
        self.cumulative_profit() * dec!(100) / self.tally.total_wagered
    }
}
