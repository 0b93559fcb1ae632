use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cashier::{CashierError, Wallet};
use crate::commentary::{remark_or_fallback, Commentator};
use crate::deck::Shoe;
use crate::round;
use crate::rules::{BaccaratRules, MAX_CARDS_PER_ROUND};
use crate::settlement::{Bets, RoundOutcome};
use crate::statistics::{PnlPoint, RoundTally, SessionStats};
use crate::types::BetPosition;

/// Where the table is in the current round.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Display)]
pub enum RoundState {
    /// No stakes on the table.
    #[default]
    Idle,
    /// At least one bet placed, waiting for the deal.
    Betting,
    /// Cards are being dealt and bets settled. Bets are locked.
    Resolving,
    /// The round is paid out. A new round must be started before betting again.
    Settled,
}

/// Reasons a table action was refused. A refused action leaves the table untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Cannot {action} while the round is {state}")]
    WrongPhase { action: &'static str, state: RoundState },
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },
    #[error("Bets on {position} are limited to {max}")]
    PositionLimit { position: BetPosition, max: Decimal },
    #[error("Minimum bet is {minimum}, only {staked} staked")]
    BelowMinimum { staked: Decimal, minimum: Decimal },
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),
    #[error("The shoe ran out of cards mid-round")]
    ShoeExhausted,
}

impl From<CashierError> for TableError {
    fn from(e: CashierError) -> Self {
        match e {
            CashierError::InvalidAmount(amount) => TableError::InvalidAmount(amount),
            CashierError::InsufficientFunds { requested, available } => {
                TableError::InsufficientFunds { needed: requested, available }
            }
        }
    }
}

/// Everything the caller needs after a deal.
#[derive(Clone, Debug)]
pub struct DealReport {
    pub outcome: RoundOutcome,
    pub balance: Decimal,
    pub pnl: PnlPoint,
    pub tally: RoundTally,
    pub remark: String,
    /// Whether a fresh shoe was brought in before this round.
    pub reshuffled: bool,
}

/// A single-player baccarat table: shoe, wallet, bets and session history.
pub struct Table<R: Rng = StdRng> {
    rules: BaccaratRules,
    rng: R,
    shoe: Shoe,
    wallet: Wallet,
    bets: Bets,
    state: RoundState,
    stats: SessionStats,
    history: Vec<RoundOutcome>,
    commentator: Option<Box<dyn Commentator>>,
}

impl Table<StdRng> {
    pub fn new(rules: BaccaratRules) -> Self {
        Table::with_rng(rules, StdRng::from_entropy())
    }

    pub fn seeded(rules: BaccaratRules, seed: u64) -> Self {
        Table::with_rng(rules, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Table<R> {
    pub fn with_rng(rules: BaccaratRules, mut rng: R) -> Self {
        let shoe = Shoe::new(rules.decks, &mut rng);
        Table {
            rules,
            rng,
            shoe,
            wallet: Wallet::default(),
            bets: Bets::default(),
            state: RoundState::Idle,
            stats: SessionStats::default(),
            history: vec![],
            commentator: None,
        }
    }

    pub fn with_commentator(mut self, commentator: Box<dyn Commentator>) -> Self {
        self.commentator = Some(commentator);
        self
    }

    /// Replace the shoe, e.g. with a stacked one.
    #[cfg(test)]
    pub fn with_shoe(mut self, shoe: Shoe) -> Self {
        self.shoe = shoe;
        self
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn balance(&self) -> Decimal {
        self.wallet.balance()
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn bets(&self) -> &Bets {
        &self.bets
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    #[cfg(test)]
    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, CashierError> {
        let balance = self.wallet.deposit(amount)?;
        info!(%amount, %balance, "Deposit");
        Ok(balance)
    }

    /// Stakes already on the table are not available to withdraw.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, CashierError> {
        let balance = self.wallet.withdraw(amount)?;
        info!(%amount, %balance, "Withdrawal");
        Ok(balance)
    }

    /// Add `amount` to the stake on `position`, taking it from the balance.
    pub fn place_bet(&mut self, position: BetPosition, amount: Decimal) -> Result<Decimal, TableError> {
        let result = self.try_place_bet(position, amount);
        match &result {
            Ok(stake) => debug!(%position, %amount, %stake, balance = %self.balance(), "Bet placed"),
            Err(e) => warn!(%position, %amount, reason = %e, "Bet rejected"),
        }
        result
    }

    fn try_place_bet(&mut self, position: BetPosition, amount: Decimal) -> Result<Decimal, TableError> {
        match self.state {
            RoundState::Idle | RoundState::Betting => {}
            state => return Err(TableError::WrongPhase { action: "place a bet", state }),
        }
        if amount <= Decimal::ZERO {
            return Err(TableError::InvalidAmount(amount));
        }
        let new_stake = self.bets.stake(position)
            .checked_add(amount)
            .filter(|stake| *stake <= self.rules.max_bet)
            .ok_or(TableError::PositionLimit { position, max: self.rules.max_bet })?;
        self.wallet.debit(amount)?;

        self.bets.add(position, amount);
        self.state = RoundState::Betting;
        Ok(new_stake)
    }

    /// Take every stake back off the table. Only allowed before the deal.
    pub fn clear_bets(&mut self) -> Result<Decimal, TableError> {
        match self.state {
            RoundState::Idle | RoundState::Betting => {}
            state => return Err(TableError::WrongPhase { action: "clear bets", state }),
        }
        let refund = self.bets.total();
        self.wallet.credit(refund);
        self.bets = Bets::default();
        self.state = RoundState::Idle;
        debug!(%refund, balance = %self.balance(), "Bets cleared");
        Ok(refund)
    }

    /// Deal and settle a round against the current bets.
    pub fn deal(&mut self) -> Result<DealReport, TableError> {
        match self.state {
            RoundState::Idle | RoundState::Betting => {}
            state => return Err(TableError::WrongPhase { action: "deal", state }),
        }
        let staked = self.bets.total();
        if staked < self.rules.min_bet {
            return Err(TableError::BelowMinimum { staked, minimum: self.rules.min_bet });
        }

        let reshuffled = self.reshuffle_if_needed();

        let cards = round::deal_round(&mut self.shoe).ok_or(TableError::ShoeExhausted)?;
        // Bets are committed from here on.
        self.state = RoundState::Resolving;
        let natural = cards.is_natural();

        let outcome = RoundOutcome::new(cards, &self.bets, &self.rules.payouts, self.balance());
        self.wallet.credit(outcome.total_return);
        let pnl = self.stats.record(&outcome);

        info!(
            winner = %outcome.winner,
            player = outcome.player_score,
            banker = outcome.banker_score,
            natural,
            staked = %outcome.total_staked,
            returned = %outcome.total_return,
            net = %outcome.net_profit(),
            balance = %self.balance(),
            "Round settled"
        );

        let remark = remark_or_fallback(self.commentator.as_deref(), &outcome);
        self.history.push(outcome.clone());
        self.bets = Bets::default();
        self.state = RoundState::Settled;

        Ok(DealReport {
            outcome,
            balance: self.balance(),
            pnl,
            tally: self.stats.tally(),
            remark,
            reshuffled,
        })
    }

    /// Clear the settled round so bets can be placed again.
    pub fn new_round(&mut self) -> Result<(), TableError> {
        match self.state {
            RoundState::Settled | RoundState::Idle => {
                self.state = RoundState::Idle;
                Ok(())
            }
            state => Err(TableError::WrongPhase { action: "start a new round", state }),
        }
    }

    fn reshuffle_if_needed(&mut self) -> bool {
        let threshold = self.rules.reshuffle_at_cards.max(MAX_CARDS_PER_ROUND);
        if !self.shoe.needs_reshuffle(threshold) {
            return false;
        }
        info!(remaining = self.shoe.len(), decks = self.rules.decks, "Reshuffling shoe");
        self.shoe = Shoe::new(self.rules.decks, &mut self.rng);
        true
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::commentary::{DealerBanter, NO_COMMENTATOR};
    use crate::deck::CARDS_PER_DECK;
    use crate::rules::RULES;
    use crate::table::*;
    use crate::types::Rank::{self, *};
    use crate::types::Winner;

    /// A table whose shoe deals `ranks` first, padded with enough tens to skip reshuffling.
    fn stacked_table(ranks: &[Rank]) -> Table {
        let mut cards = ranks.to_vec();
        cards.resize(ranks.len() + RULES.reshuffle_at_cards, Ten);
        let mut table = Table::seeded(RULES, 1).with_shoe(Shoe::stacked(cards));
        table.deposit(dec!(1000)).unwrap();
        table
    }

    #[test]
    fn test_full_round() {
        // Player 9 beats Banker 0
        let mut table = stacked_table(&[Four, King, Five, Queen]);
        table.place_bet(BetPosition::Player, dec!(100)).unwrap();
        assert_eq!(table.state(), RoundState::Betting);
        assert_eq!(table.balance(), dec!(900));

        let report = table.deal().unwrap();
        assert_eq!(report.outcome.winner, Winner::Player);
        assert_eq!(report.outcome.total_return, dec!(200));
        assert_eq!(report.balance, dec!(1100));
        assert_eq!(report.outcome.balance_after, dec!(1100));
        assert_eq!(report.pnl, PnlPoint { round: 1, cumulative: dec!(100) });
        assert_eq!(report.tally.wins, 1);
        assert_eq!(report.remark, NO_COMMENTATOR);
        assert!(!report.reshuffled);

        assert_eq!(table.state(), RoundState::Settled);
        assert!(table.bets().is_empty());
        assert_eq!(table.history().len(), 1);
        assert_eq!(table.wallet().net_lifetime_pnl(), dec!(100));
    }

    #[test]
    fn test_settled_table_needs_new_round() {
        let mut table = stacked_table(&[Four, King, Five, Queen]);
        table.place_bet(BetPosition::Banker, dec!(10)).unwrap();
        table.deal().unwrap();

        let err = table.place_bet(BetPosition::Banker, dec!(10)).unwrap_err();
        assert_eq!(err, TableError::WrongPhase { action: "place a bet", state: RoundState::Settled });
        assert!(table.deal().is_err());
        assert!(table.clear_bets().is_err());

        table.new_round().unwrap();
        assert_eq!(table.state(), RoundState::Idle);
        table.place_bet(BetPosition::Banker, dec!(10)).unwrap();
        assert!(table.new_round().is_err());
    }

    #[test]
    fn test_clear_bets_refunds() {
        let mut table = stacked_table(&[]);
        table.place_bet(BetPosition::Player, dec!(25)).unwrap();
        table.place_bet(BetPosition::Tie, dec!(5)).unwrap();
        table.place_bet(BetPosition::Player, dec!(25)).unwrap();
        assert_eq!(table.bets().stake(BetPosition::Player), dec!(50));
        assert_eq!(table.balance(), dec!(945));

        assert_eq!(table.clear_bets(), Ok(dec!(55)));
        assert_eq!(table.balance(), dec!(1000));
        assert_eq!(table.state(), RoundState::Idle);
        assert!(table.bets().is_empty());

        // Clearing an empty table is a harmless no-op
        assert_eq!(table.clear_bets(), Ok(dec!(0)));
        assert_eq!(table.balance(), dec!(1000));
    }

    #[test]
    fn test_bet_rejections() {
        let mut table = stacked_table(&[]);

        let err = table.place_bet(BetPosition::Banker, dec!(1001)).unwrap_err();
        assert_eq!(err, TableError::InsufficientFunds { needed: dec!(1001), available: dec!(1000) });

        assert_eq!(table.place_bet(BetPosition::Tie, dec!(0)), Err(TableError::InvalidAmount(dec!(0))));
        assert_eq!(table.state(), RoundState::Idle);
        assert_eq!(table.balance(), dec!(1000));

        table.deposit(dec!(10000)).unwrap();
        table.place_bet(BetPosition::Banker, dec!(4000)).unwrap();
        let err = table.place_bet(BetPosition::Banker, dec!(1001)).unwrap_err();
        assert_eq!(err, TableError::PositionLimit { position: BetPosition::Banker, max: dec!(5000) });
        table.place_bet(BetPosition::Banker, dec!(1000)).unwrap();
        // The limit is per position
        table.place_bet(BetPosition::Player, dec!(1000)).unwrap();
        assert_eq!(table.balance(), dec!(5000));
    }

    #[test]
    fn test_huge_bet_hits_position_limit() {
        let mut table = stacked_table(&[]);
        table.place_bet(BetPosition::Player, dec!(100)).unwrap();

        let err = table.place_bet(BetPosition::Player, Decimal::MAX).unwrap_err();
        assert_eq!(err, TableError::PositionLimit { position: BetPosition::Player, max: dec!(5000) });
        assert!(matches!(
            table.place_bet(BetPosition::Tie, Decimal::MAX),
            Err(TableError::PositionLimit { position: BetPosition::Tie, .. })
        ));

        assert_eq!(table.bets().stake(BetPosition::Player), dec!(100));
        assert_eq!(table.balance(), dec!(900));
        assert_eq!(table.state(), RoundState::Betting);
    }

    #[test]
    fn test_deal_below_minimum() {
        let mut table = stacked_table(&[]);
        assert_eq!(
            table.deal().unwrap_err(),
            TableError::BelowMinimum { staked: dec!(0), minimum: dec!(5) }
        );
        table.place_bet(BetPosition::Player, dec!(4)).unwrap();
        assert!(matches!(table.deal(), Err(TableError::BelowMinimum { .. })));
        assert_eq!(table.state(), RoundState::Betting);
        assert_eq!(table.shoe().len(), RULES.reshuffle_at_cards);
        assert!(table.history().is_empty());

        table.place_bet(BetPosition::PlayerPair, dec!(1)).unwrap();
        assert!(table.deal().is_ok());
    }

    #[test]
    fn test_reshuffles_low_shoe() {
        let mut table = Table::seeded(RULES, 5).with_shoe(Shoe::stacked([Ace; 19]));
        table.deposit(dec!(100)).unwrap();
        table.place_bet(BetPosition::Banker, dec!(5)).unwrap();

        let report = table.deal().unwrap();
        assert!(report.reshuffled);
        let used = report.outcome.player_hand.len() + report.outcome.banker_hand.len();
        assert_eq!(table.shoe().len(), CARDS_PER_DECK * RULES.decks as usize - used);
    }

    #[test]
    fn test_tie_pushes_both_sides() {
        // Player A,6 = 7 and Banker 2,5 = 7 both stand
        let mut table = stacked_table(&[Ace, Two, Six, Five]);
        table.place_bet(BetPosition::Player, dec!(100)).unwrap();
        table.place_bet(BetPosition::Banker, dec!(100)).unwrap();
        let report = table.deal().unwrap();

        assert_eq!(report.outcome.winner, Winner::Tie);
        assert_eq!(report.outcome.net_profit(), dec!(0));
        assert_eq!(report.balance, dec!(1000));
        assert_eq!((report.tally.wins, report.tally.losses, report.tally.pushes), (0, 0, 1));
    }

    #[test]
    fn test_commentator_is_used() {
        let mut table = stacked_table(&[Four, King, Five, Queen]).with_commentator(Box::new(DealerBanter));
        table.place_bet(BetPosition::Player, dec!(100)).unwrap();
        let report = table.deal().unwrap();
        assert!(report.remark.contains("200"), "{}", report.remark);
    }

    #[test]
    fn test_many_rounds_keep_books() {
        let mut table = Table::seeded(RULES, 42);
        table.deposit(dec!(100000)).unwrap();
        for _ in 0..500 {
            table.place_bet(BetPosition::Banker, dec!(25)).unwrap();
            table.place_bet(BetPosition::PlayerPair, dec!(5)).unwrap();
            table.deal().unwrap();
            table.new_round().unwrap();
        }

        let stats = table.stats();
        let tally = stats.tally();
        assert_eq!(tally.rounds, 500);
        assert_eq!(tally.wins + tally.losses + tally.pushes, 500);
        assert_eq!(tally.total_wagered, dec!(15000));
        assert_eq!(stats.pnl().len(), 501);

        let net: Decimal = table.history().iter().map(|o| o.net_profit()).sum();
        assert_eq!(stats.cumulative_profit(), net);
        assert_eq!(table.balance(), dec!(100000) + net);
        assert_eq!(table.wallet().net_lifetime_pnl(), net);
        assert_eq!(table.history().last().map(|o| o.balance_after), Some(table.balance()));
    }
}
