//! Configuration loading from TOML.
//!
//! Every field has a default, so an empty or missing file gives the standard eight-deck
//! Super 6 table and a short flat-betting session.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::rules::{BaccaratRules, RULES};
use crate::settlement::Bets;
use crate::types::BetPosition;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub table: TableConfig,
    pub session: SessionConfig,
}

/// Table limits. Payout odds are fixed by the game.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TableConfig {
    pub decks: u32,
    pub reshuffle_at_cards: usize,
    pub min_bet: Decimal,
    pub max_bet: Decimal,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            decks: RULES.decks,
            reshuffle_at_cards: RULES.reshuffle_at_cards,
            min_bet: RULES.min_bet,
            max_bet: RULES.max_bet,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub rounds: u64,
    pub deposit: Decimal,
    /// Stake placed on each position every round.
    pub bets: HashMap<BetPosition, Decimal>,
    /// Seed for a reproducible shoe. Fresh entropy when absent.
    pub seed: Option<u64>,
    /// Pace the deal log with the reveal delays.
    pub replay: bool,
    pub history_csv: Option<PathBuf>,
    pub pnl_csv: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            rounds: 100,
            deposit: dec!(1000),
            bets: HashMap::from([(BetPosition::Banker, dec!(25))]),
            seed: None,
            replay: false,
            history_csv: None,
            pnl_csv: None,
        }
    }
}

impl TableConfig {
    pub fn rules(&self) -> BaccaratRules {
        BaccaratRules {
            decks: self.decks.max(1),
            reshuffle_at_cards: self.reshuffle_at_cards,
            min_bet: self.min_bet,
            max_bet: self.max_bet,
            payouts: RULES.payouts,
        }
    }
}

impl SessionConfig {
    /// The configured stakes as a bet slip.
    pub fn bet_slip(&self) -> Bets {
        self.bets
            .iter()
            .filter(|(_, stake)| **stake > Decimal::ZERO)
            .fold(Bets::default(), |bets, (&position, &stake)| bets.with(position, stake))
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration, falling back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn test_empty_config_is_reference_table() {
        let cfg = AppConfig::parse("").unwrap();
        assert_eq!(cfg.table.rules(), RULES);
        assert_eq!(cfg.session.rounds, 100);
        assert_eq!(cfg.session.bet_slip().stake(BetPosition::Banker), dec!(25));
        assert_eq!(cfg.session.seed, None);
    }

    #[test]
    fn test_parse_full_config() {
        let cfg = AppConfig::parse(r#"
            [table]
            decks = 6
            reshuffle_at_cards = 52
            min_bet = 10
            max_bet = 1000

            [session]
            rounds = 250
            deposit = 2500
            seed = 7
            replay = true
            pnl_csv = "pnl.csv"

            [session.bets]
            player = 20
            tie = 2.5
            banker_pair = 0
        "#).unwrap();

        let rules = cfg.table.rules();
        assert_eq!(rules.decks, 6);
        assert_eq!(rules.reshuffle_at_cards, 52);
        assert_eq!(rules.min_bet, dec!(10));
        assert_eq!(rules.max_bet, dec!(1000));
        assert_eq!(rules.payouts, RULES.payouts);

        assert_eq!(cfg.session.rounds, 250);
        assert_eq!(cfg.session.deposit, dec!(2500));
        assert_eq!(cfg.session.seed, Some(7));
        assert!(cfg.session.replay);
        assert_eq!(cfg.session.pnl_csv, Some(PathBuf::from("pnl.csv")));
        assert_eq!(cfg.session.history_csv, None);

        let slip = cfg.session.bet_slip();
        assert_eq!(slip.stake(BetPosition::Player), dec!(20));
        assert_eq!(slip.stake(BetPosition::Tie), dec!(2.5));
        assert_eq!(slip.stake(BetPosition::Banker), dec!(0));
        assert_eq!(slip.placed().count(), 2);
    }

    #[test]
    fn test_rejects_unknown_position() {
        assert!(AppConfig::parse("[session.bets]\ndragon = 5\n").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = AppConfig::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(cfg.session.deposit, dec!(1000));
        assert!(AppConfig::load("does/not/exist.toml").is_err());
    }
}
