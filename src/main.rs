mod cashier;
mod commentary;
mod config;
mod deck;
mod hand;
mod replay;
mod report;
mod round;
mod rules;
mod settlement;
mod statistics;
mod table;
mod types;

use std::fs::File;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::commentary::DealerBanter;
use crate::config::AppConfig;
use crate::round::RoundCards;
use crate::settlement::RoundOutcome;
use crate::table::{DealReport, Table};

const DEFAULT_CONFIG: &str = "baccarat.toml";

fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = AppConfig::load_or_default(&config_path)?;

    init_logging();

    let rules = cfg.table.rules();
    info!(config = %config_path, decks = rules.decks, chips = ?crate::rules::CHIP_VALUES, min_bet = %rules.min_bet, max_bet = %rules.max_bet, "Opening table");

    let table = match cfg.session.seed {
        Some(seed) => Table::seeded(rules, seed),
        None => Table::new(rules),
    };
    let mut table = table.with_commentator(Box::new(DealerBanter));
    table.deposit(cfg.session.deposit)?;

    let slip = cfg.session.bet_slip();
    'rounds: for round in 1..=cfg.session.rounds {
        if table.balance() < slip.total() {
            warn!(round, balance = %table.balance(), needed = %slip.total(), "Bankroll exhausted, stopping");
            break;
        }
        for (position, stake) in slip.placed() {
            if let Err(e) = table.place_bet(position, stake) {
                warn!(round, reason = %e, "Configured bets refused by the table, stopping");
                table.clear_bets()?;
                break 'rounds;
            }
        }
        let report = match table.deal() {
            Ok(report) => report,
            Err(e) => {
                warn!(round, reason = %e, "Deal refused, stopping");
                table.clear_bets()?;
                break;
            }
        };
        if cfg.session.replay {
            replay_round(&report.outcome);
        }
        log_report(round, &report);
        table.new_round()?;
    }

    let balance = table.balance();
    if balance > Decimal::ZERO {
        table.withdraw(balance)?;
    }

    print_summary(&table, balance);

    if let Some(path) = &cfg.session.history_csv {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_history(file, table.history())?;
        info!(path = %path.display(), "Wrote round history");
    }
    if let Some(path) = &cfg.session.pnl_csv {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_pnl(file, table.stats().pnl())?;
        info!(path = %path.display(), "Wrote PnL series");
    }

    Ok(())
}

fn replay_round(outcome: &RoundOutcome) {
    let cards = RoundCards {
        player: outcome.player_hand.clone(),
        banker: outcome.banker_hand.clone(),
    };
    let steps = replay::reveal_sequence(&cards);
    debug!(steps = steps.len(), duration_ms = replay::total_duration(&steps).as_millis() as u64, "Replaying deal");
    replay::play_back(&steps, |step| {
        info!(side = %step.side, card = %step.card, showing = step.showing, "{}", step.caption.unwrap_or("Dealing..."));
    });
}

fn log_report(round: u64, report: &DealReport) {
    let o = &report.outcome;
    info!(
        round,
        winner = %o.winner,
        player = o.player_score,
        banker = o.banker_score,
        net = %o.net_profit(),
        balance = %report.balance,
        pnl = %report.pnl.cumulative,
        reshuffled = report.reshuffled,
        "{}", report.remark
    );
}

fn print_summary(table: &Table, cashed_out: Decimal) {
    let stats = table.stats();
    let tally = stats.tally();
    println!("Played {} rounds: {} won, {} lost, {} pushed", tally.rounds, tally.wins, tally.losses, tally.pushes);
    println!("Wagered {}, win rate {}%, ROI {:+}%",
             tally.total_wagered, stats.win_rate().round_dp(1), stats.roi().round_dp(2));
    let wallet = table.wallet();
    println!("Cashed out {}: deposited {}, withdrawn {}, net lifetime PnL {:+}",
             cashed_out, wallet.deposited(), wallet.withdrawn(), wallet.net_lifetime_pnl());
    println!("Bead plate: {}", report::bead_plate(table.history()));
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("baccarat_royale=info"));

    if std::env::var("BACCARAT_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
