use thiserror::Error;
use tracing::warn;

use crate::settlement::RoundOutcome;
use crate::types::Winner;

/// Shown when no commentator is attached to the table.
pub const NO_COMMENTATOR: &str = "Dealer smiles mysteriously.";
/// Shown when the commentator fails.
pub const FALLBACK_REMARK: &str = "The cards speak for themselves.";
/// Shown when the commentator has nothing to say.
pub const EMPTY_REMARK: &str = "Place your bets, please.";

// Only remote commentators raise these. The offline dealer never fails.
#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("Commentator unavailable: {0}")]
    Unavailable(String),
    #[error("Commentator failed: {0}")]
    Failed(String),
}

/// Produces a one-line dealer remark about a finished round.
pub trait Commentator: Send + Sync {
    fn remark(&self, outcome: &RoundOutcome) -> Result<String, CommentaryError>;
}

/// Ask `commentator` for a remark. Never fails: absence, errors and blank answers all fall back to
/// a fixed line.
pub fn remark_or_fallback(commentator: Option<&dyn Commentator>, outcome: &RoundOutcome) -> String {
    let Some(commentator) = commentator else {
        return NO_COMMENTATOR.to_string();
    };
    match commentator.remark(outcome) {
        Ok(text) if text.trim().is_empty() => EMPTY_REMARK.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "Commentary failed, using fallback");
            FALLBACK_REMARK.to_string()
        }
    }
}

/// An offline dealer with a small repertoire, keyed off the result and the player's return.
#[derive(Clone, Copy, Debug, Default)]
pub struct DealerBanter;

const WIN_LINES: [&str; 3] = [
    "Fortune favours the bold tonight. Well played.",
    "The shoe is kind to you. Enjoy it while it lasts.",
    "A fine read of the table. Congratulations.",
];

const LOSS_LINES: [&str; 3] = [
    "The cards turn on a whisper. The next hand is yours to claim.",
    "Patience. Every shoe has its rhythm.",
    "Not this time, but the night is young.",
];

impl Commentator for DealerBanter {
    fn remark(&self, outcome: &RoundOutcome) -> Result<String, CommentaryError> {
        let pick = (outcome.player_score + outcome.banker_score) as usize;
        let net = outcome.net_profit();

        let text = if outcome.total_staked.is_zero() {
            format!("{} wins, {} to {}.", outcome.winner, outcome.player_score, outcome.banker_score)
        } else if outcome.is_super_six() {
            if net.is_sign_negative() {
                "Super 6 for the Banker. A half measure, but it still stings.".to_string()
            } else {
                format!("Super 6 for the Banker. Half odds, but {} back all the same.", outcome.total_return)
            }
        } else if net.is_zero() {
            match outcome.winner {
                Winner::Tie => "A tie. Your stake rests where it was.".to_string(),
                _ => "Even money, even keel.".to_string(),
            }
        } else if net > rust_decimal::Decimal::ZERO {
            format!("{} {} returned.", WIN_LINES[pick % WIN_LINES.len()], outcome.total_return)
        } else {
            LOSS_LINES[pick % LOSS_LINES.len()].to_string()
        };
        Ok(text)
    }
}
