use std::io;

use crate::settlement::RoundOutcome;
use crate::statistics::PnlPoint;

/// Write one CSV row per round.
pub fn write_history<W: io::Write>(writer: W, history: &[RoundOutcome]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "round", "winner", "player_score", "banker_score", "player_pair", "banker_pair",
        "total_staked", "total_return", "net", "balance_after", "player_cards", "banker_cards", "timestamp",
    ])?;
    for (n, o) in history.iter().enumerate() {
        wtr.write_record([
            (n + 1).to_string(),
            o.winner.to_string(),
            o.player_score.to_string(),
            o.banker_score.to_string(),
            o.is_player_pair.to_string(),
            o.is_banker_pair.to_string(),
            o.total_staked.to_string(),
            o.total_return.to_string(),
            o.net_profit().to_string(),
            o.balance_after.to_string(),
            cards_text(&o.player_hand.cards),
            cards_text(&o.banker_hand.cards),
            o.timestamp.to_rfc3339(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the cumulative PnL series, including the zero starting point.
pub fn write_pnl<W: io::Write>(writer: W, pnl: &[PnlPoint]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["round", "pnl"])?;
    for point in pnl {
        wtr.write_record([point.round.to_string(), point.cumulative.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Bead plate of winners, e.g. "PBBTP". Pairs are marked with a trailing lowercase p/b.
pub fn bead_plate(history: &[RoundOutcome]) -> String {
    let mut plate = String::with_capacity(history.len() * 2);
    for o in history {
        plate.push(o.winner.bead());
        if o.is_player_pair {
            plate.push('p');
        }
        if o.is_banker_pair {
            plate.push('b');
        }
    }
    plate
}

fn cards_text(cards: &[crate::types::Card]) -> String {
    cards.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}
