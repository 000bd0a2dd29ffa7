//! # engine::stats::sequence
//!
//! Win/loss streaks and the single largest win and loss.
//!
//! Streaks are scanned newest → oldest. The sort is stable, so trades with
//! identical timestamps keep their input order.

use serde::Serialize;

use crate::engine::stats::newest_first;
use crate::models::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceStats {
    pub consecutive_wins: usize,
    pub consecutive_losses: usize,
    pub largest_win: f64,
    /// Absolute value of the most negative non-winning amount.
    pub largest_loss: f64,
}

pub fn calculate(trades: &[Trade]) -> SequenceStats {
    let mut current_wins   = 0_usize;
    let mut current_losses = 0_usize;
    let mut max_wins       = 0_usize;
    let mut max_losses     = 0_usize;

    for trade in newest_first(trades) {
        if trade.is_win() {
            current_wins += 1;
            current_losses = 0;
            max_wins = max_wins.max(current_wins);
        } else {
            current_losses += 1;
            current_wins = 0;
            max_losses = max_losses.max(current_losses);
        }
    }

    let largest_win = trades
        .iter()
        .filter(|t| t.is_win())
        .map(|t| t.amount)
        .reduce(f64::max)
        .unwrap_or(0.0);

    let largest_loss = trades
        .iter()
        .filter(|t| !t.is_win())
        .map(|t| t.amount)
        .reduce(f64::min)
        .map(f64::abs)
        .unwrap_or(0.0);

    SequenceStats {
        consecutive_wins:   max_wins,
        consecutive_losses: max_losses,
        largest_win,
        largest_loss,
    }
}
