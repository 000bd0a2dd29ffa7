//! # engine::stats::basic
//!
//! Counts, sums and rates. Insensitive to input order.

use serde::Serialize;

use crate::models::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Sum of winning amounts (>= 0).
    pub total_profit: f64,
    /// Absolute sum of non-winning amounts (>= 0).
    pub total_loss: f64,
    /// Sum of every amount.
    pub net_profit: f64,
    /// Percentage, 0 for an empty journal.
    pub win_rate: f64,
    pub avg_profit: f64,
    pub avg_loss: f64,
}

pub fn calculate(trades: &[Trade]) -> BasicStats {
    let mut winning_trades = 0_usize;
    let mut losing_trades  = 0_usize;
    let mut profit_sum     = 0.0_f64;
    let mut loss_sum       = 0.0_f64;
    let mut net_profit     = 0.0_f64;

    for trade in trades {
        if trade.is_win() {
            winning_trades += 1;
            profit_sum += trade.amount;
        } else {
            losing_trades += 1;
            loss_sum += trade.amount;
        }
        net_profit += trade.amount;
    }

    let total_trades = trades.len();
    let total_profit = profit_sum;
    let total_loss   = loss_sum.abs();

    BasicStats {
        total_trades,
        winning_trades,
        losing_trades,
        total_profit,
        total_loss,
        net_profit,
        win_rate:   percentage(winning_trades, total_trades),
        avg_profit: if winning_trades > 0 { total_profit / winning_trades as f64 } else { 0.0 },
        avg_loss:   if losing_trades > 0 { total_loss / losing_trades as f64 } else { 0.0 },
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::test_support::{day, make_trade};

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(calculate(&[]), BasicStats::default());
    }

    #[test]
    fn test_single_winner() {
        let stats = calculate(&[make_trade(100.0, day(1))]);
        assert_eq!(stats.winning_trades, 1);
        assert_eq!(stats.losing_trades, 0);
        assert_eq!(stats.win_rate, 100.0);
        assert_eq!(stats.total_loss, 0.0);
        assert_eq!(stats.avg_loss, 0.0);
        assert_eq!(stats.avg_profit, 100.0);
    }

    #[test]
    fn test_mixed_same_day() {
        let trades = [make_trade(50.0, day(1)), make_trade(-20.0, day(1))];
        let stats = calculate(&trades);
        assert_eq!(stats.net_profit, 30.0);
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.total_profit, 50.0);
        assert_eq!(stats.total_loss, 20.0);
    }

    #[test]
    fn test_break_even_counts_as_loss() {
        let trades = [
            make_trade(0.0, day(1)),
            make_trade(30.0, day(2)),
            make_trade(-10.0, day(3)),
        ];
        let stats = calculate(&trades);
        assert_eq!(stats.winning_trades, 1);
        assert_eq!(stats.losing_trades, 2);
        assert_eq!(stats.total_loss, 10.0);
        assert_eq!(stats.avg_loss, 5.0);
        assert_eq!(stats.winning_trades + stats.losing_trades, stats.total_trades);
    }
}
