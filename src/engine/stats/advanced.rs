//! # engine::stats::advanced
//!
//! Risk and return metrics layered on top of [`BasicStats`].
//!
//! | Metric              | Rule                                                     |
//! |---------------------|----------------------------------------------------------|
//! | profit factor       | profit / loss; `+∞` with no loss but some profit; else 0 |
//! | risk/reward         | avg profit / avg loss, `None` when avg loss is 0         |
//! | trade frequency     | trades / max(1, round(days spanned)), needs ≥ 2 trades   |
//! | max drawdown        | peak − balance over the oldest → newest running balance  |
//! | Sharpe ratio        | mean / sample stddev of UTC daily sums, risk-free = 0    |
//! | expectancy          | p(win)·avg profit − p(loss)·avg loss                     |

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::engine::stats::{basic::BasicStats, oldest_first};
use crate::models::Trade;

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedStats {
    #[serde(serialize_with = "serialize_ratio")]
    pub profit_factor: f64,
    pub risk_reward_ratio: Option<f64>,
    pub average_trade_return: f64,
    pub median_trade_return: f64,
    /// Trades per day; `None` with fewer than two trades.
    #[serde(serialize_with = "serialize_frequency")]
    pub trade_frequency: Option<f64>,
    pub max_drawdown: f64,
    pub max_drawdown_percentage: f64,
    pub sharpe_ratio: f64,
    pub expectancy: f64,
}

impl AdvancedStats {
    /// `"<x.x> trades/day"` or `"N/A"`.
    pub fn trade_frequency_label(&self) -> String {
        format_trade_frequency(self.trade_frequency)
    }
}

pub fn calculate(trades: &[Trade], basic: &BasicStats) -> AdvancedStats {
    let chronological = oldest_first(trades);
    let drawdown = max_drawdown(chronological.iter().map(|t| t.amount));
    let amounts: Vec<f64> = trades.iter().map(|t| t.amount).collect();

    AdvancedStats {
        profit_factor:           profit_factor(basic.total_profit, basic.total_loss),
        risk_reward_ratio:       risk_reward_ratio(basic.avg_profit, basic.avg_loss),
        average_trade_return:    if basic.total_trades > 0 {
            basic.net_profit / basic.total_trades as f64
        } else {
            0.0
        },
        median_trade_return:     median(&amounts),
        trade_frequency:         trades_per_day(trades),
        max_drawdown:            drawdown.amount,
        max_drawdown_percentage: drawdown.percentage,
        sharpe_ratio:            sharpe_ratio(&daily_returns(&chronological)),
        expectancy:              expectancy(basic.win_rate, basic.avg_profit, basic.avg_loss),
    }
}

// ─── Ratios ───────────────────────────────────────────────────────────────────

pub fn profit_factor(total_profit: f64, total_loss: f64) -> f64 {
    if total_loss > 0.0 {
        total_profit / total_loss
    } else if total_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

pub fn risk_reward_ratio(avg_profit: f64, avg_loss: f64) -> Option<f64> {
    (avg_loss > 0.0).then(|| avg_profit / avg_loss)
}

pub fn expectancy(win_rate: f64, avg_profit: f64, avg_loss: f64) -> f64 {
    (win_rate / 100.0) * avg_profit - ((100.0 - win_rate) / 100.0) * avg_loss
}

// ─── Distribution ─────────────────────────────────────────────────────────────

/// Middle value; mean of the two middle values for even lengths; 0 if empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

// ─── Frequency ────────────────────────────────────────────────────────────────

pub fn trades_per_day(trades: &[Trade]) -> Option<f64> {
    if trades.len() < 2 {
        return None;
    }

    let oldest = trades.iter().map(|t| t.date).min()?;
    let newest = trades.iter().map(|t| t.date).max()?;
    let span_days = ((newest - oldest).num_milliseconds() as f64 / MS_PER_DAY).round();

    Some(trades.len() as f64 / span_days.max(1.0))
}

/// Round to one decimal with halves going away from zero (`1.25` → `1.3`).
/// `{:.1}` alone would send exact halves to the even digit.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn format_trade_frequency(trades_per_day: Option<f64>) -> String {
    match trades_per_day {
        Some(rate) => format!("{:.1} trades/day", round_tenths(rate)),
        None => "N/A".to_string(),
    }
}

// ─── Drawdown ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Drawdown {
    pub amount: f64,
    /// Relative to the peak in force when the maximum was observed.
    pub percentage: f64,
}

/// Walk `amounts` in the given (chronological) order as a running balance
/// starting at 0.
pub fn max_drawdown(amounts: impl IntoIterator<Item = f64>) -> Drawdown {
    let mut balance = 0.0_f64;
    let mut peak    = 0.0_f64;
    let mut worst   = Drawdown::default();

    for amount in amounts {
        balance += amount;
        if balance > peak {
            peak = balance;
        }

        let drawdown = peak - balance;
        if drawdown > worst.amount {
            worst = Drawdown {
                amount:     drawdown,
                percentage: if peak > 0.0 { drawdown / peak * 100.0 } else { 0.0 },
            };
        }
    }

    worst
}

// ─── Sharpe ───────────────────────────────────────────────────────────────────

/// Summed amount per UTC calendar day, in date order.
pub fn daily_returns(trades: &[&Trade]) -> Vec<f64> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for trade in trades {
        *by_day.entry(trade.date.date_naive()).or_insert(0.0) += trade.amount;
    }
    by_day.into_values().collect()
}

/// `mean / sample stddev`, 0 with fewer than two returns or zero deviation.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    if std_dev == 0.0 { 0.0 } else { mean / std_dev }
}

// ─── Serde helpers ────────────────────────────────────────────────────────────

/// JSON has no infinity; emit it as a string the front end can special-case.
fn serialize_ratio<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_frequency<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_trade_frequency(*value))
}
