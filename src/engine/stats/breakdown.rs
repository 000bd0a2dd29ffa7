//! # engine::stats::breakdown
//!
//! Groups the journal by pair, strategy, calendar month and direction.
//! Every trade lands in exactly one bucket of each grouping.
//!
//! Maps are `BTreeMap`s so the serialized key order never depends on the
//! order trades were supplied in.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::engine::stats::basic::percentage;
use crate::models::{Trade, TradeType};

/// `{count, profit, winRate}` for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub count: usize,
    pub profit: f64,
    pub win_rate: f64,
}

/// Buy-vs-sell comparison, split into the winning and losing sides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionEntry {
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
    /// Sum of positive amounts.
    pub profit_amount: f64,
    /// Absolute sum of negative amounts.
    pub loss_amount: f64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdowns {
    pub trades_by_pair: BTreeMap<String, BreakdownEntry>,
    pub trades_by_strategy: BTreeMap<String, BreakdownEntry>,
    pub monthly_performance: BTreeMap<String, BreakdownEntry>,
    pub trades_by_direction: BTreeMap<String, DirectionEntry>,
}

/// Months are cut in `tz`.
pub fn calculate<Tz: TimeZone>(trades: &[Trade], tz: &Tz) -> Breakdowns {
    Breakdowns {
        trades_by_pair:      by_pair(trades),
        trades_by_strategy:  by_strategy(trades),
        monthly_performance: by_month(trades, tz),
        trades_by_direction: by_direction(trades),
    }
}

// ─── Grouping ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    count: usize,
    wins: usize,
    profit: f64,
}

impl Tally {
    fn add(&mut self, trade: &Trade) {
        self.count += 1;
        self.profit += trade.amount;
        if trade.is_win() {
            self.wins += 1;
        }
    }

    fn finish(&self) -> BreakdownEntry {
        BreakdownEntry {
            count:    self.count,
            profit:   self.profit,
            win_rate: percentage(self.wins, self.count),
        }
    }
}

fn group_by<F>(trades: &[Trade], key: F) -> BTreeMap<String, BreakdownEntry>
where
    F: Fn(&Trade) -> String,
{
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    for trade in trades {
        tallies.entry(key(trade)).or_default().add(trade);
    }
    tallies.into_iter().map(|(k, t)| (k, t.finish())).collect()
}

/// Keyed by the pair exactly as stored.
pub fn by_pair(trades: &[Trade]) -> BTreeMap<String, BreakdownEntry> {
    group_by(trades, |t| t.currency_pair.clone())
}

/// Untagged trades group under `"Unknown"`.
pub fn by_strategy(trades: &[Trade]) -> BTreeMap<String, BreakdownEntry> {
    group_by(trades, |t| t.strategy_key().to_string())
}

/// Keyed by `YYYY-MM` in `tz`.
pub fn by_month<Tz: TimeZone>(trades: &[Trade], tz: &Tz) -> BTreeMap<String, BreakdownEntry> {
    group_by(trades, |t| month_key(&t.date, tz))
}

pub fn month_key<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String {
    let local = date.with_timezone(tz);
    format!("{:04}-{:02}", local.year(), local.month())
}

/// Always reports both `buy` and `sell`, even when one side is empty.
pub fn by_direction(trades: &[Trade]) -> BTreeMap<String, DirectionEntry> {
    [TradeType::Buy, TradeType::Sell]
        .into_iter()
        .map(|direction| {
            let mut entry = DirectionEntry::default();
            for trade in trades.iter().filter(|t| t.trade_type == direction) {
                entry.count += 1;
                if trade.is_win() {
                    entry.wins += 1;
                    entry.profit_amount += trade.amount;
                } else {
                    entry.losses += 1;
                    if trade.amount < 0.0 {
                        entry.loss_amount += trade.amount.abs();
                    }
                }
            }
            entry.win_rate = percentage(entry.wins, entry.count);
            (direction.as_str().to_string(), entry)
        })
        .collect()
}
