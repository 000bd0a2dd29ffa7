//! # engine::stats
//!
//! **Trade Statistics Engine**: folds the whole journal into one
//! [`TradeStatistics`] value.
//!
//! ```text
//! &[Trade] ─┬─ basic      (order-free)   ─┐
//!           ├─ sequence   (newest first)  ├─▶ TradeStatistics
//!           ├─ advanced   (oldest first)  │
//!           └─ breakdown  (order-free)   ─┘
//! ```
//!
//! Everything here is pure and synchronous. Statistics are recomputed from
//! scratch on every call; the same input always yields bit-identical output.

pub mod advanced;
pub mod basic;
pub mod breakdown;
pub mod daily;
pub mod sequence;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::models::Trade;

pub use advanced::AdvancedStats;
pub use basic::BasicStats;
pub use breakdown::Breakdowns;
pub use daily::{daily_series, DailyPerformance};
pub use sequence::SequenceStats;

/// Every aggregate the dashboard shows, serialized as one flat object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeStatistics {
    #[serde(flatten)]
    pub basic: BasicStats,
    #[serde(flatten)]
    pub sequence: SequenceStats,
    #[serde(flatten)]
    pub advanced: AdvancedStats,
    #[serde(flatten)]
    pub breakdowns: Breakdowns,
}

impl TradeStatistics {
    /// Months are cut in the machine's local time zone.
    pub fn compute(trades: &[Trade]) -> Self {
        Self::compute_in(trades, &Local)
    }

    pub fn compute_in<Tz: TimeZone>(trades: &[Trade], tz: &Tz) -> Self {
        let basic = basic::calculate(trades);

        Self {
            sequence:   sequence::calculate(trades),
            advanced:   advanced::calculate(trades, &basic),
            breakdowns: breakdown::calculate(trades, tz),
            basic,
        }
    }
}

// ─── Ordering ─────────────────────────────────────────────────────────────────

/// Stable sort by date, oldest first. Input is not modified.
pub(crate) fn oldest_first(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.date);
    sorted
}

/// Stable sort by date, newest first. Input is not modified.
pub(crate) fn newest_first(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
