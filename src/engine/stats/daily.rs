//! # engine::stats::daily
//!
//! Per-day profit/loss series behind the "P/L over time" chart.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub trades: usize,
    /// Sum of positive amounts.
    pub profit: f64,
    /// Sum of non-positive amounts (<= 0).
    pub loss: f64,
    pub net: f64,
    /// Running total of `net` up to and including this day.
    pub cumulative: f64,
}

/// Oldest day first; days are cut in `tz`.
pub fn daily_series<Tz: TimeZone>(trades: &[Trade], tz: &Tz) -> Vec<DailyPerformance> {
    let mut days: BTreeMap<NaiveDate, (usize, f64, f64)> = BTreeMap::new();

    for trade in trades {
        let date = trade.date.with_timezone(tz).date_naive();
        let (count, profit, loss) = days.entry(date).or_insert((0, 0.0, 0.0));
        *count += 1;
        if trade.amount > 0.0 {
            *profit += trade.amount;
        } else {
            *loss += trade.amount;
        }
    }

    let mut cumulative = 0.0;
    days.into_iter()
        .map(|(date, (trades, profit, loss))| {
            let net = profit + loss;
            cumulative += net;
            DailyPerformance { date, trades, profit, loss, net, cumulative }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::test_support::{day, make_trade};
    use chrono::Utc;

    #[test]
    fn test_empty_series() {
        assert!(daily_series(&[], &Utc).is_empty());
    }

    #[test]
    fn test_groups_sorts_and_accumulates() {
        let trades = [
            make_trade(80.0, day(3)),
            make_trade(50.0, day(1)),
            make_trade(-20.0, day(1)),
            make_trade(-150.0, day(2)),
        ];
        let series = daily_series(&trades, &Utc);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].trades, 2);
        assert_eq!((series[0].profit, series[0].loss, series[0].net), (50.0, -20.0, 30.0));
        assert_eq!(series[1].cumulative, -120.0);
        assert_eq!(series[2].cumulative, -40.0);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }
}
