//! # engine::insights
//!
//! Derives the analytics page's short observations from the journal.

use std::collections::HashSet;

use crate::engine::stats::{basic, breakdown};
use crate::models::{Insight, InsightKind, Trade, TradeType};

/// At most three insights, in a fixed order: overall performance, most
/// profitable pair, better direction. Empty journal → none.
pub fn generate(trades: &[Trade]) -> Vec<Insight> {
    if trades.is_empty() {
        return Vec::new();
    }

    let summary = basic::calculate(trades);
    let mut insights = vec![Insight::new(InsightKind::Performance {
        positive: summary.net_profit > 0.0,
        win_rate: summary.win_rate,
    })];

    // ties go to the pair that appears first in `trades`
    let by_pair = breakdown::by_pair(trades);
    let mut seen = HashSet::new();
    let mut top_pair: Option<(&str, f64)> = None;
    for trade in trades {
        let pair = trade.currency_pair.as_str();
        if !seen.insert(pair) {
            continue;
        }
        let profit = by_pair.get(pair).map_or(0.0, |entry| entry.profit);
        if top_pair.map_or(true, |(_, best)| profit > best) {
            top_pair = Some((pair, profit));
        }
    }
    if let Some((pair, profit)) = top_pair {
        if profit > 0.0 {
            insights.push(Insight::new(InsightKind::TopPair { pair: pair.to_string() }));
        }
    }

    let net_for = |direction: TradeType| -> f64 {
        trades
            .iter()
            .filter(|t| t.trade_type == direction)
            .map(|t| t.amount)
            .sum()
    };
    let buy = net_for(TradeType::Buy);
    let sell = net_for(TradeType::Sell);
    let (direction, best) = if buy > sell {
        (TradeType::Buy, buy)
    } else {
        (TradeType::Sell, sell)
    };
    if best > 0.0 {
        insights.push(Insight::new(InsightKind::BestDirection { direction }));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::test_support::{day, make_trade_on};
    use crate::models::{InsightIcon, InsightTone};

    #[test]
    fn test_empty_journal_has_no_insights() {
        assert!(generate(&[]).is_empty());
    }

    #[test]
    fn test_positive_journal() {
        let mut sell = make_trade_on("USD/JPY", 30.0, day(2));
        sell.trade_type = TradeType::Sell;
        let trades = [
            make_trade_on("EUR/USD", 120.0, day(1)),
            make_trade_on("EUR/USD", -20.0, day(1)),
            sell,
        ];

        let insights = generate(&trades);
        assert_eq!(insights.len(), 3);

        assert_eq!(insights[0].icon, InsightIcon::TrendingUp);
        assert_eq!(insights[0].tone, InsightTone::Positive);
        assert_eq!(insights[0].text, "Overall positive performance with 66.7% win rate.");

        assert_eq!(insights[1].kind, InsightKind::TopPair { pair: "EUR/USD".into() });
        assert_eq!(insights[1].text, "EUR/USD is your most profitable currency pair.");

        assert_eq!(insights[2].icon, InsightIcon::BarChart);
        assert_eq!(insights[2].text, "Buy trades are performing better than sell trades.");
    }

    #[test]
    fn test_losing_journal_only_reports_performance() {
        let trades = [
            make_trade_on("GBP/USD", -50.0, day(1)),
            make_trade_on("EUR/USD", -10.0, day(2)),
        ];
        let insights = generate(&trades);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].icon, InsightIcon::TrendingDown);
        assert_eq!(insights[0].text, "Overall negative performance with 0.0% win rate.");
    }

    #[test]
    fn test_top_pair_tie_goes_to_first_listed_pair() {
        let trades = [
            make_trade_on("USD/JPY", 40.0, day(2)),
            make_trade_on("AUD/USD", 40.0, day(1)),
            make_trade_on("USD/JPY", -5.0, day(3)),
            make_trade_on("USD/JPY", 5.0, day(4)),
        ];
        assert_eq!(
            generate(&trades)[1].kind,
            InsightKind::TopPair { pair: "USD/JPY".into() }
        );

        let mut reordered = trades.clone();
        reordered.swap(0, 1);
        assert_eq!(
            generate(&reordered)[1].kind,
            InsightKind::TopPair { pair: "AUD/USD".into() }
        );
    }

    #[test]
    fn test_sell_wins_ties_between_directions() {
        // buy == sell → sell side is reported
        let mut sell = make_trade_on("EUR/USD", 10.0, day(2));
        sell.trade_type = TradeType::Sell;
        let trades = [make_trade_on("EUR/USD", 10.0, day(1)), sell];

        let insights = generate(&trades);
        assert_eq!(
            insights.last().map(|i| &i.kind),
            Some(&InsightKind::BestDirection { direction: TradeType::Sell })
        );
    }

    #[test]
    fn test_win_rate_halves_round_up() {
        // 1 win in 16 trades = 6.25%
        let insight = Insight::new(InsightKind::Performance { positive: false, win_rate: 6.25 });
        assert_eq!(insight.text, "Overall negative performance with 6.3% win rate.");
    }

    #[test]
    fn test_serialized_shape() {
        let insight = Insight::new(InsightKind::TopPair { pair: "AUD/USD".into() });
        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(value["kind"], "TOP_PAIR");
        assert_eq!(value["pair"], "AUD/USD");
        assert_eq!(value["icon"], "circle-dollar-sign");
        assert_eq!(value["tone"], "info");
    }
}
