//! # models::insight
//!
//! Short observations shown on the analytics page. Each [`InsightKind`]
//! carries its own display metadata, resolved once in [`Insight::new`].

use serde::Serialize;

use crate::engine::stats::advanced::round_tenths;
use crate::models::TradeType;

/// Icon the front end renders next to an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightIcon {
    TrendingUp,
    TrendingDown,
    CircleDollarSign,
    BarChart,
}

/// Colour family of the insight badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Positive,
    Negative,
    Info,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    /// Overall net result of the journal.
    Performance { positive: bool, win_rate: f64 },
    /// Pair with the highest summed profit (only when that profit is > 0).
    TopPair { pair: String },
    /// Direction that out-earned the other one.
    BestDirection { direction: TradeType },
}

impl InsightKind {
    pub fn icon(&self) -> InsightIcon {
        match self {
            InsightKind::Performance { positive: true, .. }  => InsightIcon::TrendingUp,
            InsightKind::Performance { positive: false, .. } => InsightIcon::TrendingDown,
            InsightKind::TopPair { .. }                      => InsightIcon::CircleDollarSign,
            InsightKind::BestDirection { .. }                => InsightIcon::BarChart,
        }
    }

    pub fn tone(&self) -> InsightTone {
        match self {
            InsightKind::Performance { positive: true, .. }  => InsightTone::Positive,
            InsightKind::Performance { positive: false, .. } => InsightTone::Negative,
            InsightKind::TopPair { .. }                      => InsightTone::Info,
            InsightKind::BestDirection { .. }                => InsightTone::Highlight,
        }
    }

    pub fn message(&self) -> String {
        match self {
            InsightKind::Performance { positive, win_rate } => format!(
                "Overall {} performance with {:.1}% win rate.",
                if *positive { "positive" } else { "negative" },
                round_tenths(*win_rate)
            ),
            InsightKind::TopPair { pair } => {
                format!("{pair} is your most profitable currency pair.")
            }
            InsightKind::BestDirection { direction } => {
                let (better, worse) = match direction {
                    TradeType::Buy  => ("Buy", "sell"),
                    TradeType::Sell => ("Sell", "buy"),
                };
                format!("{better} trades are performing better than {worse} trades.")
            }
        }
    }
}

/// A fully resolved insight, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(flatten)]
    pub kind: InsightKind,
    pub icon: InsightIcon,
    pub tone: InsightTone,
    pub text: String,
}

impl Insight {
    pub fn new(kind: InsightKind) -> Self {
        Self {
            icon: kind.icon(),
            tone: kind.tone(),
            text: kind.message(),
            kind,
        }
    }
}
