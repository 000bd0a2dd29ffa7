//! Domain models shared across the journal.

pub mod insight;
pub mod trade;

pub use insight::{Insight, InsightIcon, InsightKind, InsightTone};
pub use trade::{
    NewTrade, Strategy, Trade, TradeType, TradeUpdate, ValidationError, CURRENCY_PAIRS,
};
