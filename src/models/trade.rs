//! # models::trade
//!
//! Defines [`Trade`], the one durable entity in the journal, together with
//! the payloads used to create ([`NewTrade`]) and partially edit
//! ([`TradeUpdate`]) it.
//!
//! `amount` (realized P/L in account currency) is the single source of truth
//! for every statistic. Pip figures are derived on demand through
//! [`crate::engine::pip`] and never stored next to it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Currency pairs offered by the trade form.
pub const CURRENCY_PAIRS: [&str; 12] = [
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF",
    "USD/CAD", "AUD/USD", "NZD/USD", "EUR/GBP",
    "EUR/JPY", "GBP/JPY", "AUD/JPY", "EUR/AUD",
];

/// Breakdown label for trades recorded without a strategy.
pub const UNKNOWN_STRATEGY: &str = "Unknown";

// ─── TradeType ────────────────────────────────────────────────────────────────

/// Direction of the trade. Decides the sign convention for pip deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "buy",
            TradeType::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Strategy ─────────────────────────────────────────────────────────────────

/// The fixed strategy vocabulary a trade can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    TrendFollowing,
    Breakout,
    MeanReversion,
    Fibonacci,
    SupportResistance,
    PriceAction,
    Momentum,
    Scalping,
    Swing,
    Position,
}

impl Strategy {
    pub const ALL: [Strategy; 10] = [
        Strategy::TrendFollowing,
        Strategy::Breakout,
        Strategy::MeanReversion,
        Strategy::Fibonacci,
        Strategy::SupportResistance,
        Strategy::PriceAction,
        Strategy::Momentum,
        Strategy::Scalping,
        Strategy::Swing,
        Strategy::Position,
    ];

    /// Stored tag, also used as the breakdown key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::TrendFollowing    => "trend_following",
            Strategy::Breakout          => "breakout",
            Strategy::MeanReversion     => "mean_reversion",
            Strategy::Fibonacci         => "fibonacci",
            Strategy::SupportResistance => "support_resistance",
            Strategy::PriceAction       => "price_action",
            Strategy::Momentum          => "momentum",
            Strategy::Scalping          => "scalping",
            Strategy::Swing             => "swing",
            Strategy::Position          => "position",
        }
    }

    /// Human-readable name shown by the form.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::TrendFollowing    => "Trend Following",
            Strategy::Breakout          => "Breakout",
            Strategy::MeanReversion     => "Mean Reversion",
            Strategy::Fibonacci         => "Fibonacci Retracement",
            Strategy::SupportResistance => "Support and Resistance",
            Strategy::PriceAction       => "Price Action",
            Strategy::Momentum          => "Momentum",
            Strategy::Scalping          => "Scalping",
            Strategy::Swing             => "Swing Trading",
            Strategy::Position          => "Position Trading",
        }
    }
}

impl FromStr for Strategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStrategy(s.to_string()))
    }
}

/// Empty or missing tag means "no strategy".
fn parse_strategy(raw: Option<&str>) -> Result<Option<Strategy>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(tag) => tag.parse().map(Some),
    }
}

// ─── Validation ───────────────────────────────────────────────────────────────

/// Rejected trade input. Values are never coerced into range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("currency pair is required")]
    EmptyCurrencyPair,

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(())
}

// ─── Trade ────────────────────────────────────────────────────────────────────

/// A single journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    pub currency_pair: String,
    pub trade_type: TradeType,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Position size in lots (1.0 = 100,000 units of base currency).
    pub lot_size: f64,
    /// Realized profit/loss in account currency.
    pub amount: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub strategy: Option<Strategy>,
    pub date: DateTime<Utc>,
}

impl Trade {
    /// `amount > 0`. Break-even trades count as non-winning.
    #[inline]
    pub fn is_win(&self) -> bool {
        self.amount > 0.0
    }

    /// Key used by the strategy breakdown.
    pub fn strategy_key(&self) -> &'static str {
        self.strategy.map(|s| s.as_str()).unwrap_or(UNKNOWN_STRATEGY)
    }

    /// Check every field invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.currency_pair.trim().is_empty() {
            return Err(ValidationError::EmptyCurrencyPair);
        }
        require_positive("entryPrice", self.entry_price)?;
        require_positive("exitPrice", self.exit_price)?;
        require_positive("lotSize", self.lot_size)?;
        if !self.amount.is_finite() {
            return Err(ValidationError::NonFinite { field: "amount" });
        }
        Ok(())
    }

    /// Merge a partial update into a copy of this trade and re-validate it.
    /// `self` is left untouched, so a rejected edit never leaks into state.
    pub fn merged(&self, update: &TradeUpdate) -> Result<Trade, ValidationError> {
        let mut next = self.clone();

        if let Some(pair) = &update.currency_pair { next.currency_pair = pair.clone(); }
        if let Some(kind) = update.trade_type     { next.trade_type = kind; }
        if let Some(v) = update.entry_price       { next.entry_price = v; }
        if let Some(v) = update.exit_price        { next.exit_price = v; }
        if let Some(v) = update.lot_size          { next.lot_size = v; }
        if let Some(v) = update.amount            { next.amount = v; }
        if let Some(notes) = &update.notes        { next.notes = notes.clone(); }
        if let Some(date) = update.date           { next.date = date; }
        if let Some(tag) = &update.strategy {
            next.strategy = parse_strategy(tag.as_deref())?;
        }

        next.validate()?;
        Ok(next)
    }
}

// ─── NewTrade ─────────────────────────────────────────────────────────────────

/// Payload for the "add trade" action. `id` is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub currency_pair: String,
    pub trade_type: TradeType,
    pub entry_price: f64,
    pub exit_price: f64,
    pub lot_size: f64,
    pub amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    /// Defaults to submission time.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl NewTrade {
    pub fn into_trade(self, id: Uuid, now: DateTime<Utc>) -> Result<Trade, ValidationError> {
        let trade = Trade {
            id,
            currency_pair: self.currency_pair,
            trade_type:    self.trade_type,
            entry_price:   self.entry_price,
            exit_price:    self.exit_price,
            lot_size:      self.lot_size,
            amount:        self.amount,
            notes:         self.notes.unwrap_or_default(),
            strategy:      parse_strategy(self.strategy.as_deref())?,
            date:          self.date.unwrap_or(now),
        };
        trade.validate()?;
        Ok(trade)
    }
}

// ─── TradeUpdate ──────────────────────────────────────────────────────────────

/// Partial edit. Absent fields keep their current value; `"strategy": null`
/// or `""` clears the tag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeUpdate {
    pub currency_pair: Option<String>,
    pub trade_type: Option<TradeType>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub lot_size: Option<f64>,
    pub amount: Option<f64>,
    pub notes: Option<String>,
    /// Outer `None` = field absent, `Some(None)` = explicit null.
    #[serde(default, deserialize_with = "present")]
    pub strategy: Option<Option<String>>,
    pub date: Option<DateTime<Utc>>,
}

/// Wraps whatever was sent, `null` included, so presence survives.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
