//! # engine::pip
//!
//! **Pip/Value Converter**: price space → pip space → money.
//!
//! ```text
//! entry, exit, direction ──pips()──▶ pip delta
//!                                        │
//! pair ──PipValueTable──▶ $/pip/lot      │
//!                               └──monetary_value()──▶ amount
//! ```
//!
//! Pip values come from a configurable lookup table, not from live FX
//! rates. They are an estimate for the form's auto-calculation; the stored
//! `amount` stays authoritative.

use serde::Serialize;

use crate::models::TradeType;

/// Fallback pip value ($ per pip per standard lot).
pub const DEFAULT_PIP_VALUE: f64 = 10.0;

// ─── Price → Pips ─────────────────────────────────────────────────────────────

/// `0.01` for JPY-quoted pairs, `0.0001` otherwise.
#[inline]
pub fn pip_size(currency_pair: &str) -> f64 {
    if currency_pair.contains("JPY") { 0.01 } else { 0.0001 }
}

/// Signed pip delta. Positive means the trade made money.
pub fn pips(entry_price: f64, exit_price: f64, currency_pair: &str, trade_type: TradeType) -> f64 {
    let delta = match trade_type {
        TradeType::Buy  => exit_price - entry_price,
        TradeType::Sell => entry_price - exit_price,
    };
    delta / pip_size(currency_pair)
}

// ─── Pips → Money ─────────────────────────────────────────────────────────────

/// `lot_size` is in lots (1.0 = standard lot).
#[inline]
pub fn monetary_value(pips: f64, pip_value_per_standard_lot: f64, lot_size: f64) -> f64 {
    pips * pip_value_per_standard_lot * lot_size
}

// ─── Pip Value Table ──────────────────────────────────────────────────────────

/// One lookup rule: pairs containing `pattern` are worth `value` $/pip/lot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipValueRule {
    pub pattern: String,
    pub value: f64,
}

impl PipValueRule {
    pub fn new(pattern: impl Into<String>, value: f64) -> Self {
        Self { pattern: pattern.into(), value }
    }
}

/// Ordered rule list; the first rule whose pattern is a substring of the
/// pair wins, otherwise `default_value` applies.
#[derive(Debug, Clone, PartialEq)]
pub struct PipValueTable {
    rules: Vec<PipValueRule>,
    default_value: f64,
}

impl PipValueTable {
    pub fn new(rules: Vec<PipValueRule>, default_value: f64) -> Self {
        Self { rules, default_value }
    }

    /// Put `overrides` ahead of the existing rules so they take precedence.
    pub fn with_overrides(mut self, overrides: Vec<PipValueRule>) -> Self {
        let mut rules = overrides;
        rules.append(&mut self.rules);
        self.rules = rules;
        self
    }

    pub fn with_default(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn rules(&self) -> &[PipValueRule] {
        &self.rules
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn value_per_standard_lot(&self, currency_pair: &str) -> f64 {
        self.rules
            .iter()
            .find(|rule| currency_pair.contains(rule.pattern.as_str()))
            .map(|rule| rule.value)
            .unwrap_or(self.default_value)
    }

    /// pips → pip value → money, in one go.
    pub fn profit_loss(
        &self,
        entry_price: f64,
        exit_price: f64,
        lot_size: f64,
        trade_type: TradeType,
        currency_pair: &str,
    ) -> f64 {
        self.estimate(entry_price, exit_price, lot_size, trade_type, currency_pair).amount
    }

    /// Every intermediate of the conversion, for the form's live preview.
    pub fn estimate(
        &self,
        entry_price: f64,
        exit_price: f64,
        lot_size: f64,
        trade_type: TradeType,
        currency_pair: &str,
    ) -> PipEstimate {
        let pip_delta = pips(entry_price, exit_price, currency_pair, trade_type);
        let pip_value = self.value_per_standard_lot(currency_pair);

        PipEstimate {
            pips:              pip_delta,
            pip_size:          pip_size(currency_pair),
            pip_value_per_lot: pip_value,
            amount:            monetary_value(pip_delta, pip_value, lot_size),
        }
    }
}

impl Default for PipValueTable {
    fn default() -> Self {
        Self::new(
            vec![
                PipValueRule::new("JPY", 8.30),
                PipValueRule::new("GBP/USD", 10.0),
                PipValueRule::new("EUR/USD", 10.0),
                PipValueRule::new("AUD/USD", 10.0),
                PipValueRule::new("NZD/USD", 10.0),
                PipValueRule::new("USD/CAD", 8.0),
                PipValueRule::new("USD/CHF", 9.30),
            ],
            DEFAULT_PIP_VALUE,
        )
    }
}

/// Result of [`PipValueTable::estimate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipEstimate {
    pub pips: f64,
    pub pip_size: f64,
    pub pip_value_per_lot: f64,
    pub amount: f64,
}
