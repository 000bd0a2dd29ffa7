//! # export
//!
//! Serialization of the journal for the outside world.
//!
//! * **CSV**: one row per trade, fixed column order, text fields quoted
//!   with embedded quotes doubled.
//! * **JSON snapshot**: the full trade list wrapped in a versioned envelope.
//!   The same format backs the store's on-disk file.
//!
//! Import is all-or-nothing: the whole document is parsed and every trade
//! validated before a single one is handed back.

use std::collections::HashSet;
use std::io;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Trade, ValidationError};

pub const CSV_HEADERS: [&str; 9] = [
    "Currency Pair",
    "Type",
    "Entry Price",
    "Exit Price",
    "Lot Size",
    "Profit/Loss ($)",
    "Strategy",
    "Notes",
    "Date",
];

/// Current snapshot envelope version.
pub const SNAPSHOT_VERSION: u32 = 1;

// ─── CSV ──────────────────────────────────────────────────────────────────────

pub fn write_csv<W: io::Write>(trades: &[Trade], writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for trade in trades {
        wtr.write_record([
            trade.currency_pair.clone(),
            trade.trade_type.to_string(),
            trade.entry_price.to_string(),
            trade.exit_price.to_string(),
            trade.lot_size.to_string(),
            trade.amount.to_string(),
            trade.strategy.map(|s| s.as_str().to_string()).unwrap_or_default(),
            trade.notes.clone(),
            trade.date.to_rfc3339_opts(SecondsFormat::Secs, true),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(trades: &[Trade]) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_csv(trades, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

// ─── JSON snapshot ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub trades: Vec<Trade>,
}

pub fn to_json(trades: &[Trade]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JournalSnapshot {
        version:     SNAPSHOT_VERSION,
        exported_at: Utc::now(),
        trades:      trades.to_vec(),
    })
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed journal file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported journal version {0}")]
    UnsupportedVersion(u32),

    #[error("trade #{index} ({id}) is invalid: {source}")]
    InvalidTrade {
        index: usize,
        id: Uuid,
        #[source]
        source: ValidationError,
    },

    #[error("duplicate trade id {0}")]
    DuplicateId(Uuid),
}

/// Accepts either a [`JournalSnapshot`] or a bare array of trades.
pub fn parse_json(input: &str) -> Result<Vec<Trade>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(input)?;

    let trades: Vec<Trade> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        let snapshot: JournalSnapshot = serde_json::from_value(value)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ImportError::UnsupportedVersion(snapshot.version));
        }
        snapshot.trades
    };

    let mut seen = HashSet::with_capacity(trades.len());
    for (index, trade) in trades.iter().enumerate() {
        trade
            .validate()
            .map_err(|source| ImportError::InvalidTrade { index, id: trade.id, source })?;
        if !seen.insert(trade.id) {
            return Err(ImportError::DuplicateId(trade.id));
        }
    }

    Ok(trades)
}
