//! # store
//!
//! The journal's **in-memory trade store**, the one owner of the trade list.
//!
//! ## Consistency
//!
//! Every mutation is computed on a copy of the list, persisted (when a
//! snapshot file is configured), and only then swapped in under the write
//! lock. A failed validation or a failed write leaves the previous list
//! untouched.
//!
//! ## Persistence
//!
//! Optional. With `JOURNAL_DATA_PATH` set, the full list is written as a
//! [`JournalSnapshot`](crate::export::JournalSnapshot) after each change,
//! via a temp file + rename.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::export;
use crate::models::{NewTrade, Trade, TradeUpdate, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("trade {0} not found")]
    NotFound(Uuid),

    #[error("invalid trade: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to persist journal: {0:#}")]
    Persist(#[from] anyhow::Error),
}

pub struct TradeStore {
    trades: RwLock<Vec<Trade>>,
    snapshot_path: Option<PathBuf>,
}

impl TradeStore {
    /// Volatile store; contents are lost at shutdown.
    pub fn in_memory() -> Self {
        Self::with_trades(Vec::new(), None)
    }

    fn with_trades(trades: Vec<Trade>, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            trades: RwLock::new(trades),
            snapshot_path,
        }
    }

    /// Load the journal from `path`. A missing file starts an empty journal;
    /// a corrupt one is an error and is left on disk untouched.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        let trades = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => export::parse_json(&raw)
                .with_context(|| format!("failed to load journal from {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No journal file yet, starting empty");
                Vec::new()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        info!(path = %path.display(), trades = trades.len(), "📒 Journal loaded");
        Ok(Self::with_trades(trades, Some(path)))
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    // ─── Reads ────────────────────────────────────────────────────────────────

    /// All trades, newest first.
    pub async fn list(&self) -> Vec<Trade> {
        let mut trades = self.trades.read().await.clone();
        trades.sort_by(|a, b| b.date.cmp(&a.date));
        trades
    }

    pub async fn len(&self) -> usize {
        self.trades.read().await.len()
    }

    pub async fn get(&self, id: Uuid) -> Result<Trade, StoreError> {
        self.trades
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    // ─── Mutations ────────────────────────────────────────────────────────────

    pub async fn create(&self, new_trade: NewTrade) -> Result<Trade, StoreError> {
        let trade = new_trade.into_trade(Uuid::new_v4(), Utc::now())?;

        let mut guard = self.trades.write().await;
        let mut next = guard.clone();
        next.push(trade.clone());
        self.commit(&mut guard, next).await?;

        info!(id = %trade.id, pair = %trade.currency_pair, amount = trade.amount, "➕ Trade added");
        Ok(trade)
    }

    pub async fn update(&self, id: Uuid, update: TradeUpdate) -> Result<Trade, StoreError> {
        let mut guard = self.trades.write().await;
        let index = guard
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let updated = guard[index].merged(&update)?;
        let mut next = guard.clone();
        next[index] = updated.clone();
        self.commit(&mut guard, next).await?;

        info!(id = %id, pair = %updated.currency_pair, "✏️ Trade updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Trade, StoreError> {
        let mut guard = self.trades.write().await;
        let index = guard
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut next = guard.clone();
        let removed = next.remove(index);
        self.commit(&mut guard, next).await?;

        info!(id = %id, pair = %removed.currency_pair, "🗑️ Trade deleted");
        Ok(removed)
    }

    /// Remove every trade; returns how many were dropped.
    pub async fn clear(&self) -> Result<usize, StoreError> {
        let mut guard = self.trades.write().await;
        let removed = guard.len();
        self.commit(&mut guard, Vec::new()).await?;

        info!(removed, "🧹 Journal cleared");
        Ok(removed)
    }

    /// Swap the whole journal for an already-validated list (import).
    pub async fn replace_all(&self, trades: Vec<Trade>) -> Result<usize, StoreError> {
        for trade in &trades {
            trade.validate()?;
        }

        let count = trades.len();
        let mut guard = self.trades.write().await;
        self.commit(&mut guard, trades).await?;

        info!(count, "📥 Journal replaced");
        Ok(count)
    }

    /// Write the current list to the snapshot file, if any.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let guard = self.trades.read().await;
        self.persist(&guard).await?;
        Ok(())
    }

    // ─── Internals ────────────────────────────────────────────────────────────

    async fn commit(&self, current: &mut Vec<Trade>, next: Vec<Trade>) -> Result<(), StoreError> {
        self.persist(&next).await?;
        *current = next;
        Ok(())
    }

    async fn persist(&self, trades: &[Trade]) -> anyhow::Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let body = export::to_json(trades).context("failed to serialize journal")?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .with_context(|| format!("failed to replace {}", path.display()))?;

        debug!(path = %path.display(), trades = trades.len(), "Journal snapshot written");
        Ok(())
    }
}
