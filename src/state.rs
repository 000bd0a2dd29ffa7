//! # state
//!
//! [`AppState`]: everything a handler needs, shared as `Arc<AppState>`.

use std::sync::Arc;

use chrono::{FixedOffset, Local};
use tokio::sync::broadcast;

use crate::config::Config;
use crate::engine::pip::PipValueTable;
use crate::engine::stats::{daily_series, DailyPerformance, TradeStatistics};
use crate::events::JournalEvent;
use crate::models::Trade;
use crate::store::TradeStore;

// ─── AppState ─────────────────────────────────────────────────────────────────

pub struct AppState {
    // ── Journal ───────────────────────────────────────────────────────────────
    /// Sole owner of the trade list. Handlers go through it, never around it.
    pub store: Arc<TradeStore>,

    // ── Calculation settings ──────────────────────────────────────────────────
    pub pip_values: Arc<PipValueTable>,
    /// Reporting zone for month keys and the daily series.
    /// `None` = the server's local time zone.
    pub reporting_offset: Option<FixedOffset>,

    // ── Journal feed / WebSocket ──────────────────────────────────────────────
    /// Pre-serialized [`JournalEvent`] JSON.
    pub broadcast_tx: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(store: TradeStore, config: &Config) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.event_capacity);

        Self {
            store:            Arc::new(store),
            pip_values:       Arc::new(config.pip_values.clone()),
            reporting_offset: config.utc_offset,
            broadcast_tx,
        }
    }

    // ── Helper Methods ────────────────────────────────────────────────────────

    /// Fan an event out to every `/ws/journal` client. Having no listener is fine.
    pub fn broadcast(&self, event: &JournalEvent) {
        let _ = self.broadcast_tx.send(event.to_json());
    }

    pub fn statistics(&self, trades: &[Trade]) -> TradeStatistics {
        match &self.reporting_offset {
            Some(offset) => TradeStatistics::compute_in(trades, offset),
            None => TradeStatistics::compute(trades),
        }
    }

    pub fn daily(&self, trades: &[Trade]) -> Vec<DailyPerformance> {
        match &self.reporting_offset {
            Some(offset) => daily_series(trades, offset),
            None => daily_series(trades, &Local),
        }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(store: TradeStore, config: &Config) -> SharedState {
    Arc::new(AppState::new(store, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stats::test_support::make_trade;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_reporting_offset_moves_month_boundary() {
        // 23:30 UTC on Jan 31 is already February at UTC+7
        let late = make_trade(10.0, Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap());

        let config = Config { utc_offset: FixedOffset::east_opt(7 * 3600), ..Config::default() };
        let state = build_state(TradeStore::in_memory(), &config);

        let stats = state.statistics(std::slice::from_ref(&late));
        assert!(stats.breakdowns.monthly_performance.contains_key("2024-02"));

        let daily = state.daily(&[late]);
        assert_eq!(daily[0].date.to_string(), "2024-02-01");
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let state = build_state(TradeStore::in_memory(), &Config::default());
        state.broadcast(&JournalEvent::JournalCleared { removed: 0 });

        let mut rx = state.broadcast_tx.subscribe();
        state.broadcast(&JournalEvent::JournalImported { count: 3 });
        let msg = rx.recv().await.unwrap();
        assert!(msg.contains("JOURNAL_IMPORTED"));
    }
}
