//! # routes::stats
//!
//! Read-only analytics. Every call recomputes from the current journal.
//!
//! | Method | Path               | Description                       |
//! |--------|--------------------|-----------------------------------|
//! | GET    | `/api/stats`       | Full [`TradeStatistics`] object   |
//! | GET    | `/api/stats/daily` | Per-day P/L with cumulative total |
//! | GET    | `/api/insights`    | Up to three short observations    |
//!
//! [`TradeStatistics`]: crate::engine::stats::TradeStatistics

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::{engine::insights, state::SharedState};

pub async fn get_stats(
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let trades = state.store.list().await;
    let stats = state.statistics(&trades);

    Json(json!({
        "ok":    true,
        "stats": stats,
    }))
}

pub async fn get_daily(
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let trades = state.store.list().await;
    let days = state.daily(&trades);

    Json(json!({
        "ok":   true,
        "days": days,
    }))
}

pub async fn get_insights(
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let trades = state.store.list().await;

    Json(json!({
        "ok":       true,
        "insights": insights::generate(&trades),
    }))
}
