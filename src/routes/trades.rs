//! # routes::trades
//!
//! Journal CRUD.
//!
//! | Method | Path              | Description                 |
//! |--------|-------------------|-----------------------------|
//! | GET    | `/api/trades`     | All trades, newest first    |
//! | POST   | `/api/trades`     | Record a closed trade       |
//! | DELETE | `/api/trades`     | Clear the whole journal     |
//! | GET    | `/api/trades/:id` | One trade                   |
//! | PATCH  | `/api/trades/:id` | Partial edit                |
//! | DELETE | `/api/trades/:id` | Remove one trade            |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::AppError,
    events::JournalEvent,
    models::{NewTrade, TradeUpdate},
    state::SharedState,
};

// ─── Collection ───────────────────────────────────────────────────────────────

pub async fn list_trades(
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let trades = state.store.list().await;
    Json(json!({
        "ok":     true,
        "count":  trades.len(),
        "trades": trades,
    }))
}

pub async fn create_trade(
    State(state): State<SharedState>,
    Json(new_trade): Json<NewTrade>,
) -> Result<impl IntoResponse, AppError> {
    let trade = state.store.create(new_trade).await?;

    state.broadcast(&JournalEvent::TradeAdded {
        trade: Box::new(trade.clone()),
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "ok":    true,
            "trade": trade,
        })),
    ))
}

/// "Clear Data": drops every trade in one step.
pub async fn clear_trades(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.store.clear().await?;
    state.broadcast(&JournalEvent::JournalCleared { removed });

    Ok(Json(json!({
        "ok":      true,
        "removed": removed,
    })))
}

// ─── Single trade ─────────────────────────────────────────────────────────────

pub async fn get_trade(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let trade = state.store.get(id).await?;
    Ok(Json(json!({ "ok": true, "trade": trade })))
}

pub async fn update_trade(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TradeUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let trade = state.store.update(id, update).await?;

    state.broadcast(&JournalEvent::TradeUpdated {
        trade: Box::new(trade.clone()),
    });

    Ok(Json(json!({ "ok": true, "trade": trade })))
}

pub async fn delete_trade(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let removed = state.store.delete(id).await?;

    state.broadcast(&JournalEvent::TradeDeleted {
        id,
        currency_pair: removed.currency_pair,
    });

    Ok(Json(json!({
        "ok": true,
        "id": id,
    })))
}
