//! # routes::export
//!
//! Getting the journal in and out.
//!
//! | Method | Path               | Description                               |
//! |--------|--------------------|-------------------------------------------|
//! | GET    | `/api/export/csv`  | Spreadsheet download                      |
//! | GET    | `/api/export/json` | Versioned snapshot download               |
//! | POST   | `/api/import/json` | Replace the journal from a snapshot/array |

use anyhow::Context;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::{error::AppError, events::JournalEvent, export, state::SharedState};

fn attachment(extension: &str) -> String {
    format!(
        "attachment; filename=\"fx-journal-trades-{}.{extension}\"",
        Utc::now().format("%Y-%m-%d")
    )
}

/// GET /api/export/csv
pub async fn export_csv(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let trades = state.store.list().await;
    let body = export::to_csv_string(&trades).context("failed to build CSV export")?;

    info!(trades = trades.len(), "📤 CSV export");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment("csv")),
        ],
        body,
    ))
}

/// GET /api/export/json
pub async fn export_json(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let trades = state.store.list().await;
    let body = export::to_json(&trades).context("failed to build JSON export")?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, attachment("json")),
        ],
        body,
    ))
}

/// POST /api/import/json. All or nothing: a bad file leaves the journal as it was.
pub async fn import_json(
    State(state): State<SharedState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let trades = export::parse_json(&body)?;
    let count = state.store.replace_all(trades).await?;

    state.broadcast(&JournalEvent::JournalImported { count });

    Ok(Json(json!({
        "ok":       true,
        "imported": count,
    })))
}
