//! # routes::tools
//!
//! Helpers for the trade form plus the liveness probe.
//!
//! | Method | Path                        | Description                          |
//! |--------|-----------------------------|--------------------------------------|
//! | GET    | `/api/health`               | Liveness + trade count               |
//! | GET    | `/api/meta`                 | Strategy vocabulary, pairs, pip table |
//! | POST   | `/api/tools/pip-calculator` | Pips and $ estimate for a trade      |

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    models::{trade::require_positive, Strategy, TradeType, ValidationError, CURRENCY_PAIRS},
    state::SharedState,
};

/// GET /api/health
pub async fn health_check(
    State(state): State<SharedState>,
) -> impl IntoResponse {
    Json(json!({
        "ok":         true,
        "service":    "fx-journal",
        "trades":     state.store.len().await,
        "persistent": state.store.snapshot_path().is_some(),
    }))
}

/// GET /api/meta: everything the form needs to render its dropdowns.
pub async fn get_meta(
    State(state): State<SharedState>,
) -> impl IntoResponse {
    let strategies: Vec<_> = Strategy::ALL
        .iter()
        .map(|s| json!({ "value": s.as_str(), "label": s.label() }))
        .collect();

    Json(json!({
        "ok":            true,
        "strategies":    strategies,
        "currencyPairs": CURRENCY_PAIRS,
        "pipValues":     {
            "rules":        state.pip_values.rules(),
            "defaultValue": state.pip_values.default_value(),
        },
    }))
}

// ─── Pip calculator ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipCalculatorRequest {
    pub currency_pair: String,
    pub trade_type: TradeType,
    pub entry_price: f64,
    pub exit_price: f64,
    pub lot_size: f64,
}

impl PipCalculatorRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.currency_pair.trim().is_empty() {
            return Err(ValidationError::EmptyCurrencyPair);
        }
        require_positive("entryPrice", self.entry_price)?;
        require_positive("exitPrice", self.exit_price)?;
        require_positive("lotSize", self.lot_size)
    }
}

/// POST /api/tools/pip-calculator
pub async fn pip_calculator(
    State(state): State<SharedState>,
    Json(req): Json<PipCalculatorRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let estimate = state.pip_values.estimate(
        req.entry_price,
        req.exit_price,
        req.lot_size,
        req.trade_type,
        req.currency_pair.trim(),
    );

    Ok(Json(json!({
        "ok":       true,
        "estimate": estimate,
    })))
}
