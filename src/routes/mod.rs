//! # routes
//!
//! HTTP surface of the journal. Success bodies are `{ "ok": true, ... }`,
//! failures go through [`AppError`](crate::error::AppError).
//!
//! ```text
//!  /api/trades[/:id]      ── trades   ──┐
//!  /api/stats, /insights  ── stats    ──┤
//!  /api/tools, /meta      ── tools    ──┼──▶ AppState ── TradeStore
//!  /api/export, /import   ── export   ──┤         └──── broadcast_tx ──┐
//!  /ws/journal            ── monitor  ◀─┴──────────────────────────────┘
//! ```

pub mod export;
pub mod monitor;
pub mod stats;
pub mod tools;
pub mod trades;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Service ───────────────────────────────────────────────────────────
        .route("/api/health",               get(tools::health_check))
        .route("/api/meta",                 get(tools::get_meta))
        // ── Journal ───────────────────────────────────────────────────────────
        .route(
            "/api/trades",
            get(trades::list_trades)
                .post(trades::create_trade)
                .delete(trades::clear_trades),
        )
        .route(
            "/api/trades/:id",
            get(trades::get_trade)
                .patch(trades::update_trade)
                .delete(trades::delete_trade),
        )
        // ── Analytics ─────────────────────────────────────────────────────────
        .route("/api/stats",                get(stats::get_stats))
        .route("/api/stats/daily",          get(stats::get_daily))
        .route("/api/insights",             get(stats::get_insights))
        // ── Tools ─────────────────────────────────────────────────────────────
        .route("/api/tools/pip-calculator", post(tools::pip_calculator))
        // ── Export / Import ───────────────────────────────────────────────────
        .route("/api/export/csv",           get(export::export_csv))
        .route("/api/export/json",          get(export::export_json))
        .route("/api/import/json",          post(export::import_json))
        // ── Live feed ─────────────────────────────────────────────────────────
        .route("/ws/journal",               get(monitor::ws_journal))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::state::build_state;
    use crate::store::TradeStore;

    fn app() -> (Router, SharedState) {
        let state = build_state(TradeStore::in_memory(), &Config::default());
        (router(state.clone()), state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn trade_body(pair: &str, amount: f64, date: &str) -> Value {
        json!({
            "currencyPair": pair,
            "tradeType":    "buy",
            "entryPrice":   1.1050,
            "exitPrice":    1.1100,
            "lotSize":      0.5,
            "amount":       amount,
            "strategy":     "breakout",
            "date":         date,
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["trades"], 0);
    }

    #[tokio::test]
    async fn test_trade_lifecycle() {
        let (app, state) = app();
        let mut events = state.broadcast_tx.subscribe();

        let (status, created) = send(
            &app,
            "POST",
            "/api/trades",
            Some(trade_body("EUR/USD", 250.0, "2024-03-01T09:00:00Z")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["trade"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["trade"]["strategy"], "breakout");
        assert!(events.recv().await.unwrap().contains("TRADE_ADDED"));

        let (status, fetched) = send(&app, "GET", &format!("/api/trades/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["trade"]["amount"], 250.0);

        let (status, patched) = send(
            &app,
            "PATCH",
            &format!("/api/trades/{id}"),
            Some(json!({ "amount": -40.0, "notes": "moved stop" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["trade"]["amount"], -40.0);
        assert_eq!(patched["trade"]["notes"], "moved stop");

        let (status, _) = send(&app, "DELETE", &format!("/api/trades/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", &format!("/api/trades/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_invalid_trade_is_rejected() {
        let (app, state) = app();
        let mut body = trade_body("EUR/USD", 10.0, "2024-03-01T09:00:00Z");
        body["lotSize"] = json!(0);

        let (status, response) = send(&app, "POST", "/api/trades", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["ok"], false);
        assert!(response["error"].as_str().unwrap().contains("lotSize"));

        let mut body = trade_body("EUR/USD", 10.0, "2024-03-01T09:00:00Z");
        body["strategy"] = json!("astrology");
        let (status, _) = send(&app, "POST", "/api/trades", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(state.store.len().await, 0);
    }

    #[tokio::test]
    async fn test_stats_and_insights() {
        let (app, _) = app();
        for (amount, date) in [(100.0, "2024-01-01T10:00:00Z"), (-50.0, "2024-01-02T10:00:00Z")] {
            send(&app, "POST", "/api/trades", Some(trade_body("GBP/USD", amount, date))).await;
        }

        let (status, body) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        let stats = &body["stats"];
        assert_eq!(stats["totalTrades"], 2);
        assert_eq!(stats["netProfit"], 50.0);
        assert_eq!(stats["profitFactor"], 2.0);
        assert_eq!(stats["tradesByPair"]["GBP/USD"]["count"], 2);
        assert_eq!(stats["tradesByStrategy"]["breakout"]["count"], 2);

        let (_, body) = send(&app, "GET", "/api/stats/daily", None).await;
        assert_eq!(body["days"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, "GET", "/api/insights", None).await;
        let insights = body["insights"].as_array().unwrap();
        assert_eq!(insights[0]["kind"], "PERFORMANCE");
        assert_eq!(insights[1]["pair"], "GBP/USD");
    }

    #[tokio::test]
    async fn test_empty_journal_stats_sentinels() {
        let (app, _) = app();
        let (_, body) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(body["stats"]["totalTrades"], 0);
        assert_eq!(body["stats"]["riskRewardRatio"], Value::Null);
        assert_eq!(body["stats"]["tradeFrequency"], "N/A");
    }

    #[tokio::test]
    async fn test_pip_calculator() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/tools/pip-calculator",
            Some(json!({
                "currencyPair": "USD/JPY",
                "tradeType":    "sell",
                "entryPrice":   110.50,
                "exitPrice":    110.00,
                "lotSize":      1.0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let amount = body["estimate"]["amount"].as_f64().unwrap();
        assert!((amount - 415.0).abs() < 1e-6, "got {amount}");

        let (status, _) = send(
            &app,
            "POST",
            "/api/tools/pip-calculator",
            Some(json!({
                "currencyPair": "EUR/USD",
                "tradeType":    "buy",
                "entryPrice":   -1.0,
                "exitPrice":    1.1,
                "lotSize":      1.0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_meta_lists_vocabulary() {
        let (app, _) = app();
        let (_, body) = send(&app, "GET", "/api/meta", None).await;
        assert_eq!(body["strategies"].as_array().unwrap().len(), 10);
        assert_eq!(body["currencyPairs"].as_array().unwrap().len(), 12);
        assert_eq!(body["pipValues"]["defaultValue"], 10.0);
        assert_eq!(body["pipValues"]["rules"][0]["pattern"], "JPY");
    }

    #[tokio::test]
    async fn test_csv_export_download() {
        let (app, _) = app();
        send(&app, "POST", "/api/trades", Some(trade_body("EUR/USD", 5.0, "2024-03-01T09:00:00Z"))).await;

        let response = app
            .oneshot(Request::builder().uri("/api/export/csv").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains(".csv"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("\"Currency Pair\""));
    }

    #[tokio::test]
    async fn test_json_export_import_and_clear() {
        let (app, state) = app();
        send(&app, "POST", "/api/trades", Some(trade_body("EUR/USD", 5.0, "2024-03-01T09:00:00Z"))).await;
        send(&app, "POST", "/api/trades", Some(trade_body("USD/CAD", -3.0, "2024-03-02T09:00:00Z"))).await;

        let (_, snapshot) = send(&app, "GET", "/api/export/json", None).await;
        assert_eq!(snapshot["version"], 1);

        let (status, body) = send(&app, "DELETE", "/api/trades", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], 2);
        assert_eq!(state.store.len().await, 0);

        let (status, body) = send(&app, "POST", "/api/import/json", Some(snapshot)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["imported"], 2);
        assert_eq!(state.store.len().await, 2);

        let (status, body) = send(&app, "POST", "/api/import/json", Some(json!({ "version": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(state.store.len().await, 2);
    }
}
