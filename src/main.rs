//! # FX Journal: Forex Trading Journal Backend
//!
//! ```text
//!  ┌─────────────┐  /api/trades[/:id]          ┌──────────────────────────┐
//!  │  Journal UI │ ─────────────────────────▶  │ AppState                 │
//!  │  (form,     │  /api/tools/pip-calculator  │ ├─ store ──▶ journal.json│
//!  │  dashboard) │  /api/stats · /insights     │ ├─ pip_values            │
//!  └─────────────┘  /api/export · /import      │ ├─ reporting_offset      │
//!         ▲                                    │ └─ broadcast_tx ───────┐ │
//!         │                                    └────────────────────────┼─┘
//!         └──────────── ws://host/ws/journal ◀──────────────────────────┘
//! ```

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod engine;
mod error;
mod events;
mod export;
mod models;
mod routes;
mod state;
mod store;

use config::Config;
use state::build_state;
use store::TradeStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("fx_journal=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════════════╗
  ║              FX JOURNAL : Trading Journal             ║
  ║   Trades · Pip Calculator · Statistics · Insights     ║
  ╚═══════════════════════════════════════════════════════╝"#);

    // ── 3. Config ─────────────────────────────────────────────────────────────
    let config = Config::from_env().context("invalid configuration")?;

    // ── 4. Journal store ──────────────────────────────────────────────────────
    let store = match &config.data_path {
        Some(path) => TradeStore::open(path).await?,
        None => {
            warn!("JOURNAL_DATA_PATH not set, trades live in memory only");
            TradeStore::in_memory()
        }
    };

    // ── 5. Shared state + router ──────────────────────────────────────────────
    let state = build_state(store, &config);
    let app = routes::router(state.clone());

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    let addr = config.bind_addr;
    info!(
        ?addr,
        snapshot = ?state.store.snapshot_path(),
        reporting_offset = ?config.utc_offset,
        "🚀 FX Journal server starting"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── 7. Final flush ────────────────────────────────────────────────────────
    state.store.flush().await.context("final journal flush failed")?;
    info!(trades = state.store.len().await, "👋 FX Journal stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "Failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}
