//! # routes::monitor
//!
//! Live journal feed for open dashboards.
//!
//! | Method   | Path          | Description                          |
//! |----------|---------------|--------------------------------------|
//! | GET (WS) | `/ws/journal` | `SNAPSHOT` on connect, then events   |

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{debug, info};

use crate::state::SharedState;

/// Every [`JournalEvent`](crate::events::JournalEvent) arrives as a JSON text frame.
pub async fn ws_journal(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn snapshot(state: &SharedState) -> String {
    let trades = state.store.list().await;
    let stats = state.statistics(&trades);

    json!({
        "event":          "SNAPSHOT",
        "tradeCount":     trades.len(),
        "summary":        stats.basic,
        "tradeFrequency": stats.advanced.trade_frequency_label(),
    })
    .to_string()
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    // subscribe first so nothing between snapshot and loop is missed
    let mut rx = state.broadcast_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 Journal client connected");

    if sender.send(Message::Text(snapshot(&state).await)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!("Journal client lagged, skipped {n} events");
                    }
                    Err(_) => break,
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("🔌 Journal client disconnected");
}
