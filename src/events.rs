//! # events
//!
//! [`JournalEvent`]: everything the server pushes to `/ws/journal` clients.
//!
//! Events travel as pre-serialized JSON over a
//! `tokio::sync::broadcast::Sender<String>`.

use serde::Serialize;
use uuid::Uuid;

use crate::models::Trade;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JournalEvent {
    TradeAdded {
        trade: Box<Trade>,
    },

    TradeUpdated {
        trade: Box<Trade>,
    },

    #[serde(rename_all = "camelCase")]
    TradeDeleted {
        id:            Uuid,
        currency_pair: String,
    },

    /// "Clear Data": every trade removed.
    JournalCleared {
        removed: usize,
    },

    /// The whole journal was replaced from a snapshot.
    JournalImported {
        count: usize,
    },
}

impl JournalEvent {
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tags() {
        let cleared: serde_json::Value =
            serde_json::from_str(&JournalEvent::JournalCleared { removed: 4 }.to_json()).unwrap();
        assert_eq!(cleared["event"], "JOURNAL_CLEARED");
        assert_eq!(cleared["removed"], 4);

        let deleted: serde_json::Value = serde_json::from_str(
            &JournalEvent::TradeDeleted { id: Uuid::nil(), currency_pair: "EUR/USD".into() }
                .to_json(),
        )
        .unwrap();
        assert_eq!(deleted["event"], "TRADE_DELETED");
        assert_eq!(deleted["currencyPair"], "EUR/USD");
    }
}
