//! Subscription wire protocol
//!
//! Every frame is a JSON text message tagged by `type`.

use orgchart_service::EventPayload;
use serde::{Deserialize, Serialize};

/// Frames a client may send
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Open a subscription named `id` on `topic`
    Subscribe {
        id: String,
        topic: String,
        #[serde(default)]
        recipient_id: Option<String>,
    },
    /// Close the subscription named `id`
    Unsubscribe { id: String },
    Ping,
}

impl ClientMessage {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Frames the server sends
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Subscription `id` is live; events published from now on are delivered
    Subscribed { id: String },
    /// One event on subscription `id`
    Next { id: String, payload: EventPayload },
    /// A frame could not be honoured. `id` is absent when the frame itself was unreadable.
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        message: String,
    },
    /// Subscription `id` is closed; no more `next` frames follow
    Complete { id: String },
    Pong,
}

impl ServerMessage {
    pub fn error(id: Option<String>, message: impl Into<String>) -> Self {
        Self::Error {
            id,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
