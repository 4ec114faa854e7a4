//! Chat message - an ephemeral direct message between org-chart members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat message. Not stored; only published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message stamped with the current time
    pub fn new(id: String, sender_id: String, recipient_id: String, content: String) -> Self {
        Self {
            id,
            sender_id,
            recipient_id,
            content,
            timestamp: Utc::now(),
        }
    }
}
