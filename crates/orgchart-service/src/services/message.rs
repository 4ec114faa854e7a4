//! Message service
//!
//! Direct messages are not stored; sending one only publishes it on
//! `messageSent` for the recipient's subscriptions.

use orgchart_core::ChatMessage;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::SendMessageRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Sender recorded when the caller does not identify itself
pub const ANONYMOUS_SENDER: &str = "anonymous";

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build and publish a message from `sender_id`
    #[instrument(skip(self, request), fields(recipient_id = %request.recipient_id))]
    pub async fn send_message(
        &self,
        sender_id: Option<String>,
        request: SendMessageRequest,
    ) -> ServiceResult<ChatMessage> {
        let message = ChatMessage::new(
            Uuid::new_v4().to_string(),
            sender_id.unwrap_or_else(|| ANONYMOUS_SENDER.to_string()),
            request.recipient_id,
            request.content,
        );

        let receivers = self.ctx.event_bus().publish_message_sent(message.clone());
        info!(message_id = %message.id, sender_id = %message.sender_id, receivers, "Message sent");

        Ok(message)
    }
}
