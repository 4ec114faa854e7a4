//! Message handler

use axum::extract::State;
use orgchart_core::ChatMessage;
use orgchart_service::{MessageService, SendMessageRequest};

use crate::extractors::{Sender, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Send a direct message to an employee's subscribers
///
/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    Sender(sender_id): Sender,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<ChatMessage>> {
    let service = MessageService::new(state.service_context());
    Ok(Created(service.send_message(sender_id, request).await?))
}
