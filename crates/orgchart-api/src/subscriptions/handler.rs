//! WebSocket subscription handler
//!
//! One socket carries any number of named subscriptions. Each subscription is
//! a task forwarding its event bus feed into the socket's outgoing queue.

use std::collections::HashMap;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use orgchart_service::SubscriptionService;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use super::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// Forwarding tasks of one socket, aborted when the socket goes away
#[derive(Default)]
struct Subscriptions(HashMap<String, JoinHandle<()>>);

impl Subscriptions {
    fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    fn insert(&mut self, id: String, task: JoinHandle<()>) {
        self.0.insert(id, task);
    }

    fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id).map(|task| task.abort()).is_some()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        for task in self.0.values() {
            task.abort();
        }
    }
}

/// WebSocket subscription endpoint
///
/// GET /subscriptions
pub async fn subscriptions_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: AppState, socket: WebSocket) {
    let connection_id = Uuid::new_v4();
    let span = tracing::info_span!("subscriptions", connection_id = %connection_id);
    async move {
        tracing::info!("WebSocket connection established");

        let (tx, mut rx) = mpsc::channel::<ServerMessage>(MESSAGE_BUFFER_SIZE);
        let (mut ws_sink, mut ws_stream) = socket.split();

        // Receive frames and manage subscriptions
        let mut recv_task = tokio::spawn(
            async move {
                let mut subscriptions = Subscriptions::default();
                while let Some(msg) = ws_stream.next().await {
                    match msg {
                        Ok(Message::Text(text)) => {
                            handle_text_message(&state, &tx, &mut subscriptions, &text).await;
                        }
                        Ok(Message::Binary(_)) => {
                            tracing::debug!("Binary messages not supported");
                            let _ = tx
                                .send(ServerMessage::error(None, "binary frames are not supported"))
                                .await;
                        }
                        Ok(Message::Ping(_) | Message::Pong(_)) => {
                            // Pong is handled automatically by axum
                        }
                        Ok(Message::Close(_)) => {
                            tracing::info!("Client closed connection");
                            break;
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "WebSocket error");
                            break;
                        }
                    }
                }
            }
            .in_current_span(),
        );

        // Drain the outgoing queue into the socket
        let mut send_task = tokio::spawn(
            async move {
                while let Some(msg) = rx.recv().await {
                    let json = match msg.to_json() {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to encode message");
                            continue;
                        }
                    };
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::warn!("Failed to send message to WebSocket");
                        break;
                    }
                }

                let _ = ws_sink.close().await;
            }
            .in_current_span(),
        );

        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        }

        tracing::info!("WebSocket connection closed");
    }
    .instrument(span)
    .await;
}

/// Handle a text frame from the client. Problems are reported on the socket.
async fn handle_text_message(
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
    subscriptions: &mut Subscriptions,
    text: &str,
) {
    let message = match ClientMessage::from_json(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to parse message");
            let _ = tx
                .send(ServerMessage::error(None, format!("invalid message: {e}")))
                .await;
            return;
        }
    };

    let reply = match message {
        ClientMessage::Subscribe {
            id,
            topic,
            recipient_id,
        } => subscribe(state, tx, subscriptions, id, &topic, recipient_id),
        ClientMessage::Unsubscribe { id } => {
            if subscriptions.remove(&id) {
                tracing::debug!(subscription_id = %id, "Subscription closed");
                ServerMessage::Complete { id }
            } else {
                ServerMessage::error(Some(id), "no such subscription")
            }
        }
        ClientMessage::Ping => ServerMessage::Pong,
    };

    let _ = tx.send(reply).await;
}

/// Open subscription `id` and start forwarding its events
fn subscribe(
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
    subscriptions: &mut Subscriptions,
    id: String,
    topic: &str,
    recipient_id: Option<String>,
) -> ServerMessage {
    if subscriptions.contains(&id) {
        return ServerMessage::error(Some(id), "subscription id already in use");
    }

    let mut stream = match SubscriptionService::new(state.service_context())
        .subscribe(topic, recipient_id)
    {
        Ok(stream) => stream,
        Err(e) => return ServerMessage::error(Some(id), e.to_string()),
    };

    tracing::debug!(subscription_id = %id, topic = %topic, "Subscription opened");

    let task_state = state.clone();
    let task_tx = tx.clone();
    let task_id = id.clone();
    let task = tokio::spawn(
        async move {
            let service = SubscriptionService::new(task_state.service_context());
            while let Some(event) = stream.next().await {
                let payload = match service.payload(event).await {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to build subscription payload");
                        continue;
                    }
                };
                let next = ServerMessage::Next {
                    id: task_id.clone(),
                    payload,
                };
                if task_tx.send(next).await.is_err() {
                    break;
                }
            }
        }
        .in_current_span(),
    );

    subscriptions.insert(id.clone(), task);
    ServerMessage::Subscribed { id }
}
