//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and talking to the subscription socket.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use orgchart_api::{
    create_app, create_app_state, create_app_state_with_presence, start_presence, AppState,
    PresenceRuntime,
};
use orgchart_common::AppConfig;
use orgchart_realtime::MatrixService;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long to wait for a frame before failing
const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over the seed organisation, with no homeserver
    pub async fn start() -> Result<Self> {
        let state = create_app_state(test_config())?;
        Self::serve(state).await
    }

    /// Start a server whose presence lookups go through `presence`.
    ///
    /// Presence is not started; see [`TestServer::start_presence`].
    pub async fn start_with_presence(presence: MatrixService) -> Result<Self> {
        let state = create_app_state_with_presence(test_config(), presence)?;
        Self::serve(state).await
    }

    async fn serve(state: AppState) -> Result<Self> {
        let app = create_app(state.clone());

        // Let the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            handle,
        })
    }

    /// Track linked employees, attach the bridge and start polling
    pub async fn start_presence(&self) -> Result<PresenceRuntime> {
        Ok(start_presence(&self.state).await?)
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request on behalf of `user_id`
    pub async fn post_as<T: Serialize>(
        &self,
        path: &str,
        user_id: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header("x-user-id", user_id)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).json(body).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Open the subscription socket
    pub async fn subscriptions(&self) -> Result<WsClient> {
        let url = format!("ws://{}/subscriptions", self.addr);
        let (socket, _) = connect_async(url).await?;
        Ok(WsClient { socket })
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client end of the subscription socket
pub struct WsClient {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Send one JSON frame
    pub async fn send(&mut self, frame: Value) -> Result<()> {
        self.socket.send(Message::Text(frame.to_string())).await?;
        Ok(())
    }

    /// Subscribe and wait for the acknowledgement
    pub async fn subscribe(&mut self, id: &str, topic: &str, recipient_id: Option<&str>) -> Result<()> {
        self.send(json!({
            "type": "subscribe",
            "id": id,
            "topic": topic,
            "recipient_id": recipient_id,
        }))
        .await?;

        let ack = self.next_frame().await?;
        anyhow::ensure!(
            ack["type"] == "subscribed" && ack["id"] == id,
            "Expected subscribed ack for {id}, got {ack}"
        );
        Ok(())
    }

    /// Next JSON frame from the server
    pub async fn next_frame(&mut self) -> Result<Value> {
        loop {
            let message = tokio::time::timeout(FRAME_TIMEOUT, self.socket.next())
                .await
                .context("Timed out waiting for a frame")?
                .context("Socket closed")??;

            if let Message::Text(text) = message {
                return Ok(serde_json::from_str(&text)?);
            }
        }
    }

    /// Assert no frame arrives within `wait`
    pub async fn assert_silent(&mut self, wait: Duration) -> Result<()> {
        match tokio::time::timeout(wait, self.socket.next()).await {
            Err(_) => Ok(()),
            Ok(frame) => anyhow::bail!("Expected no frame, got {frame:?}"),
        }
    }
}

/// Configuration with defaults only: seeded store, no homeserver
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::from_lookup(|_| None).expect("defaults always parse");
    config.store.seed_data = true;
    config
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response carrying `code`
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
    code: &str,
) -> Result<()> {
    let body: Value = assert_json(response, expected_status).await?;
    anyhow::ensure!(
        body["error"]["code"] == code,
        "Expected error code {code}, got {body}"
    );
    Ok(())
}
