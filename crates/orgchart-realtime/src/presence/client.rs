//! Chat homeserver presence client.
//!
//! `PresenceClient` is the narrow seam the presence service talks through.
//! `MatrixClient` implements it against the Matrix client-server API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use orgchart_common::MatrixConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

/// Request timeout for a single presence lookup
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw presence as reported by the homeserver
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PresenceResponse {
    #[serde(default)]
    pub presence: Option<String>,
}

impl PresenceResponse {
    #[must_use]
    pub fn new(presence: impl Into<String>) -> Self {
        Self {
            presence: Some(presence.into()),
        }
    }
}

/// Presence client errors
#[derive(Debug, Error)]
pub enum PresenceClientError {
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid homeserver URL: {0}")]
    InvalidUrl(String),

    #[error("Access token is not a valid header value")]
    InvalidToken,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Presence lookup failed: {0}")]
    Lookup(String),
}

/// Fetches the presence of a single homeserver user
#[async_trait]
pub trait PresenceClient: Send + Sync {
    async fn get_presence(&self, user_id: &str) -> Result<PresenceResponse, PresenceClientError>;
}

/// Builds a presence client from connection settings
pub type ClientFactory =
    Arc<dyn Fn(&MatrixConfig) -> Result<Arc<dyn PresenceClient>, PresenceClientError> + Send + Sync>;

/// Factory producing [`MatrixClient`]s
#[must_use]
pub fn matrix_client_factory() -> ClientFactory {
    Arc::new(|config: &MatrixConfig| {
        Ok(Arc::new(MatrixClient::new(config)?) as Arc<dyn PresenceClient>)
    })
}

/// Matrix client-server API presence client
#[derive(Debug, Clone)]
pub struct MatrixClient {
    http: Client,
    base_url: Url,
}

impl MatrixClient {
    /// Create a client for the configured homeserver
    ///
    /// # Errors
    /// Fails if the URL or token is missing or malformed.
    pub fn new(config: &MatrixConfig) -> Result<Self, PresenceClientError> {
        let raw_url = config
            .homeserver_url
            .as_deref()
            .ok_or(PresenceClientError::MissingConfig("MATRIX_HOMESERVER_URL"))?;
        let token = config
            .access_token
            .as_deref()
            .ok_or(PresenceClientError::MissingConfig("MATRIX_ACCESS_TOKEN"))?;

        let base_url =
            Url::parse(raw_url).map_err(|e| PresenceClientError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(PresenceClientError::InvalidUrl(raw_url.to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| PresenceClientError::InvalidToken)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// `{homeserver}/_matrix/client/v3/presence/{userId}/status`
    fn presence_url(&self, user_id: &str) -> Result<Url, PresenceClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PresenceClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["_matrix", "client", "v3", "presence", user_id, "status"]);
        Ok(url)
    }
}

#[async_trait]
impl PresenceClient for MatrixClient {
    async fn get_presence(&self, user_id: &str) -> Result<PresenceResponse, PresenceClientError> {
        let url = self.presence_url(user_id)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<PresenceResponse>().await?)
    }
}
