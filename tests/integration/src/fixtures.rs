//! Test fixtures and data generators
//!
//! Provides request bodies and a scripted homeserver for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use orgchart_common::MatrixConfig;
use orgchart_realtime::{
    ClientFactory, MatrixService, PresenceClient, PresenceClientError, PresenceResponse,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create employee request
#[derive(Debug, Serialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub employee_type: String,
    pub department_id: Option<String>,
    pub manager_id: Option<String>,
    pub matrix_user_id: Option<String>,
    pub skills: Vec<String>,
}

impl CreateEmployeeRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Agent {suffix}"),
            title: "Research Assistant".to_string(),
            employee_type: "ai".to_string(),
            department_id: Some("dept-research".to_string()),
            manager_id: Some("emp-atlas".to_string()),
            matrix_user_id: None,
            skills: vec!["Summaries".to_string()],
        }
    }
}

/// Create department request
#[derive(Debug, Serialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub icon: Option<String>,
    pub parent_department_id: Option<String>,
}

impl CreateDepartmentRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Department {suffix}"),
            icon: None,
            parent_department_id: Some("dept-development".to_string()),
        }
    }
}

/// Send message request
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub recipient_id: String,
    pub content: String,
}

impl SendMessageRequest {
    pub fn to(recipient_id: &str, content: &str) -> Self {
        Self {
            recipient_id: recipient_id.to_string(),
            content: content.to_string(),
        }
    }
}

/// Employee response
#[derive(Debug, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub title: String,
    #[serde(rename = "type")]
    pub employee_type: String,
    pub department_id: Option<String>,
    pub manager_id: Option<String>,
    pub matrix_user_id: Option<String>,
    pub status: String,
    pub is_council_member: bool,
}

/// Department response
#[derive(Debug, Deserialize)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub parent_department_id: Option<String>,
    pub head_id: Option<String>,
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub timestamp: String,
}

/// Presence response
#[derive(Debug, Deserialize)]
pub struct PresenceResponseBody {
    pub matrix_user_id: String,
    pub status: String,
    pub configured: bool,
}

/// Homeserver whose answers are set by the test.
///
/// Users without a scripted status fail the lookup.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHomeserver {
    statuses: Arc<RwLock<HashMap<String, String>>>,
}

impl ScriptedHomeserver {
    pub fn set(&self, user_id: &str, presence: &str) {
        self.statuses
            .write()
            .insert(user_id.to_string(), presence.to_string());
    }

    /// Presence service backed by this homeserver, polling every `interval`
    pub fn presence_service(&self, interval: Duration) -> MatrixService {
        let homeserver = self.clone();
        let factory: ClientFactory = Arc::new(move |_: &MatrixConfig| {
            Ok(Arc::new(homeserver.clone()) as Arc<dyn PresenceClient>)
        });
        let config = MatrixConfig {
            homeserver_url: Some("http://homeserver.test".to_string()),
            access_token: Some("test-token".to_string()),
            user_id: None,
        };
        MatrixService::with_client_factory(config, interval, factory)
    }
}

#[async_trait]
impl PresenceClient for ScriptedHomeserver {
    async fn get_presence(&self, user_id: &str) -> Result<PresenceResponse, PresenceClientError> {
        self.statuses
            .read()
            .get(user_id)
            .map(PresenceResponse::new)
            .ok_or_else(|| PresenceClientError::Lookup(format!("unknown user {user_id}")))
    }
}
