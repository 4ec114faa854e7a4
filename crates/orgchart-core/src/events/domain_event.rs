//! Domain events - notifications emitted when org-chart state changes
//!
//! These events are used for:
//! - Notifying subscribed clients of real-time updates
//! - Relaying presence changes from the chat homeserver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ChatMessage, Department, Employee};
use crate::value_objects::OnlineStatus;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Employee Events
    // =========================================================================
    EmployeeStatusChanged(StatusChangeEvent),
    EmployeeCreated(Employee),
    EmployeeUpdated(Employee),
    EmployeeDeleted(String),

    // =========================================================================
    // Department Events
    // =========================================================================
    DepartmentCreated(Department),
    DepartmentUpdated(Department),
    DepartmentDeleted(String),

    // =========================================================================
    // Chat Events
    // =========================================================================
    MessageSent(ChatMessage),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::EmployeeStatusChanged(_) => "EMPLOYEE_STATUS_CHANGED",
            Self::EmployeeCreated(_) => "EMPLOYEE_CREATED",
            Self::EmployeeUpdated(_) => "EMPLOYEE_UPDATED",
            Self::EmployeeDeleted(_) => "EMPLOYEE_DELETED",
            Self::DepartmentCreated(_) => "DEPARTMENT_CREATED",
            Self::DepartmentUpdated(_) => "DEPARTMENT_UPDATED",
            Self::DepartmentDeleted(_) => "DEPARTMENT_DELETED",
            Self::MessageSent(_) => "MESSAGE_SENT",
        }
    }

    /// Recipient of a chat message event, `None` for every other event
    pub fn recipient_id(&self) -> Option<&str> {
        match self {
            Self::MessageSent(message) => Some(&message.recipient_id),
            _ => None,
        }
    }
}

/// An employee's presence-derived status changed.
///
/// A notification, not a record: the authoritative value is the
/// employee's `status` field, which is written before this is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeEvent {
    pub employee_id: String,
    pub status: OnlineStatus,
    pub timestamp: DateTime<Utc>,
}

impl StatusChangeEvent {
    /// Create an event stamped with the current time
    pub fn new(employee_id: impl Into<String>, status: OnlineStatus) -> Self {
        Self {
            employee_id: employee_id.into(),
            status,
            timestamp: Utc::now(),
        }
    }
}
