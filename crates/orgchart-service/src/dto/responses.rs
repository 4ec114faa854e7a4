//! Response DTOs for API endpoints
//!
//! Entities serialize as themselves; the types here add the relations a
//! client would otherwise need extra round trips for.

use chrono::{DateTime, Utc};
use orgchart_core::{ChatMessage, Department, Employee, OnlineStatus};
use serde::Serialize;

// ============================================================================
// Employee Responses
// ============================================================================

/// An employee with its department, manager, and direct reports resolved
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDetailResponse {
    #[serde(flatten)]
    pub employee: Employee,
    pub department: Option<Department>,
    pub manager: Option<Employee>,
    pub direct_reports: Vec<Employee>,
}

// ============================================================================
// Department Responses
// ============================================================================

/// A department with its staff, head, and parent resolved
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentDetailResponse {
    #[serde(flatten)]
    pub department: Department,
    pub employees: Vec<Employee>,
    pub head: Option<Employee>,
    pub parent_department: Option<Department>,
}

/// A department and the employees assigned to it
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentWithEmployees {
    #[serde(flatten)]
    pub department: Department,
    pub employees: Vec<Employee>,
}

// ============================================================================
// Org Chart Responses
// ============================================================================

/// The whole organisation in one document
#[derive(Debug, Clone, Serialize)]
pub struct OrgChartResponse {
    pub ceo: Option<Employee>,
    pub council: Vec<Employee>,
    pub departments: Vec<DepartmentWithEmployees>,
    pub unassigned: Vec<Employee>,
}

// ============================================================================
// Presence Responses
// ============================================================================

/// Live presence of one homeserver user
#[derive(Debug, Clone, Serialize)]
pub struct PresenceStatusResponse {
    pub matrix_user_id: String,
    pub status: OnlineStatus,
    /// False when no homeserver is connected; `status` is then always `unavailable`
    pub configured: bool,
}

// ============================================================================
// Subscription Payloads
// ============================================================================

/// Status change as delivered to subscribers, with the employee attached
#[derive(Debug, Clone, Serialize)]
pub struct StatusChangePayload {
    pub employee_id: String,
    pub status: OnlineStatus,
    pub timestamp: DateTime<Utc>,
    pub employee: Option<Employee>,
}

/// Body of a subscription `next` frame
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    StatusChanged(StatusChangePayload),
    Employee(Employee),
    Department(Department),
    Deleted(String),
    Message(ChatMessage),
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgchart_core::NewDepartment;

    #[test]
    fn test_health_response() {
        let health = HealthResponse::ok();
        assert_eq!(health.status, "ok");
    }

    #[test]
    fn test_department_with_employees_is_flattened() {
        let department = Department::new(
            "dept-1".into(),
            NewDepartment {
                name: "Research".into(),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(DepartmentWithEmployees {
            department,
            employees: vec![],
        })
        .unwrap();
        assert_eq!(json["id"], "dept-1");
        assert_eq!(json["name"], "Research");
        assert_eq!(json["employees"], serde_json::json!([]));
    }

    #[test]
    fn test_deleted_payload_is_the_bare_id() {
        let json = serde_json::to_value(EventPayload::Deleted("emp-1".into())).unwrap();
        assert_eq!(json, "emp-1");
    }
}
