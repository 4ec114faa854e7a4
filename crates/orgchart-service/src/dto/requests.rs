//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! On update requests a nullable field distinguishes "absent" (leave as is)
//! from an explicit `null` (clear it).

use orgchart_core::EmployeeType;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// `Some(None)` for an explicit `null`, `None` (via `default`) for a missing key
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

// ============================================================================
// Employee Requests
// ============================================================================

/// Create employee request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(min = 1, max = 4, message = "Initials must be 1-4 characters"))]
    pub initials: Option<String>,

    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[serde(rename = "type")]
    pub employee_type: Option<EmployeeType>,

    pub department_id: Option<String>,

    pub manager_id: Option<String>,

    pub matrix_user_id: Option<String>,

    pub avatar_color: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub is_council_member: bool,

    pub council_role: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Update employee request; every field is optional
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 4, message = "Initials must be 1-4 characters"))]
    pub initials: Option<String>,

    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub employee_type: Option<EmployeeType>,

    #[serde(default, deserialize_with = "double_option")]
    pub department_id: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub matrix_user_id: Option<Option<String>>,

    pub avatar_color: Option<String>,

    pub skills: Option<Vec<String>>,

    pub is_council_member: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub council_role: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

// ============================================================================
// Department Requests
// ============================================================================

/// Create department request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(
        length(min = 1, max = 100, message = "Department name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    pub icon: Option<String>,

    pub color: Option<String>,

    pub parent_department_id: Option<String>,

    pub head_id: Option<String>,
}

/// Update department request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[validate(
        length(min = 1, max = 100, message = "Department name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    pub icon: Option<String>,

    pub color: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub parent_department_id: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub head_id: Option<Option<String>>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send a direct message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(custom(function = "not_blank"))]
    pub recipient_id: String,

    #[validate(
        length(min = 1, max = 4000, message = "Message content must be 1-4000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}
