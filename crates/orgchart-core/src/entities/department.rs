//! Department entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DEFAULT_AVATAR_COLOR;

/// Icon used when none is supplied
pub const DEFAULT_DEPARTMENT_ICON: &str = "📁";

/// A department on the org chart, optionally nested under another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub parent_department_id: Option<String>,
    pub head_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a department
#[derive(Debug, Clone, Default)]
pub struct NewDepartment {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub parent_department_id: Option<String>,
    pub head_id: Option<String>,
}

/// Partial update of a department; `Some(None)` clears a nullable field
#[derive(Debug, Clone, Default)]
pub struct DepartmentChanges {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub parent_department_id: Option<Option<String>>,
    pub head_id: Option<Option<String>>,
}

impl Department {
    /// Create a new department
    pub fn new(id: String, input: NewDepartment) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            icon: input
                .icon
                .unwrap_or_else(|| DEFAULT_DEPARTMENT_ICON.to_string()),
            color: input
                .color
                .unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string()),
            parent_department_id: input.parent_department_id,
            head_id: input.head_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`
    pub fn apply(&mut self, changes: DepartmentChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(icon) = changes.icon {
            self.icon = icon;
        }
        if let Some(color) = changes.color {
            self.color = color;
        }
        if let Some(parent) = changes.parent_department_id {
            self.parent_department_id = parent;
        }
        if let Some(head_id) = changes.head_id {
            self.head_id = head_id;
        }
        self.updated_at = Utc::now();
    }
}
