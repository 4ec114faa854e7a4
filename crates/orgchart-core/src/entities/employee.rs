//! Employee entity - a person or AI agent on the org chart

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EmployeeType, OnlineStatus};

/// Avatar color used when none is supplied
pub const DEFAULT_AVATAR_COLOR: &str = "#6366f1";

/// Employee entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub title: String,
    #[serde(rename = "type")]
    pub employee_type: EmployeeType,
    pub department_id: Option<String>,
    pub manager_id: Option<String>,
    /// Identifier of this employee on the chat homeserver, e.g. `@ada:example.com`
    pub matrix_user_id: Option<String>,
    pub avatar_color: String,
    pub skills: Vec<String>,
    pub status: OnlineStatus,
    pub is_council_member: bool,
    pub council_role: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an employee
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub name: String,
    pub initials: Option<String>,
    pub title: String,
    pub employee_type: Option<EmployeeType>,
    pub department_id: Option<String>,
    pub manager_id: Option<String>,
    pub matrix_user_id: Option<String>,
    pub avatar_color: Option<String>,
    pub skills: Vec<String>,
    pub is_council_member: bool,
    pub council_role: Option<String>,
    pub description: Option<String>,
}

/// Partial update of an employee.
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub initials: Option<String>,
    pub title: Option<String>,
    pub employee_type: Option<EmployeeType>,
    pub department_id: Option<Option<String>>,
    pub manager_id: Option<Option<String>>,
    pub matrix_user_id: Option<Option<String>>,
    pub avatar_color: Option<String>,
    pub skills: Option<Vec<String>>,
    pub is_council_member: Option<bool>,
    pub council_role: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl Employee {
    /// Build a new employee from creation input.
    ///
    /// Status starts as `Unavailable` until presence is observed.
    pub fn new(id: String, input: NewEmployee) -> Self {
        let now = Utc::now();
        let initials = input
            .initials
            .unwrap_or_else(|| derive_initials(&input.name));

        Self {
            id,
            initials,
            name: input.name,
            title: input.title,
            employee_type: input.employee_type.unwrap_or(EmployeeType::Human),
            department_id: input.department_id,
            manager_id: input.manager_id,
            matrix_user_id: input.matrix_user_id,
            avatar_color: input
                .avatar_color
                .unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string()),
            skills: input.skills,
            status: OnlineStatus::Unavailable,
            is_council_member: input.is_council_member,
            council_role: input.council_role,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`
    pub fn apply(&mut self, changes: EmployeeChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(initials) = changes.initials {
            self.initials = initials;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(employee_type) = changes.employee_type {
            self.employee_type = employee_type;
        }
        if let Some(department_id) = changes.department_id {
            self.department_id = department_id;
        }
        if let Some(manager_id) = changes.manager_id {
            self.manager_id = manager_id;
        }
        if let Some(matrix_user_id) = changes.matrix_user_id {
            self.matrix_user_id = matrix_user_id;
        }
        if let Some(avatar_color) = changes.avatar_color {
            self.avatar_color = avatar_color;
        }
        if let Some(skills) = changes.skills {
            self.skills = skills;
        }
        if let Some(is_council_member) = changes.is_council_member {
            self.is_council_member = is_council_member;
        }
        if let Some(council_role) = changes.council_role {
            self.council_role = council_role;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }

    /// Set the presence-derived status
    pub fn set_status(&mut self, status: OnlineStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// The CEO is the human whose title is exactly `CEO`
    #[inline]
    pub fn is_ceo(&self) -> bool {
        self.employee_type == EmployeeType::Human && self.title == "CEO"
    }

    /// Not in a department, not on the council, and not the CEO
    #[inline]
    pub fn is_unassigned(&self) -> bool {
        self.department_id.is_none() && !self.is_council_member && self.title != "CEO"
    }
}

/// Initials from the first letter of each word, uppercased, at most two
pub fn derive_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
