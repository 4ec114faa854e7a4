//! Pub/Sub topic definitions.
//!
//! Topic names are the ones clients subscribe with.

use std::fmt;

use orgchart_core::DomainEvent;

/// Event bus topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    EmployeeStatusChanged,
    EmployeeCreated,
    EmployeeUpdated,
    EmployeeDeleted,
    DepartmentCreated,
    DepartmentUpdated,
    DepartmentDeleted,
    MessageSent,
}

impl Topic {
    pub const ALL: [Self; 8] = [
        Self::EmployeeStatusChanged,
        Self::EmployeeCreated,
        Self::EmployeeUpdated,
        Self::EmployeeDeleted,
        Self::DepartmentCreated,
        Self::DepartmentUpdated,
        Self::DepartmentDeleted,
        Self::MessageSent,
    ];

    /// Get the topic name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmployeeStatusChanged => "employeeStatusChanged",
            Self::EmployeeCreated => "employeeCreated",
            Self::EmployeeUpdated => "employeeUpdated",
            Self::EmployeeDeleted => "employeeDeleted",
            Self::DepartmentCreated => "departmentCreated",
            Self::DepartmentUpdated => "departmentUpdated",
            Self::DepartmentDeleted => "departmentDeleted",
            Self::MessageSent => "messageSent",
        }
    }

    /// Parse a topic name, `None` if unknown
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.name() == name)
    }

    /// The topic an event is published on
    #[must_use]
    pub fn of(event: &DomainEvent) -> Self {
        match event {
            DomainEvent::EmployeeStatusChanged(_) => Self::EmployeeStatusChanged,
            DomainEvent::EmployeeCreated(_) => Self::EmployeeCreated,
            DomainEvent::EmployeeUpdated(_) => Self::EmployeeUpdated,
            DomainEvent::EmployeeDeleted(_) => Self::EmployeeDeleted,
            DomainEvent::DepartmentCreated(_) => Self::DepartmentCreated,
            DomainEvent::DepartmentUpdated(_) => Self::DepartmentUpdated,
            DomainEvent::DepartmentDeleted(_) => Self::DepartmentDeleted,
            DomainEvent::MessageSent(_) => Self::MessageSent,
        }
    }

    /// Whether subscriptions may filter this topic by recipient
    #[must_use]
    pub fn supports_recipient_filter(&self) -> bool {
        matches!(self, Self::MessageSent)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
