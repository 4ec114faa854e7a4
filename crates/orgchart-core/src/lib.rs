//! # orgchart-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (store, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    derive_initials, ChatMessage, Department, DepartmentChanges, Employee, EmployeeChanges,
    NewDepartment, NewEmployee, DEFAULT_AVATAR_COLOR, DEFAULT_DEPARTMENT_ICON,
};
pub use error::DomainError;
pub use events::{DomainEvent, StatusChangeEvent};
pub use traits::{DepartmentRepository, EmployeeRepository, RepoResult};
pub use value_objects::{EmployeeType, OnlineStatus, OnlineStatusParseError};
