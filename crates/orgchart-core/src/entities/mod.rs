//! Domain entities - core business objects

mod department;
mod employee;
mod message;

pub use department::{Department, DepartmentChanges, NewDepartment, DEFAULT_DEPARTMENT_ICON};
pub use employee::{derive_initials, Employee, EmployeeChanges, NewEmployee, DEFAULT_AVATAR_COLOR};
pub use message::ChatMessage;
