//! Value objects - immutable domain primitives

mod employee_type;
mod online_status;

pub use employee_type::EmployeeType;
pub use online_status::{OnlineStatus, OnlineStatusParseError};
