//! Store traits (ports)

mod repositories;

pub use repositories::{DepartmentRepository, EmployeeRepository, RepoResult};
