//! Repository implementations
//!
//! In-memory implementations of the repository traits defined in orgchart-core.
//! Deleting a row never cascades to rows that reference it.

mod department;
mod employee;
mod table;

pub use department::InMemoryDepartmentRepository;
pub use employee::InMemoryEmployeeRepository;
