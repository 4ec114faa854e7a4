//! # orgchart-store
//!
//! In-memory store implementing the repository traits from `orgchart-core`.
//!
//! ## Overview
//!
//! Nothing survives a restart. The store provides:
//!
//! - Thread-safe keyed tables that remember insertion order
//! - Repository implementations for employees and departments
//! - The seed organisation loaded at startup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orgchart_store::InMemoryStore;
//! use orgchart_core::traits::EmployeeRepository;
//!
//! async fn example() {
//!     let store = InMemoryStore::seeded();
//!     let ceo = store.employees.get_ceo().await.unwrap();
//!     assert!(ceo.is_some());
//! }
//! ```

pub mod repositories;
pub mod seed;

use std::sync::Arc;

pub use repositories::{InMemoryDepartmentRepository, InMemoryEmployeeRepository};

/// Employee and department repositories backing one organisation
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub employees: Arc<InMemoryEmployeeRepository>,
    pub departments: Arc<InMemoryDepartmentRepository>,
}

impl InMemoryStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the seed organisation
    pub fn seeded() -> Self {
        Self {
            employees: Arc::new(InMemoryEmployeeRepository::with_employees(
                seed::employees(),
            )),
            departments: Arc::new(InMemoryDepartmentRepository::with_departments(
                seed::departments(),
            )),
        }
    }
}
