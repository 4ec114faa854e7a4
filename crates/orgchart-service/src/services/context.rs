//! Service context - dependency container for services
//!
//! Holds the store, the event bus, and the presence service.

use std::sync::Arc;

use orgchart_core::traits::{DepartmentRepository, EmployeeRepository};
use orgchart_realtime::{EventBus, MatrixService};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is a shared handle.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    employee_repo: Arc<dyn EmployeeRepository>,
    department_repo: Arc<dyn DepartmentRepository>,

    // Pub/Sub
    event_bus: EventBus,

    // Presence
    presence: MatrixService,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        department_repo: Arc<dyn DepartmentRepository>,
        event_bus: EventBus,
        presence: MatrixService,
    ) -> Self {
        Self {
            employee_repo,
            department_repo,
            event_bus,
            presence,
        }
    }

    // === Repositories ===

    /// Get the employee repository
    pub fn employee_repo(&self) -> &dyn EmployeeRepository {
        self.employee_repo.as_ref()
    }

    /// Shared handle to the employee repository, for background tasks
    pub fn employee_repo_handle(&self) -> Arc<dyn EmployeeRepository> {
        Arc::clone(&self.employee_repo)
    }

    /// Get the department repository
    pub fn department_repo(&self) -> &dyn DepartmentRepository {
        self.department_repo.as_ref()
    }

    // === Pub/Sub ===

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    // === Presence ===

    pub fn presence(&self) -> &MatrixService {
        &self.presence
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("employee_repo", &"Arc<dyn EmployeeRepository>")
            .field("department_repo", &"Arc<dyn DepartmentRepository>")
            .field("event_bus", &self.event_bus)
            .field("presence", &self.presence)
            .finish()
    }
}

/// Builder for ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    employee_repo: Option<Arc<dyn EmployeeRepository>>,
    department_repo: Option<Arc<dyn DepartmentRepository>>,
    event_bus: Option<EventBus>,
    presence: Option<MatrixService>,
}

impl ServiceContextBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee_repo(mut self, repo: Arc<dyn EmployeeRepository>) -> Self {
        self.employee_repo = Some(repo);
        self
    }

    pub fn department_repo(mut self, repo: Arc<dyn DepartmentRepository>) -> Self {
        self.department_repo = Some(repo);
        self
    }

    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn presence(mut self, presence: MatrixService) -> Self {
        self.presence = Some(presence);
        self
    }

    /// Build the context.
    ///
    /// Repositories and the presence service are required; the event bus
    /// defaults to a fresh one.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.employee_repo
                .ok_or_else(|| ServiceError::validation("employee_repo is required"))?,
            self.department_repo
                .ok_or_else(|| ServiceError::validation("department_repo is required"))?,
            self.event_bus.unwrap_or_default(),
            self.presence
                .ok_or_else(|| ServiceError::validation("presence is required"))?,
        ))
    }
}
