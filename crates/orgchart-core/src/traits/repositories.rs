//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Listing operations return entities in
//! insertion order.

use async_trait::async_trait;

use crate::entities::{
    Department, DepartmentChanges, Employee, EmployeeChanges, NewDepartment, NewEmployee,
};
use crate::error::DomainError;
use crate::value_objects::OnlineStatus;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Employee Repository
// ============================================================================

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// List every employee
    async fn get_all_employees(&self) -> RepoResult<Vec<Employee>>;

    /// Find employee by ID
    async fn get_employee(&self, id: &str) -> RepoResult<Option<Employee>>;

    /// Employees belonging to a department
    async fn get_employees_by_department(&self, department_id: &str) -> RepoResult<Vec<Employee>>;

    /// Employees whose manager is `manager_id`
    async fn get_direct_reports(&self, manager_id: &str) -> RepoResult<Vec<Employee>>;

    /// Members of the advisory council
    async fn get_council_members(&self) -> RepoResult<Vec<Employee>>;

    /// The CEO, if any
    async fn get_ceo(&self) -> RepoResult<Option<Employee>>;

    /// Employees with no department who are neither council nor CEO
    async fn get_unassigned_employees(&self) -> RepoResult<Vec<Employee>>;

    /// Create a new employee
    async fn create_employee(&self, input: NewEmployee) -> RepoResult<Employee>;

    /// Apply a partial update; `None` if the employee does not exist
    async fn update_employee(
        &self,
        id: &str,
        changes: EmployeeChanges,
    ) -> RepoResult<Option<Employee>>;

    /// Overwrite the status field; `None` if the employee does not exist
    async fn update_employee_status(
        &self,
        id: &str,
        status: OnlineStatus,
    ) -> RepoResult<Option<Employee>>;

    /// Delete an employee; `false` if it did not exist
    async fn delete_employee(&self, id: &str) -> RepoResult<bool>;
}

// ============================================================================
// Department Repository
// ============================================================================

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// List every department
    async fn get_all_departments(&self) -> RepoResult<Vec<Department>>;

    /// Find department by ID
    async fn get_department(&self, id: &str) -> RepoResult<Option<Department>>;

    /// Create a new department
    async fn create_department(&self, input: NewDepartment) -> RepoResult<Department>;

    /// Apply a partial update; `None` if the department does not exist
    async fn update_department(
        &self,
        id: &str,
        changes: DepartmentChanges,
    ) -> RepoResult<Option<Department>>;

    /// Delete a department; `false` if it did not exist
    async fn delete_department(&self, id: &str) -> RepoResult<bool>;
}
