//! In-memory implementation of EmployeeRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;
use uuid::Uuid;

use orgchart_core::entities::{Employee, EmployeeChanges, NewEmployee};
use orgchart_core::traits::{EmployeeRepository, RepoResult};
use orgchart_core::value_objects::OnlineStatus;

use super::table::Table;

/// In-memory implementation of EmployeeRepository
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    table: RwLock<Table<Employee>>,
}

impl InMemoryEmployeeRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `employees`, in the given order
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            table: RwLock::new(Table::from_rows(employees)),
        }
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Employee>
    where
        F: Fn(&Employee) -> bool,
    {
        self.table
            .read()
            .iter()
            .filter(|employee| predicate(*employee))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn get_all_employees(&self) -> RepoResult<Vec<Employee>> {
        Ok(self.table.read().iter().cloned().collect())
    }

    async fn get_employee(&self, id: &str) -> RepoResult<Option<Employee>> {
        Ok(self.table.read().get(id).cloned())
    }

    async fn get_employees_by_department(&self, department_id: &str) -> RepoResult<Vec<Employee>> {
        Ok(self.filtered(|e| e.department_id.as_deref() == Some(department_id)))
    }

    async fn get_direct_reports(&self, manager_id: &str) -> RepoResult<Vec<Employee>> {
        Ok(self.filtered(|e| e.manager_id.as_deref() == Some(manager_id)))
    }

    async fn get_council_members(&self) -> RepoResult<Vec<Employee>> {
        Ok(self.filtered(|e| e.is_council_member))
    }

    async fn get_ceo(&self) -> RepoResult<Option<Employee>> {
        Ok(self.table.read().iter().find(|e| e.is_ceo()).cloned())
    }

    async fn get_unassigned_employees(&self) -> RepoResult<Vec<Employee>> {
        Ok(self.filtered(Employee::is_unassigned))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_employee(&self, input: NewEmployee) -> RepoResult<Employee> {
        let employee = Employee::new(Uuid::new_v4().to_string(), input);
        self.table.write().insert(employee.clone());
        tracing::debug!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    #[instrument(skip(self, changes))]
    async fn update_employee(
        &self,
        id: &str,
        changes: EmployeeChanges,
    ) -> RepoResult<Option<Employee>> {
        Ok(self.table.write().modify(id, |e| e.apply(changes)))
    }

    #[instrument(skip(self))]
    async fn update_employee_status(
        &self,
        id: &str,
        status: OnlineStatus,
    ) -> RepoResult<Option<Employee>> {
        Ok(self.table.write().modify(id, |e| e.set_status(status)))
    }

    #[instrument(skip(self))]
    async fn delete_employee(&self, id: &str) -> RepoResult<bool> {
        Ok(self.table.write().remove(id))
    }
}
