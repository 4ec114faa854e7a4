//! In-memory implementation of DepartmentRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;
use uuid::Uuid;

use orgchart_core::entities::{Department, DepartmentChanges, NewDepartment};
use orgchart_core::traits::{DepartmentRepository, RepoResult};

use super::table::Table;

/// In-memory implementation of DepartmentRepository
#[derive(Debug, Default)]
pub struct InMemoryDepartmentRepository {
    table: RwLock<Table<Department>>,
}

impl InMemoryDepartmentRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `departments`, in the given order
    pub fn with_departments(departments: impl IntoIterator<Item = Department>) -> Self {
        Self {
            table: RwLock::new(Table::from_rows(departments)),
        }
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn get_all_departments(&self) -> RepoResult<Vec<Department>> {
        Ok(self.table.read().iter().cloned().collect())
    }

    async fn get_department(&self, id: &str) -> RepoResult<Option<Department>> {
        Ok(self.table.read().get(id).cloned())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_department(&self, input: NewDepartment) -> RepoResult<Department> {
        let department = Department::new(Uuid::new_v4().to_string(), input);
        self.table.write().insert(department.clone());
        tracing::debug!(department_id = %department.id, "Department created");
        Ok(department)
    }

    #[instrument(skip(self, changes))]
    async fn update_department(
        &self,
        id: &str,
        changes: DepartmentChanges,
    ) -> RepoResult<Option<Department>> {
        Ok(self.table.write().modify(id, |d| d.apply(changes)))
    }

    #[instrument(skip(self))]
    async fn delete_department(&self, id: &str) -> RepoResult<bool> {
        Ok(self.table.write().remove(id))
    }
}
