//! Department service

use orgchart_core::{Department, DepartmentChanges, NewDepartment};
use tracing::{info, instrument};

use crate::dto::{CreateDepartmentRequest, DepartmentDetailResponse, UpdateDepartmentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Department service
pub struct DepartmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DepartmentService<'a> {
    /// Create a new DepartmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_departments(&self) -> ServiceResult<Vec<Department>> {
        Ok(self.ctx.department_repo().get_all_departments().await?)
    }

    /// Get a department by ID
    #[instrument(skip(self))]
    pub async fn get_department(&self, department_id: &str) -> ServiceResult<Department> {
        self.ctx
            .department_repo()
            .get_department(department_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Department", department_id))
    }

    /// Get a department with its employees, head, and parent
    #[instrument(skip(self))]
    pub async fn get_department_details(
        &self,
        department_id: &str,
    ) -> ServiceResult<DepartmentDetailResponse> {
        let department = self.get_department(department_id).await?;

        let employees = self
            .ctx
            .employee_repo()
            .get_employees_by_department(&department.id)
            .await?;
        let head = match department.head_id.as_deref() {
            Some(id) => self.ctx.employee_repo().get_employee(id).await?,
            None => None,
        };
        let parent_department = match department.parent_department_id.as_deref() {
            Some(id) => self.ctx.department_repo().get_department(id).await?,
            None => None,
        };

        Ok(DepartmentDetailResponse {
            department,
            employees,
            head,
            parent_department,
        })
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_department(
        &self,
        request: CreateDepartmentRequest,
    ) -> ServiceResult<Department> {
        let department = self
            .ctx
            .department_repo()
            .create_department(NewDepartment::from(request))
            .await?;

        info!(department_id = %department.id, "Department created");

        self.ctx
            .event_bus()
            .publish_department_created(department.clone());

        Ok(department)
    }

    #[instrument(skip(self, request))]
    pub async fn update_department(
        &self,
        department_id: &str,
        request: UpdateDepartmentRequest,
    ) -> ServiceResult<Department> {
        let department = self
            .ctx
            .department_repo()
            .update_department(department_id, DepartmentChanges::from(request))
            .await?
            .ok_or_else(|| ServiceError::not_found("Department", department_id))?;

        info!(department_id = %department.id, "Department updated");

        self.ctx
            .event_bus()
            .publish_department_updated(department.clone());

        Ok(department)
    }

    /// Delete a department. Its employees keep their now dangling `department_id`.
    #[instrument(skip(self))]
    pub async fn delete_department(&self, department_id: &str) -> ServiceResult<()> {
        if !self
            .ctx
            .department_repo()
            .delete_department(department_id)
            .await?
        {
            return Err(ServiceError::not_found("Department", department_id));
        }

        info!(department_id = %department_id, "Department deleted");

        self.ctx.event_bus().publish_department_deleted(department_id);

        Ok(())
    }
}
