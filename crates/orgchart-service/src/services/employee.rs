//! Employee service
//!
//! Employee CRUD. Every successful mutation is published on its topic and
//! keeps the presence tracker in step with the employee's Matrix id.

use orgchart_core::{Employee, EmployeeChanges, NewEmployee, StatusChangeEvent};
use tracing::{debug, info, instrument};

use crate::dto::{
    CreateEmployeeRequest, EmployeeDetailResponse, StatusChangePayload, UpdateEmployeeRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Employee service
pub struct EmployeeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EmployeeService<'a> {
    /// Create a new EmployeeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All employees in store order
    #[instrument(skip(self))]
    pub async fn list_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.ctx.employee_repo().get_all_employees().await?)
    }

    /// Get an employee by ID
    #[instrument(skip(self))]
    pub async fn get_employee(&self, employee_id: &str) -> ServiceResult<Employee> {
        self.ctx
            .employee_repo()
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee", employee_id))
    }

    /// Get an employee with its department, manager, and direct reports
    #[instrument(skip(self))]
    pub async fn get_employee_details(
        &self,
        employee_id: &str,
    ) -> ServiceResult<EmployeeDetailResponse> {
        let employee = self.get_employee(employee_id).await?;

        let department = match employee.department_id.as_deref() {
            Some(id) => self.ctx.department_repo().get_department(id).await?,
            None => None,
        };
        let manager = match employee.manager_id.as_deref() {
            Some(id) => self.ctx.employee_repo().get_employee(id).await?,
            None => None,
        };
        let direct_reports = self
            .ctx
            .employee_repo()
            .get_direct_reports(&employee.id)
            .await?;

        Ok(EmployeeDetailResponse {
            employee,
            department,
            manager,
            direct_reports,
        })
    }

    /// Create an employee and start tracking its Matrix id
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_employee(&self, request: CreateEmployeeRequest) -> ServiceResult<Employee> {
        let employee = self
            .ctx
            .employee_repo()
            .create_employee(NewEmployee::from(request))
            .await?;

        if let Some(matrix_user_id) = employee.matrix_user_id.as_deref() {
            self.ctx.presence().track_user(matrix_user_id);
        }

        info!(employee_id = %employee.id, "Employee created");

        self.ctx.event_bus().publish_employee_created(employee.clone());

        Ok(employee)
    }

    /// Apply a partial update.
    ///
    /// A changed or cleared Matrix id swaps which homeserver user is tracked.
    #[instrument(skip(self, request))]
    pub async fn update_employee(
        &self,
        employee_id: &str,
        request: UpdateEmployeeRequest,
    ) -> ServiceResult<Employee> {
        let before = self.get_employee(employee_id).await?;

        let updated = self
            .ctx
            .employee_repo()
            .update_employee(employee_id, EmployeeChanges::from(request))
            .await?
            .ok_or_else(|| ServiceError::not_found("Employee", employee_id))?;

        if before.matrix_user_id != updated.matrix_user_id {
            if let Some(old) = before.matrix_user_id.as_deref() {
                self.release_matrix_id(old).await?;
            }
            if let Some(new) = updated.matrix_user_id.as_deref() {
                self.ctx.presence().track_user(new);
            }
        }

        info!(employee_id = %updated.id, "Employee updated");

        self.ctx.event_bus().publish_employee_updated(updated.clone());

        Ok(updated)
    }

    /// Delete an employee and stop tracking its Matrix id
    #[instrument(skip(self))]
    pub async fn delete_employee(&self, employee_id: &str) -> ServiceResult<()> {
        let employee = self.get_employee(employee_id).await?;

        if !self.ctx.employee_repo().delete_employee(employee_id).await? {
            return Err(ServiceError::not_found("Employee", employee_id));
        }

        if let Some(matrix_user_id) = employee.matrix_user_id.as_deref() {
            self.release_matrix_id(matrix_user_id).await?;
        }

        info!(employee_id = %employee_id, "Employee deleted");

        self.ctx.event_bus().publish_employee_deleted(employee_id);

        Ok(())
    }

    /// Attach the current employee record to a status change
    pub async fn status_change_payload(
        &self,
        event: StatusChangeEvent,
    ) -> ServiceResult<StatusChangePayload> {
        let employee = self
            .ctx
            .employee_repo()
            .get_employee(&event.employee_id)
            .await?;

        Ok(StatusChangePayload {
            employee_id: event.employee_id,
            status: event.status,
            timestamp: event.timestamp,
            employee,
        })
    }

    /// Untrack `matrix_user_id` unless another employee still carries it
    async fn release_matrix_id(&self, matrix_user_id: &str) -> ServiceResult<()> {
        let still_linked = self
            .ctx
            .employee_repo()
            .get_all_employees()
            .await?
            .iter()
            .any(|e| e.matrix_user_id.as_deref() == Some(matrix_user_id));

        if still_linked {
            debug!(user_id = %matrix_user_id, "Matrix id shared with another employee, still tracked");
        } else {
            self.ctx.presence().untrack_user(matrix_user_id);
        }
        Ok(())
    }
}
