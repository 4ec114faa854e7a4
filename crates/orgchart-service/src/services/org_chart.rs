//! Org chart queries spanning employees and departments

use orgchart_core::Employee;
use tracing::instrument;

use crate::dto::{DepartmentWithEmployees, OrgChartResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Org chart service
pub struct OrgChartService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OrgChartService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn council_members(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.ctx.employee_repo().get_council_members().await?)
    }

    /// CEO, council, every department with its staff, and everyone else
    #[instrument(skip(self))]
    pub async fn org_chart(&self) -> ServiceResult<OrgChartResponse> {
        let employees = self.ctx.employee_repo();

        let mut departments = Vec::new();
        for department in self.ctx.department_repo().get_all_departments().await? {
            let staff = employees.get_employees_by_department(&department.id).await?;
            departments.push(DepartmentWithEmployees {
                department,
                employees: staff,
            });
        }

        Ok(OrgChartResponse {
            ceo: employees.get_ceo().await?,
            council: employees.get_council_members().await?,
            departments,
            unassigned: employees.get_unassigned_employees().await?,
        })
    }
}
