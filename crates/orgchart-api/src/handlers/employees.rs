//! Employee handlers

use axum::{
    extract::{Path, State},
    Json,
};
use orgchart_core::Employee;
use orgchart_service::{
    CreateEmployeeRequest, EmployeeDetailResponse, EmployeeService, UpdateEmployeeRequest,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List employees
///
/// GET /api/employees
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let service = EmployeeService::new(state.service_context());
    Ok(Json(service.list_employees().await?))
}

/// Get an employee with its relations
///
/// GET /api/employees/{employee_id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<EmployeeDetailResponse>> {
    let service = EmployeeService::new(state.service_context());
    Ok(Json(service.get_employee_details(&employee_id).await?))
}

/// Create an employee
///
/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> ApiResult<Created<Employee>> {
    let service = EmployeeService::new(state.service_context());
    Ok(Created(service.create_employee(request).await?))
}

/// Update an employee
///
/// PATCH /api/employees/{employee_id}
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> ApiResult<Json<Employee>> {
    let service = EmployeeService::new(state.service_context());
    Ok(Json(service.update_employee(&employee_id, request).await?))
}

/// Delete an employee
///
/// DELETE /api/employees/{employee_id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = EmployeeService::new(state.service_context());
    service.delete_employee(&employee_id).await?;
    Ok(NoContent)
}
