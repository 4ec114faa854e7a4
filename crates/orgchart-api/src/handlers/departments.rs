//! Department handlers

use axum::{
    extract::{Path, State},
    Json,
};
use orgchart_core::Department;
use orgchart_service::{
    CreateDepartmentRequest, DepartmentDetailResponse, DepartmentService, UpdateDepartmentRequest,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List departments
///
/// GET /api/departments
pub async fn list_departments(State(state): State<AppState>) -> ApiResult<Json<Vec<Department>>> {
    let service = DepartmentService::new(state.service_context());
    Ok(Json(service.list_departments().await?))
}

/// Get a department with its employees
///
/// GET /api/departments/{department_id}
pub async fn get_department(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
) -> ApiResult<Json<DepartmentDetailResponse>> {
    let service = DepartmentService::new(state.service_context());
    Ok(Json(service.get_department_details(&department_id).await?))
}

/// Create a department
///
/// POST /api/departments
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDepartmentRequest>,
) -> ApiResult<Created<Department>> {
    let service = DepartmentService::new(state.service_context());
    Ok(Created(service.create_department(request).await?))
}

/// Update a department
///
/// PATCH /api/departments/{department_id}
pub async fn update_department(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateDepartmentRequest>,
) -> ApiResult<Json<Department>> {
    let service = DepartmentService::new(state.service_context());
    Ok(Json(service.update_department(&department_id, request).await?))
}

/// Delete a department
///
/// DELETE /api/departments/{department_id}
pub async fn delete_department(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = DepartmentService::new(state.service_context());
    service.delete_department(&department_id).await?;
    Ok(NoContent)
}
