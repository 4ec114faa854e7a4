//! Whole-organisation queries

use axum::{extract::State, Json};
use orgchart_core::Employee;
use orgchart_service::{OrgChartResponse, OrgChartService};

use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/council
pub async fn council_members(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let service = OrgChartService::new(state.service_context());
    Ok(Json(service.council_members().await?))
}

/// GET /api/org-chart
pub async fn org_chart(State(state): State<AppState>) -> ApiResult<Json<OrgChartResponse>> {
    let service = OrgChartService::new(state.service_context());
    Ok(Json(service.org_chart().await?))
}
