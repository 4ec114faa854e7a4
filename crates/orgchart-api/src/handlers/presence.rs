//! Presence handler

use axum::{
    extract::{Path, State},
    Json,
};
use orgchart_service::{PresenceService, PresenceStatusResponse};

use crate::response::ApiResult;
use crate::state::AppState;

/// Current presence of a homeserver user, fetched live
///
/// GET /api/presence/{matrix_user_id}
pub async fn get_presence(
    State(state): State<AppState>,
    Path(matrix_user_id): Path<String>,
) -> ApiResult<Json<PresenceStatusResponse>> {
    let service = PresenceService::new(state.service_context());
    Ok(Json(service.get_presence(&matrix_user_id).await?))
}
