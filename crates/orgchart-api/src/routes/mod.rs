//! Route definitions
//!
//! REST endpoints live under /api; health and subscriptions sit at the root.

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::handlers::{departments, employees, health, messages, org_chart, presence};
use crate::response::ApiError;
use crate::state::AppState;
use crate::subscriptions::subscriptions_handler;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/subscriptions", get(subscriptions_handler))
        .nest("/api", api_routes())
        .fallback(route_not_found)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

/// REST routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(employee_routes())
        .merge(department_routes())
        .merge(org_chart_routes())
        .route("/presence/:matrix_user_id", get(presence::get_presence))
        .route("/messages", post(messages::send_message))
}

/// Employee routes
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/:employee_id",
            get(employees::get_employee)
                .patch(employees::update_employee)
                .delete(employees::delete_employee),
        )
}

/// Department routes
fn department_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/:department_id",
            get(departments::get_department)
                .patch(departments::update_department)
                .delete(departments::delete_department),
        )
}

/// Org chart routes
fn org_chart_routes() -> Router<AppState> {
    Router::new()
        .route("/council", get(org_chart::council_members))
        .route("/org-chart", get(org_chart::org_chart))
}
