//! Server setup and initialization
//!
//! Provides the application builder, presence startup, and the server runner.

use axum::Router;
use orgchart_common::{AppConfig, AppError};
use orgchart_realtime::{EventBus, MatrixService};
use orgchart_service::{PresenceBridge, PresenceService, ServiceContextBuilder};
use orgchart_store::InMemoryStore;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router, &state.config().cors);
    router.with_state(state)
}

/// Create the store, event bus and presence service behind the API
pub fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let presence = MatrixService::new(config.matrix.clone(), config.presence.poll_interval());
    create_app_state_with_presence(config, presence)
}

/// Like [`create_app_state`], with a caller-supplied presence service
pub fn create_app_state_with_presence(
    config: AppConfig,
    presence: MatrixService,
) -> Result<AppState, AppError> {
    let store = if config.store.seed_data {
        info!("Loading seed organisation");
        InMemoryStore::seeded()
    } else {
        InMemoryStore::new()
    };

    let service_context = ServiceContextBuilder::new()
        .employee_repo(store.employees)
        .department_repo(store.departments)
        .event_bus(EventBus::new(config.events.capacity))
        .presence(presence)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Presence tasks running alongside the server
#[derive(Debug)]
pub struct PresenceRuntime {
    presence: MatrixService,
    bridge: JoinHandle<()>,
}

impl PresenceRuntime {
    /// Stop polling and detach the bridge
    pub fn shutdown(self) {
        self.presence.stop_presence_polling();
        self.bridge.abort();
        info!("Presence polling stopped");
    }
}

/// Connect presence, track every linked employee and start polling.
///
/// The bridge is listening before the first sweep runs.
pub async fn start_presence(state: &AppState) -> Result<PresenceRuntime, AppError> {
    let ctx = state.service_context();
    let presence = ctx.presence().clone();

    presence.initialize().await;
    let tracked = PresenceService::new(ctx).track_known_employees().await?;

    let bridge = PresenceBridge::from_context(ctx).spawn(presence.subscribe_presence_changes());
    presence.start_presence_polling();

    info!(
        tracked,
        configured = presence.is_configured(),
        "Presence started"
    );
    Ok(PresenceRuntime { presence, bridge })
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config)?;
    let presence = start_presence(&state).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;
    info!("Server listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    presence.shutdown();
    served.map_err(|e| AppError::Config(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn config(seed: bool) -> AppConfig {
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        config.store.seed_data = seed;
        config
    }

    #[tokio::test]
    async fn test_seeded_state_serves_org_chart() {
        let app = create_app(create_app_state(config(true)).unwrap());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/employees/emp-vadim")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unseeded_state_is_empty() {
        let state = create_app_state(config(false)).unwrap();
        let employees = state
            .service_context()
            .employee_repo()
            .get_all_employees()
            .await
            .unwrap();
        assert!(employees.is_empty());
    }

    #[tokio::test]
    async fn test_start_presence_without_homeserver() {
        let state = create_app_state(config(true)).unwrap();
        let runtime = start_presence(&state).await.unwrap();

        let presence = state.service_context().presence();
        assert!(!presence.is_configured());
        assert!(presence.is_tracked("@jarvis:localhost"));
        // Nothing to poll without a client
        assert!(!presence.is_polling());

        runtime.shutdown();
    }
}
