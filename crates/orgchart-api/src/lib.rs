//! # orgchart-api
//!
//! HTTP and WebSocket server built with the Axum framework.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod subscriptions;

pub use server::{
    create_app, create_app_state, create_app_state_with_presence, run, start_presence,
    PresenceRuntime,
};
pub use state::AppState;
