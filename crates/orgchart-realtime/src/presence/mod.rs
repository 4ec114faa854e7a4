//! Chat homeserver presence

mod client;
mod service;

pub use client::{
    matrix_client_factory, ClientFactory, MatrixClient, PresenceClient, PresenceClientError,
    PresenceResponse,
};
pub use service::{MatrixService, PresenceChangeEvent, DEFAULT_POLL_INTERVAL};
