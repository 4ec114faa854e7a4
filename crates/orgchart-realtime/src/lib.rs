//! # orgchart-realtime
//!
//! Real-time plumbing: homeserver presence polling and the in-process event bus.
//!
//! ## Features
//!
//! - **Presence**: `MatrixService` tracks homeserver users, caches their last known
//!   status, and polls for changes on a fixed interval
//! - **Pub/Sub**: `EventBus` fans domain events out to topic subscribers, with an
//!   optional per-subscription recipient filter
//!
//! ## Example
//!
//! ```ignore
//! use orgchart_realtime::{EventBus, MatrixService, Topic};
//!
//! let presence = MatrixService::new(config.matrix.clone(), config.presence.poll_interval());
//! presence.initialize().await;
//! presence.track_user("@ada:example.com");
//! presence.start_presence_polling();
//!
//! let bus = EventBus::new(256);
//! let mut status_changes = bus.subscribe(Topic::EmployeeStatusChanged, None);
//! ```

pub mod presence;
pub mod pubsub;

pub use presence::{
    matrix_client_factory, ClientFactory, MatrixClient, MatrixService, PresenceChangeEvent,
    PresenceClient, PresenceClientError, PresenceResponse, DEFAULT_POLL_INTERVAL,
};
pub use pubsub::{EventBus, EventStream, SubscriptionFilter, Topic};
