//! Shared fixtures for service tests

use std::time::Duration;

use orgchart_common::MatrixConfig;
use orgchart_core::DomainEvent;
use orgchart_realtime::{EventBus, EventStream, MatrixService, DEFAULT_POLL_INTERVAL};
use orgchart_store::InMemoryStore;
use tokio_stream::StreamExt;

use super::context::{ServiceContext, ServiceContextBuilder};

/// Context over an in-memory store with an unconfigured presence service
pub fn context(seeded: bool) -> ServiceContext {
    let store = if seeded {
        InMemoryStore::seeded()
    } else {
        InMemoryStore::new()
    };
    ServiceContextBuilder::new()
        .employee_repo(store.employees)
        .department_repo(store.departments)
        .event_bus(EventBus::default())
        .presence(MatrixService::new(MatrixConfig::default(), DEFAULT_POLL_INTERVAL))
        .build()
        .unwrap()
}

pub async fn next_event(stream: &mut EventStream) -> DomainEvent {
    tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .expect("timed out waiting for event")
        .expect("stream ended")
}

pub async fn assert_no_event(stream: &mut EventStream) {
    let pending = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
    assert!(pending.is_err(), "unexpected event {pending:?}");
}
