//! In-process event bus.
//!
//! One `broadcast` channel per topic, created on first subscription.
//! Subscribers only see events published after they subscribed. A subscriber
//! that falls more than `capacity` events behind skips the ones it missed.

use std::pin::Pin;
use std::sync::Arc;

use dashmap::DashMap;
use futures::Stream;
use orgchart_core::{ChatMessage, Department, DomainEvent, Employee, StatusChangeEvent};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use super::topics::Topic;

/// Default per-topic buffer size
pub const DEFAULT_CAPACITY: usize = 256;

/// Live feed of events on one topic
pub type EventStream = Pin<Box<dyn Stream<Item = DomainEvent> + Send>>;

/// Per-subscription predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionFilter {
    /// Only messages addressed to this recipient
    Recipient(String),
}

impl SubscriptionFilter {
    /// Events that carry no recipient are never filtered out
    #[must_use]
    pub fn matches(&self, event: &DomainEvent) -> bool {
        match self {
            Self::Recipient(wanted) => event
                .recipient_id()
                .is_none_or(|recipient| recipient == wanted),
        }
    }
}

struct BusInner {
    topics: DashMap<Topic, broadcast::Sender<DomainEvent>>,
    capacity: usize,
}

/// Topic-addressed publish/subscribe
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per topic
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(BusInner {
                topics: DashMap::new(),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Deliver `event` to every current subscriber of `topic`.
    ///
    /// Returns the number of subscribers reached; zero is not an error.
    pub fn publish(&self, topic: Topic, event: DomainEvent) -> usize {
        let Some(sender) = self.inner.topics.get(&topic).map(|s| s.clone()) else {
            tracing::trace!(topic = %topic, "No subscribers, dropping event");
            return 0;
        };

        let event_type = event.event_type();
        let receivers = sender.send(event).unwrap_or(0);
        tracing::debug!(topic = %topic, event_type, receivers, "Published event");
        receivers
    }

    /// Subscribe to `topic`, optionally filtering per event
    pub fn subscribe(&self, topic: Topic, filter: Option<SubscriptionFilter>) -> EventStream {
        let receiver = self
            .inner
            .topics
            .entry(topic)
            .or_insert_with(|| broadcast::channel(self.inner.capacity).0)
            .subscribe();

        let stream = BroadcastStream::new(receiver).filter_map(move |item| match item {
            Ok(event) if filter.as_ref().is_none_or(|f| f.matches(&event)) => Some(event),
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(topic = %topic, skipped, "Subscriber lagged, events dropped");
                None
            }
        });

        Box::pin(stream)
    }

    /// Number of live subscriptions on `topic`
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.inner
            .topics
            .get(&topic)
            .map_or(0, |sender| sender.receiver_count())
    }

    // =========================================================================
    // Convenience publishers
    // =========================================================================

    pub fn publish_status_changed(&self, event: StatusChangeEvent) -> usize {
        self.publish(
            Topic::EmployeeStatusChanged,
            DomainEvent::EmployeeStatusChanged(event),
        )
    }

    pub fn publish_employee_created(&self, employee: Employee) -> usize {
        self.publish(Topic::EmployeeCreated, DomainEvent::EmployeeCreated(employee))
    }

    pub fn publish_employee_updated(&self, employee: Employee) -> usize {
        self.publish(Topic::EmployeeUpdated, DomainEvent::EmployeeUpdated(employee))
    }

    pub fn publish_employee_deleted(&self, employee_id: impl Into<String>) -> usize {
        self.publish(
            Topic::EmployeeDeleted,
            DomainEvent::EmployeeDeleted(employee_id.into()),
        )
    }

    pub fn publish_department_created(&self, department: Department) -> usize {
        self.publish(
            Topic::DepartmentCreated,
            DomainEvent::DepartmentCreated(department),
        )
    }

    pub fn publish_department_updated(&self, department: Department) -> usize {
        self.publish(
            Topic::DepartmentUpdated,
            DomainEvent::DepartmentUpdated(department),
        )
    }

    pub fn publish_department_deleted(&self, department_id: impl Into<String>) -> usize {
        self.publish(
            Topic::DepartmentDeleted,
            DomainEvent::DepartmentDeleted(department_id.into()),
        )
    }

    pub fn publish_message_sent(&self, message: ChatMessage) -> usize {
        self.publish(Topic::MessageSent, DomainEvent::MessageSent(message))
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("topics", &self.inner.topics.len())
            .field("capacity", &self.inner.capacity)
            .finish()
    }
}
