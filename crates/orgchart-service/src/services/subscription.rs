//! Subscription service
//!
//! Opens event bus feeds for remote subscribers and shapes each event into
//! the payload they receive.

use orgchart_core::DomainEvent;
use orgchart_realtime::{EventStream, SubscriptionFilter, Topic};
use tracing::{debug, instrument};

use crate::dto::EventPayload;

use super::context::ServiceContext;
use super::employee::EmployeeService;
use super::error::{ServiceError, ServiceResult};

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Subscribe to a topic by name.
    ///
    /// `messageSent` requires a recipient; no other topic accepts one.
    #[instrument(skip(self))]
    pub fn subscribe(
        &self,
        topic_name: &str,
        recipient_id: Option<String>,
    ) -> ServiceResult<EventStream> {
        let topic = Topic::parse(topic_name)
            .ok_or_else(|| ServiceError::validation(format!("Unknown topic: {topic_name}")))?;

        let filter = match (topic.supports_recipient_filter(), recipient_id) {
            (true, Some(recipient)) if !recipient.is_empty() => {
                Some(SubscriptionFilter::Recipient(recipient))
            }
            (true, _) => {
                return Err(ServiceError::validation(format!(
                    "{topic} requires a recipient_id"
                )))
            }
            (false, Some(_)) => {
                return Err(ServiceError::validation(format!(
                    "{topic} does not accept a recipient_id"
                )))
            }
            (false, None) => None,
        };

        debug!(topic = %topic, "Opening subscription");
        Ok(self.ctx.event_bus().subscribe(topic, filter))
    }

    /// What a subscriber sees for `event`.
    ///
    /// Status changes carry the employee as it is now in the store.
    pub async fn payload(&self, event: DomainEvent) -> ServiceResult<EventPayload> {
        Ok(match event {
            DomainEvent::EmployeeStatusChanged(change) => EventPayload::StatusChanged(
                EmployeeService::new(self.ctx)
                    .status_change_payload(change)
                    .await?,
            ),
            DomainEvent::EmployeeCreated(employee) | DomainEvent::EmployeeUpdated(employee) => {
                EventPayload::Employee(employee)
            }
            DomainEvent::DepartmentCreated(department)
            | DomainEvent::DepartmentUpdated(department) => EventPayload::Department(department),
            DomainEvent::EmployeeDeleted(id) | DomainEvent::DepartmentDeleted(id) => {
                EventPayload::Deleted(id)
            }
            DomainEvent::MessageSent(message) => EventPayload::Message(message),
        })
    }
}
