//! Publish/subscribe event bus

mod bus;
mod topics;

pub use bus::{EventBus, EventStream, SubscriptionFilter, DEFAULT_CAPACITY};
pub use topics::Topic;
