//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request. [`PresenceBridge`] is the exception: it owns its handles and runs
//! as a background task.

pub mod context;
pub mod department;
pub mod employee;
pub mod error;
pub mod message;
pub mod org_chart;
pub mod presence;
pub mod presence_bridge;
pub mod subscription;

#[cfg(test)]
mod test_support;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use department::DepartmentService;
pub use employee::EmployeeService;
pub use error::{ServiceError, ServiceResult};
pub use message::{MessageService, ANONYMOUS_SENDER};
pub use org_chart::OrgChartService;
pub use presence::PresenceService;
pub use presence_bridge::PresenceBridge;
pub use subscription::SubscriptionService;
