//! Presence-to-domain bridge
//!
//! Turns homeserver presence changes into employee status updates and
//! `employeeStatusChanged` events.

use std::sync::Arc;

use orgchart_core::traits::EmployeeRepository;
use orgchart_core::StatusChangeEvent;
use orgchart_realtime::{EventBus, PresenceChangeEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn, Instrument};

use super::context::ServiceContext;

/// Resolves homeserver ids to employees and republishes their status
#[derive(Clone)]
pub struct PresenceBridge {
    employees: Arc<dyn EmployeeRepository>,
    bus: EventBus,
}

impl PresenceBridge {
    pub fn new(employees: Arc<dyn EmployeeRepository>, bus: EventBus) -> Self {
        Self { employees, bus }
    }

    /// Bridge wired to the context's store and bus
    pub fn from_context(ctx: &ServiceContext) -> Self {
        Self::new(ctx.employee_repo_handle(), ctx.event_bus().clone())
    }

    /// Apply one presence change.
    ///
    /// The first employee (in store order) carrying `change.user_id` gets the
    /// new status, then the status event is published. Returns `None` when no
    /// employee matches or the store fails; neither is reported further.
    #[instrument(skip(self, change), fields(user_id = %change.user_id, status = %change.status))]
    pub async fn handle_presence_change(
        &self,
        change: &PresenceChangeEvent,
    ) -> Option<StatusChangeEvent> {
        let employees = match self.employees.get_all_employees().await {
            Ok(employees) => employees,
            Err(e) => {
                error!(error = %e, "Failed to load employees for presence change");
                return None;
            }
        };

        let Some(employee) = employees
            .into_iter()
            .find(|e| e.matrix_user_id.as_deref() == Some(change.user_id.as_str()))
        else {
            debug!("No employee linked to homeserver user, ignoring");
            return None;
        };

        match self
            .employees
            .update_employee_status(&employee.id, change.status)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!(employee_id = %employee.id, "Employee removed before status update");
                return None;
            }
            Err(e) => {
                error!(employee_id = %employee.id, error = %e, "Failed to update employee status");
                return None;
            }
        }

        let event = StatusChangeEvent::new(employee.id, change.status);
        self.bus.publish_status_changed(event.clone());
        info!(employee_id = %event.employee_id, "Employee status changed");
        Some(event)
    }

    /// Consume `changes` on a background task until the sender goes away.
    ///
    /// Subscribe before polling starts so the first sweep is not missed.
    pub fn spawn(self, mut changes: broadcast::Receiver<PresenceChangeEvent>) -> JoinHandle<()> {
        tokio::spawn(
            async move {
                loop {
                    match changes.recv().await {
                        Ok(change) => {
                            self.handle_presence_change(&change).await;
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Presence bridge lagged, changes dropped");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
                debug!("Presence bridge stopped");
            }
            .in_current_span(),
        )
    }
}

impl std::fmt::Debug for PresenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceBridge")
            .field("bus", &self.bus)
            .finish()
    }
}
