//! Presence service
//!
//! Read-side access to homeserver presence and startup tracking of the
//! employees that carry a Matrix id.

use tracing::{info, instrument};

use crate::dto::PresenceStatusResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Live presence of a homeserver user.
    ///
    /// Read-only: the poller's last known statuses are left alone, so a change
    /// seen here is still reported by the next sweep. Lookup failures degrade
    /// to the cached status or `unavailable`.
    #[instrument(skip(self))]
    pub async fn get_presence(&self, matrix_user_id: &str) -> ServiceResult<PresenceStatusResponse> {
        if matrix_user_id.trim().is_empty() {
            return Err(ServiceError::validation("matrix_user_id must not be empty"));
        }

        let presence = self.ctx.presence();
        let status = presence.lookup_presence(matrix_user_id).await;

        Ok(PresenceStatusResponse {
            matrix_user_id: matrix_user_id.to_string(),
            status,
            configured: presence.is_configured(),
        })
    }

    /// Track the Matrix id of every employee currently in the store
    #[instrument(skip(self))]
    pub async fn track_known_employees(&self) -> ServiceResult<usize> {
        let presence = self.ctx.presence();
        let mut tracked = 0;
        for employee in self.ctx.employee_repo().get_all_employees().await? {
            if let Some(matrix_user_id) = employee.matrix_user_id {
                presence.track_user(matrix_user_id);
                tracked += 1;
            }
        }

        info!(count = tracked, "Tracking employee presence");
        Ok(tracked)
    }
}
