//! Staff-side status review for a submitted application.
//!
//! The view updates optimistically so the reviewer sees the change
//! immediately, then adopts the backend's confirmed record. If the
//! backend rejects the update the previous view is restored, so the
//! screen never shows a status the backend refused.

use chrono::Utc;
use tracing::warn;

use crate::gateway::{GatewayError, PortalGateway, StatusUpdate};

use super::domain::{ApplicationId, ApplicationStatus, AppliedServiceView};

/// What the review screen renders for one application.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub status: ApplicationStatus,
    pub comments: String,
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<&AppliedServiceView> for StatusView {
    fn from(record: &AppliedServiceView) -> Self {
        Self {
            status: record.status,
            comments: record.comments.clone(),
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to update status. Please try again.")]
pub struct StatusUpdateError {
    #[source]
    pub source: GatewayError,
}

/// One application's status panel. Any status may move to any other; the
/// backend owns whatever policy applies beyond that.
#[derive(Debug)]
pub struct StatusTransitionFlow {
    application_id: ApplicationId,
    view: StatusView,
}

impl StatusTransitionFlow {
    pub fn new(record: &AppliedServiceView) -> Self {
        Self {
            application_id: record.application_id.clone(),
            view: StatusView::from(record),
        }
    }

    pub fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    pub fn view(&self) -> &StatusView {
        &self.view
    }

    /// Apply `target` optimistically, dispatch the update, and either
    /// adopt the confirmed record or roll the view back.
    pub fn update(
        &mut self,
        gateway: &dyn PortalGateway,
        target: ApplicationStatus,
        comments: impl Into<String>,
    ) -> Result<&StatusView, StatusUpdateError> {
        let comments = comments.into();
        let snapshot = self.view.clone();

        self.view = StatusView {
            status: target,
            comments: comments.clone(),
            updated_at: Utc::now(),
        };

        let update = StatusUpdate {
            status: target,
            comments,
        };
        match gateway.update_application_status(&self.application_id, &update) {
            Ok(confirmed) => {
                self.view = StatusView::from(&confirmed);
                Ok(&self.view)
            }
            Err(source) => {
                warn!(application = %self.application_id.0, error = %source, "status update failed, restoring previous view");
                self.view = snapshot;
                Err(StatusUpdateError { source })
            }
        }
    }
}
