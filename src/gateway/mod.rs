//! Boundary between the workflows and the portal's REST backend.
//!
//! Workflows depend on the [`PortalGateway`] trait so they can be exercised
//! in isolation; [`HttpPortalGateway`] is the production implementation.
//! Every submission is a single attempt: one round trip, no automatic
//! retry, and transport errors are caught here instead of propagating.

mod http;

pub use http::HttpPortalGateway;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::payload::FormPayload;
use crate::session::UserRole;
use crate::workflows::procurement::domain::{ApplicationId, ApplicationStatus, AppliedServiceView};

/// Terminal result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// 200/201 with the server-returned entity, used immediately for
    /// follow-up navigation or display.
    Success(Value),
    /// 409: the backend already holds an equivalent record.
    Conflict(String),
    /// Any other non-2xx response or a transport failure. Recoverable by
    /// a user-initiated retry.
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn entity(&self) -> Option<&Value> {
        match self {
            SubmissionOutcome::Success(entity) => Some(entity),
            _ => None,
        }
    }
}

/// Failures on the JSON (non-multipart) endpoints.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

/// Acknowledgement shape shared by the sign-in and password-reset
/// endpoints: `{success, message, data?}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Status change sent by the staff review flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    pub comments: String,
}

/// The portal's REST surface as the workflows consume it.
pub trait PortalGateway: Send + Sync {
    /// POST multipart `/api/procure/supplier-register`.
    fn register_supplier(&self, payload: &FormPayload) -> SubmissionOutcome;

    /// POST multipart `/api/procure/apply`.
    fn submit_application(&self, payload: &FormPayload) -> SubmissionOutcome;

    /// POST multipart `/api/procure/add-service`.
    fn post_procurement(&self, payload: &FormPayload) -> SubmissionOutcome;

    /// POST JSON `/api/staff` with a cleaned staff-details record.
    fn submit_staff_details(&self, record: &Value) -> SubmissionOutcome;

    /// PUT JSON `/api/procure/applied/:applicationID/status-update`.
    fn update_application_status(
        &self,
        application_id: &ApplicationId,
        update: &StatusUpdate,
    ) -> Result<AppliedServiceView, GatewayError>;

    /// POST JSON `/api/procure/sign-in`.
    fn sign_in(&self, email: &str, password: &str, role: UserRole)
        -> Result<AuthAck, GatewayError>;

    /// POST JSON `/api/procure/request-password-reset`.
    fn request_password_reset(&self, email: &str) -> Result<AuthAck, GatewayError>;

    /// POST JSON `/api/procure/validate-otp-password-reset`.
    fn validate_reset_otp(&self, email: &str, code: &str) -> Result<AuthAck, GatewayError>;

    /// POST JSON `/api/procure/set-new-password`.
    fn set_new_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<AuthAck, GatewayError>;
}
