#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use procure_portal::forms::payload::FormPayload;
use procure_portal::gateway::{
    AuthAck, GatewayError, PortalGateway, StatusUpdate, SubmissionOutcome,
};
use procure_portal::session::{MemorySessionStore, SessionHandle, UserInfo, UserRole};
use procure_portal::workflows::procurement::{ApplicationId, AppliedServiceView};

/// Test double for the portal backend: returns configured responses and
/// records everything the workflows send.
pub struct RecordingGateway {
    pub submission_response: Mutex<SubmissionOutcome>,
    pub status_response: Mutex<Result<AppliedServiceView, (u16, String)>>,
    pub auth_response: Mutex<AuthAck>,
    pub payloads: Mutex<Vec<FormPayload>>,
    pub staff_records: Mutex<Vec<Value>>,
    pub status_updates: Mutex<Vec<(ApplicationId, StatusUpdate)>>,
    pub auth_requests: Mutex<Vec<Value>>,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self {
            submission_response: Mutex::new(SubmissionOutcome::Success(json!({
                "success": true,
                "data": {},
            }))),
            status_response: Mutex::new(Err((500, "no status response configured".to_string()))),
            auth_response: Mutex::new(AuthAck {
                success: true,
                message: String::new(),
                data: None,
            }),
            payloads: Mutex::new(Vec::new()),
            staff_records: Mutex::new(Vec::new()),
            status_updates: Mutex::new(Vec::new()),
            auth_requests: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(outcome: SubmissionOutcome) -> Self {
        let gateway = Self::default();
        *gateway.submission_response.lock().unwrap() = outcome;
        gateway
    }

    pub fn set_submission_response(&self, outcome: SubmissionOutcome) {
        *self.submission_response.lock().unwrap() = outcome;
    }

    pub fn set_status_response(&self, response: Result<AppliedServiceView, (u16, String)>) {
        *self.status_response.lock().unwrap() = response;
    }

    pub fn set_auth_response(&self, ack: AuthAck) {
        *self.auth_response.lock().unwrap() = ack;
    }

    pub fn last_payload(&self) -> FormPayload {
        self.payloads
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a payload was submitted")
    }

    pub fn payload_count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    fn record_payload(&self, payload: &FormPayload) -> SubmissionOutcome {
        self.payloads.lock().unwrap().push(payload.clone());
        self.submission_response.lock().unwrap().clone()
    }

    fn ack(&self, request: Value) -> Result<AuthAck, GatewayError> {
        self.auth_requests.lock().unwrap().push(request);
        Ok(self.auth_response.lock().unwrap().clone())
    }
}

impl PortalGateway for RecordingGateway {
    fn register_supplier(&self, payload: &FormPayload) -> SubmissionOutcome {
        self.record_payload(payload)
    }

    fn submit_application(&self, payload: &FormPayload) -> SubmissionOutcome {
        self.record_payload(payload)
    }

    fn post_procurement(&self, payload: &FormPayload) -> SubmissionOutcome {
        self.record_payload(payload)
    }

    fn submit_staff_details(&self, record: &Value) -> SubmissionOutcome {
        self.staff_records.lock().unwrap().push(record.clone());
        self.submission_response.lock().unwrap().clone()
    }

    fn update_application_status(
        &self,
        application_id: &ApplicationId,
        update: &StatusUpdate,
    ) -> Result<AppliedServiceView, GatewayError> {
        self.status_updates
            .lock()
            .unwrap()
            .push((application_id.clone(), update.clone()));
        self.status_response
            .lock()
            .unwrap()
            .clone()
            .map_err(|(status, message)| GatewayError::Rejected { status, message })
    }

    fn sign_in(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<AuthAck, GatewayError> {
        self.ack(json!({
            "endpoint": "sign-in",
            "email": email,
            "password": password,
            "userType": [role.label()],
        }))
    }

    fn request_password_reset(&self, email: &str) -> Result<AuthAck, GatewayError> {
        self.ack(json!({ "endpoint": "request-password-reset", "email": email }))
    }

    fn validate_reset_otp(&self, email: &str, code: &str) -> Result<AuthAck, GatewayError> {
        self.ack(json!({
            "endpoint": "validate-otp-password-reset",
            "email": email,
            "code": code,
        }))
    }

    fn set_new_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<AuthAck, GatewayError> {
        self.ack(json!({
            "endpoint": "set-new-password",
            "email": email,
            "code": code,
            "newPassword": new_password,
        }))
    }
}

pub fn supplier_session(supplier_id: &str) -> SessionHandle {
    Arc::new(MemorySessionStore::signed_in(UserInfo {
        account_email: "ops@acme.example".to_string(),
        display_name: "Acme Ltd".to_string(),
        role: UserRole::Supplier,
        supplier_id: Some(supplier_id.to_string()),
        staff_id: None,
    }))
}

pub fn staff_session(staff_id: &str) -> SessionHandle {
    Arc::new(MemorySessionStore::signed_in(UserInfo {
        account_email: "reviewer@portal.example".to_string(),
        display_name: "Procurement Reviewer".to_string(),
        role: UserRole::Staff,
        supplier_id: None,
        staff_id: Some(staff_id.to_string()),
    }))
}

pub fn empty_session() -> SessionHandle {
    Arc::new(MemorySessionStore::new())
}
