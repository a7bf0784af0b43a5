use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{AuthAck, GatewayError, PortalGateway, StatusUpdate, SubmissionOutcome};
use crate::config::ApiConfig;
use crate::forms::payload::{ArrayEncoding, FormPayload, PayloadField};
use crate::session::UserRole;
use crate::workflows::procurement::domain::{ApplicationId, AppliedServiceView};

/// Production gateway speaking HTTP to the portal backend.
pub struct HttpPortalGateway {
    client: Client,
    api: ApiConfig,
}

impl HttpPortalGateway {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            api,
        }
    }

    fn multipart_form(payload: &FormPayload) -> Result<Form, GatewayError> {
        let mut form = Form::new();
        for field in payload.fields() {
            form = match field {
                PayloadField::Scalar { name, value } => form.text(name.clone(), value.clone()),
                PayloadField::Array {
                    name,
                    values,
                    encoding: ArrayEncoding::JsonString,
                } => form.text(name.clone(), FormPayload::encode_array(values)),
                PayloadField::Array {
                    name,
                    values,
                    encoding: ArrayEncoding::RepeatedKey,
                } => {
                    let key = format!("{name}[]");
                    values
                        .iter()
                        .fold(form, |form, value| form.text(key.clone(), value.clone()))
                }
                PayloadField::File { name, file } => {
                    let mime = mime_guess::from_path(file.name()).first_or_octet_stream();
                    let part = Part::bytes(file.bytes().to_vec())
                        .file_name(file.name().to_string())
                        .mime_str(mime.as_ref())
                        .map_err(|err| GatewayError::Transport(err.to_string()))?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }

    /// One multipart round trip; all failure modes collapse into the
    /// terminal [`SubmissionOutcome`] so nothing propagates unhandled.
    fn submit_multipart(&self, path: &str, payload: &FormPayload) -> SubmissionOutcome {
        let form = match Self::multipart_form(payload) {
            Ok(form) => form,
            Err(err) => return SubmissionOutcome::Failure(err.to_string()),
        };

        let url = self.api.endpoint(path);
        info!(%path, "dispatching multipart submission");
        match self.client.post(url).multipart(form).send() {
            Ok(response) => Self::outcome_from_response(path, response),
            Err(err) => {
                warn!(%path, error = %err, "submission transport failure");
                SubmissionOutcome::Failure(err.to_string())
            }
        }
    }

    fn outcome_from_response(path: &str, response: Response) -> SubmissionOutcome {
        let status = response.status();
        let body: Value = response.json().unwrap_or(Value::Null);

        match status {
            StatusCode::OK | StatusCode::CREATED => SubmissionOutcome::Success(body),
            StatusCode::CONFLICT => SubmissionOutcome::Conflict(Self::server_message(
                &body,
                "A matching record already exists.",
            )),
            other => {
                warn!(%path, status = other.as_u16(), "submission rejected");
                SubmissionOutcome::Failure(Self::server_message(
                    &body,
                    &format!("request failed with status {}", other.as_u16()),
                ))
            }
        }
    }

    fn server_message(body: &Value, fallback: &str) -> String {
        body.get("message")
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    }

    fn post_auth(&self, path: &str, body: Value) -> Result<AuthAck, GatewayError> {
        let url = self.api.endpoint(path);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        match response.json::<AuthAck>() {
            Ok(ack) => Ok(ack),
            Err(_) if !status.is_success() => Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: format!("request to {path} failed"),
            }),
            Err(err) => Err(GatewayError::MalformedResponse(err.to_string())),
        }
    }
}

impl PortalGateway for HttpPortalGateway {
    fn register_supplier(&self, payload: &FormPayload) -> SubmissionOutcome {
        self.submit_multipart("/api/procure/supplier-register", payload)
    }

    fn submit_application(&self, payload: &FormPayload) -> SubmissionOutcome {
        self.submit_multipart("/api/procure/apply", payload)
    }

    fn post_procurement(&self, payload: &FormPayload) -> SubmissionOutcome {
        self.submit_multipart("/api/procure/add-service", payload)
    }

    fn submit_staff_details(&self, record: &Value) -> SubmissionOutcome {
        let url = self.api.endpoint("/api/staff");
        info!("dispatching staff details");
        match self.client.post(url).json(record).send() {
            Ok(response) => Self::outcome_from_response("/api/staff", response),
            Err(err) => SubmissionOutcome::Failure(err.to_string()),
        }
    }

    fn update_application_status(
        &self,
        application_id: &ApplicationId,
        update: &StatusUpdate,
    ) -> Result<AppliedServiceView, GatewayError> {
        let url = self.api.endpoint(&format!(
            "/api/procure/applied/{}/status-update",
            application_id.0
        ));
        info!(application = %application_id.0, status = update.status.label(), "updating application status");
        let response = self
            .client
            .put(url)
            .json(update)
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().unwrap_or(Value::Null);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: Self::server_message(&body, "status update rejected"),
            });
        }

        response
            .json::<AppliedServiceView>()
            .map_err(|err| GatewayError::MalformedResponse(err.to_string()))
    }

    fn sign_in(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<AuthAck, GatewayError> {
        self.post_auth(
            "/api/procure/sign-in",
            json!({
                "email": email,
                "password": password,
                "userType": [role.label()],
            }),
        )
    }

    fn request_password_reset(&self, email: &str) -> Result<AuthAck, GatewayError> {
        self.post_auth(
            "/api/procure/request-password-reset",
            json!({ "email": email }),
        )
    }

    fn validate_reset_otp(&self, email: &str, code: &str) -> Result<AuthAck, GatewayError> {
        self.post_auth(
            "/api/procure/validate-otp-password-reset",
            json!({ "email": email, "code": code }),
        )
    }

    fn set_new_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<AuthAck, GatewayError> {
        self.post_auth(
            "/api/procure/set-new-password",
            json!({ "email": email, "code": code, "newPassword": new_password }),
        )
    }
}
