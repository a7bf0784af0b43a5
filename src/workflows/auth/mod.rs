//! Account access: sign-in against the portal backend and the OTP-based
//! password-reset flow.

pub mod reset;

pub use reset::{PasswordResetFlow, ResetError, ResetStage};

use serde_json::Value;
use tracing::info;

use crate::gateway::{GatewayError, PortalGateway};
use crate::session::{SessionHandle, UserInfo, UserRole};

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Sign-in against the portal; on success the identity record from the
/// acknowledgement is persisted into the session.
pub struct SignInFlow {
    session: SessionHandle,
}

impl SignInFlow {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    pub fn sign_in(
        &self,
        gateway: &dyn PortalGateway,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<UserInfo, SignInError> {
        let ack = gateway.sign_in(email, password, role)?;
        if !ack.success {
            return Err(SignInError::Rejected(ack.message));
        }

        let data = ack.data.unwrap_or(Value::Null);
        let info = UserInfo {
            account_email: Self::field(&data, "email").unwrap_or_else(|| email.to_string()),
            display_name: Self::field(&data, "name").unwrap_or_default(),
            role,
            supplier_id: Self::field(&data, "supplierID"),
            staff_id: Self::field(&data, "staffID"),
        };
        self.session.save(info.clone());
        info!(role = role.label(), "signed in");
        Ok(info)
    }

    pub fn sign_out(&self) {
        self.session.clear();
    }

    fn field(data: &Value, name: &str) -> Option<String> {
        data.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
