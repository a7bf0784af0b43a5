//! Password reset: request an OTP by email, validate it, set a new
//! password. Each stage carries forward exactly the context the next
//! backend call needs, so a step can never run against stale input.

use tracing::info;

use crate::forms::validators::PasswordChecklist;
use crate::gateway::{GatewayError, PortalGateway};

/// Where the reset stands; later stages carry the verified context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetStage {
    Request,
    ValidateOtp { email: String },
    SetPassword { email: String, code: String },
    Completed,
}

#[derive(Debug, thiserror::Error)]
pub enum ResetError {
    #[error("{0}")]
    Rejected(String),
    #[error("{}", PasswordChecklist::REQUIREMENTS_MESSAGE)]
    WeakPassword,
    #[error("this step is not available yet; start over from the reset request")]
    MissingContext,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug)]
pub struct PasswordResetFlow {
    stage: ResetStage,
}

impl Default for PasswordResetFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordResetFlow {
    pub fn new() -> Self {
        Self {
            stage: ResetStage::Request,
        }
    }

    pub fn stage(&self) -> &ResetStage {
        &self.stage
    }

    /// Ask the backend to email an OTP to `email`. May be called from any
    /// stage; it always restarts the flow.
    pub fn request(
        &mut self,
        gateway: &dyn PortalGateway,
        email: &str,
    ) -> Result<(), ResetError> {
        self.stage = ResetStage::Request;
        let ack = gateway.request_password_reset(email)?;
        if !ack.success {
            return Err(ResetError::Rejected(ack.message));
        }
        self.stage = ResetStage::ValidateOtp {
            email: email.to_string(),
        };
        Ok(())
    }

    /// Check the user-entered OTP. A rejected code keeps the stage so the
    /// user can re-enter it; calling out of order restarts the flow.
    pub fn validate_otp(
        &mut self,
        gateway: &dyn PortalGateway,
        code: &str,
    ) -> Result<(), ResetError> {
        let email = match &self.stage {
            ResetStage::ValidateOtp { email } => email.clone(),
            _ => {
                self.stage = ResetStage::Request;
                return Err(ResetError::MissingContext);
            }
        };

        let ack = gateway.validate_reset_otp(&email, code)?;
        if !ack.success {
            return Err(ResetError::Rejected(ack.message));
        }
        self.stage = ResetStage::SetPassword {
            email,
            code: code.to_string(),
        };
        Ok(())
    }

    /// Set the new password using the validated OTP context. The same
    /// checklist that gates registration gates the replacement password.
    pub fn set_password(
        &mut self,
        gateway: &dyn PortalGateway,
        password: &str,
        confirmation: &str,
    ) -> Result<(), ResetError> {
        let (email, code) = match &self.stage {
            ResetStage::SetPassword { email, code } => (email.clone(), code.clone()),
            _ => {
                self.stage = ResetStage::Request;
                return Err(ResetError::MissingContext);
            }
        };

        if !PasswordChecklist::evaluate(password, confirmation).satisfied() {
            return Err(ResetError::WeakPassword);
        }

        let ack = gateway.set_new_password(&email, &code, password)?;
        if !ack.success {
            return Err(ResetError::Rejected(ack.message));
        }
        info!("password reset completed");
        self.stage = ResetStage::Completed;
        Ok(())
    }
}
