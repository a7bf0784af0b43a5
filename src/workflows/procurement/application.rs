//! Supplier application against a published procurement opportunity.
//!
//! Four documents are mandatory (incorporation certificate, budget,
//! proposal, first team-CV batch), a second CV batch is optional for
//! oversized combined CVs, and the terms checkbox gates everything.
//! Submission passes through an explicit confirmation step because an
//! accepted application can no longer be modified.

use serde_json::Value;
use tracing::info;

use crate::forms::attachment::{AttachmentError, FileCandidate, FileConstraints, UploadSlot};
use crate::forms::payload::FormPayload;
use crate::gateway::{PortalGateway, SubmissionOutcome};
use crate::session::SessionHandle;

use super::domain::{ProcurementId, SupplierId};

pub const DUPLICATE_APPLICATION_MESSAGE: &str = "You already applied for this Procurement.";

/// Where the application sits between editing and acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStage {
    Editing,
    /// Validation passed; waiting for the user to confirm the one-shot
    /// submission.
    AwaitingConfirmation,
    Submitted,
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("You must accept the Terms and Conditions to apply.")]
    TermsNotAccepted,
    #[error("All documents are required.")]
    MissingDocuments,
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error("an active supplier session is required to apply")]
    NoSupplierSession,
    #[error("submission must be confirmed first")]
    NotConfirmed,
    #[error("this application was already submitted")]
    AlreadySubmitted,
}

/// One application workflow instance, owning its document slots.
#[derive(Debug)]
pub struct ProcurementApplicationForm {
    procurement_id: ProcurementId,
    supplier_id: SupplierId,
    incorporation_certificate: UploadSlot,
    budget: UploadSlot,
    proposal: UploadSlot,
    team_cv: UploadSlot,
    team_cv_batch2: UploadSlot,
    terms_accepted: bool,
    stage: ApplicationStage,
    submitted_entity: Option<Value>,
}

impl ProcurementApplicationForm {
    /// Open an application for `procurement_id`. The supplier identity is
    /// taken from the injected session; staff accounts cannot apply.
    pub fn open(
        procurement_id: ProcurementId,
        session: &SessionHandle,
    ) -> Result<Self, ApplicationError> {
        let supplier_id = session
            .load()
            .and_then(|info| info.supplier_id)
            .ok_or(ApplicationError::NoSupplierSession)?;

        Ok(Self {
            procurement_id,
            supplier_id: SupplierId(supplier_id),
            incorporation_certificate: UploadSlot::new(
                "incorporationCertificate",
                FileConstraints::new(&["pdf"], 30.0),
            ),
            budget: UploadSlot::new(
                "budget",
                FileConstraints::new(&["docx", "doc", "pdf", "xlsx", "xls", "ods", "csv"], 10.0),
            ),
            proposal: UploadSlot::new("otherDocument", FileConstraints::new(&["pdf"], 30.0)),
            team_cv: UploadSlot::new("teamCv", FileConstraints::new(&["pdf"], 30.0)),
            team_cv_batch2: UploadSlot::new("teamCv2", FileConstraints::new(&["pdf"], 30.0)),
            terms_accepted: false,
            stage: ApplicationStage::Editing,
            submitted_entity: None,
        })
    }

    pub fn stage(&self) -> ApplicationStage {
        self.stage
    }

    pub fn procurement_id(&self) -> &ProcurementId {
        &self.procurement_id
    }

    pub fn attach_incorporation_certificate(
        &mut self,
        file: FileCandidate,
    ) -> Result<(), ApplicationError> {
        Ok(self.incorporation_certificate.attach(file)?)
    }

    pub fn attach_budget(&mut self, file: FileCandidate) -> Result<(), ApplicationError> {
        Ok(self.budget.attach(file)?)
    }

    pub fn attach_proposal(&mut self, file: FileCandidate) -> Result<(), ApplicationError> {
        Ok(self.proposal.attach(file)?)
    }

    pub fn attach_team_cv(&mut self, file: FileCandidate) -> Result<(), ApplicationError> {
        Ok(self.team_cv.attach(file)?)
    }

    /// Second CV batch for combined CVs above the single-file size cap.
    pub fn attach_team_cv_batch2(&mut self, file: FileCandidate) -> Result<(), ApplicationError> {
        Ok(self.team_cv_batch2.attach(file)?)
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    fn required_slots(&self) -> [&UploadSlot; 4] {
        [
            &self.incorporation_certificate,
            &self.budget,
            &self.proposal,
            &self.team_cv,
        ]
    }

    /// Gate the submission: terms first, then document completeness. On
    /// success the workflow waits for an explicit confirmation.
    pub fn request_confirmation(&mut self) -> Result<(), ApplicationError> {
        if self.stage == ApplicationStage::Submitted {
            return Err(ApplicationError::AlreadySubmitted);
        }
        if !self.terms_accepted {
            return Err(ApplicationError::TermsNotAccepted);
        }
        if self.required_slots().iter().any(|slot| !slot.is_filled()) {
            return Err(ApplicationError::MissingDocuments);
        }
        self.stage = ApplicationStage::AwaitingConfirmation;
        Ok(())
    }

    pub fn cancel_confirmation(&mut self) {
        if self.stage == ApplicationStage::AwaitingConfirmation {
            self.stage = ApplicationStage::Editing;
        }
    }

    fn build_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        for slot in self.required_slots() {
            if let Some(file) = slot.file() {
                payload.push_file(slot.key(), file.clone());
            }
        }
        if let Some(file) = self.team_cv_batch2.file() {
            payload.push_file(self.team_cv_batch2.key(), file.clone());
        }
        payload.push_scalar("procurementID", self.procurement_id.0.clone());
        payload.push_scalar("supplierID", self.supplier_id.0.clone());
        payload
    }

    /// Dispatch the confirmed application: exactly one POST to the apply
    /// endpoint. A duplicate application surfaces as a Conflict with the
    /// portal's message; other failures keep the form retryable.
    pub fn confirm_submit(
        &mut self,
        gateway: &dyn PortalGateway,
    ) -> Result<SubmissionOutcome, ApplicationError> {
        match self.stage {
            ApplicationStage::AwaitingConfirmation => {}
            ApplicationStage::Submitted => return Err(ApplicationError::AlreadySubmitted),
            ApplicationStage::Editing => return Err(ApplicationError::NotConfirmed),
        }

        let payload = self.build_payload();
        let outcome = gateway.submit_application(&payload);

        let outcome = match outcome {
            SubmissionOutcome::Success(body) => {
                info!(procurement = %self.procurement_id.0, "application submitted");
                self.stage = ApplicationStage::Submitted;
                let entity = body.get("data").cloned().unwrap_or(body);
                self.submitted_entity = Some(entity.clone());
                SubmissionOutcome::Success(entity)
            }
            SubmissionOutcome::Conflict(_) => {
                self.stage = ApplicationStage::Editing;
                SubmissionOutcome::Conflict(DUPLICATE_APPLICATION_MESSAGE.to_string())
            }
            failure @ SubmissionOutcome::Failure(_) => {
                self.stage = ApplicationStage::Editing;
                failure
            }
        };

        Ok(outcome)
    }

    /// The application entity returned by the backend, available once the
    /// submission succeeded (drives the status follow-up view).
    pub fn submitted_application(&self) -> Option<&Value> {
        self.submitted_entity.as_ref()
    }
}
