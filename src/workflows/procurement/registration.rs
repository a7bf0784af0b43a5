//! Supplier self-registration.
//!
//! The form collects organization details, a category selection, a
//! products/services list, contact-person details, credentials, and an
//! optional supporting document. Submission resolves the account login
//! email first (pausing when two distinct candidates are supplied), then
//! gates on the full password checklist, then performs one multipart POST.

use tracing::info;

use crate::forms::attachment::{AttachmentError, FileCandidate, FileConstraints, UploadSlot};
use crate::forms::email::{resolve_account_email, EmailResolution, EmailResolutionError};
use crate::forms::list::ListEditor;
use crate::forms::payload::{ArrayEncoding, FormPayload};
use crate::forms::validators::{required_text, PasswordChecklist};
use crate::gateway::{PortalGateway, SubmissionOutcome};

const ABOUT_MAX_CHARS: usize = 1000;
const CATEGORY_LIMIT: usize = 4;

/// Progress reported by a submission attempt: either the flow paused for
/// email disambiguation or it ran to a terminal outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationProgress {
    AwaitingEmailChoice { candidates: [String; 2] },
    Outcome(SubmissionOutcome),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Please fill in all required fields before proceeding.")]
    MissingRequiredFields,
    #[error("You can select a maximum of {CATEGORY_LIMIT} categories.")]
    TooManyCategories,
    #[error("{}", PasswordChecklist::REQUIREMENTS_MESSAGE)]
    WeakPassword,
    #[error(transparent)]
    Email(#[from] EmailResolutionError),
    #[error("selected email is not one of the provided candidates")]
    InvalidEmailChoice,
    #[error("no email selection is pending")]
    NoPendingChoice,
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    Editing,
    AwaitingEmailChoice { pending: EmailResolution },
    Succeeded,
}

/// One registration workflow instance.
#[derive(Debug)]
pub struct SupplierRegistrationForm {
    name: String,
    about: String,
    phone: String,
    email: String,
    address: String,
    country: String,
    city: String,
    contact_person: String,
    contact_person_role: String,
    contact_person_email: String,
    contact_person_phone: String,
    categories: Vec<String>,
    products_services: ListEditor,
    documents: UploadSlot,
    password: String,
    confirm_password: String,
    checklist: PasswordChecklist,
    stage: Stage,
}

impl Default for SupplierRegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            about: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            country: String::new(),
            city: String::new(),
            contact_person: String::new(),
            contact_person_role: String::new(),
            contact_person_email: String::new(),
            contact_person_phone: String::new(),
            categories: Vec::new(),
            products_services: ListEditor::new(),
            documents: UploadSlot::new("documents", FileConstraints::new(&["pdf", "doc", "docx"], 5.0)),
            password: String::new(),
            confirm_password: String::new(),
            checklist: PasswordChecklist::default(),
            stage: Stage::Editing,
        }
    }
}

impl SupplierRegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// The about text is capped at 1000 characters; input that would
    /// exceed the cap is ignored, leaving the previous value in place.
    pub fn set_about(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.chars().count() <= ABOUT_MAX_CHARS {
            self.about = value;
        }
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.address = value.into();
    }

    pub fn set_country(&mut self, value: impl Into<String>) {
        self.country = value.into();
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.city = value.into();
    }

    pub fn set_contact_person(&mut self, value: impl Into<String>) {
        self.contact_person = value.into();
    }

    pub fn set_contact_person_role(&mut self, value: impl Into<String>) {
        self.contact_person_role = value.into();
    }

    pub fn set_contact_person_email(&mut self, value: impl Into<String>) {
        self.contact_person_email = value.into();
    }

    pub fn set_contact_person_phone(&mut self, value: impl Into<String>) {
        self.contact_person_phone = value.into();
    }

    pub fn select_categories(&mut self, selection: Vec<String>) -> Result<(), RegistrationError> {
        if selection.len() > CATEGORY_LIMIT {
            return Err(RegistrationError::TooManyCategories);
        }
        self.categories = selection;
        Ok(())
    }

    pub fn products_services(&mut self) -> &mut ListEditor {
        &mut self.products_services
    }

    pub fn attach_documents(&mut self, file: FileCandidate) -> Result<(), RegistrationError> {
        Ok(self.documents.attach(file)?)
    }

    /// Both credential fields re-evaluate the checklist on every change.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.checklist = PasswordChecklist::evaluate(&self.password, &self.confirm_password);
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.confirm_password = value.into();
        self.checklist = PasswordChecklist::evaluate(&self.password, &self.confirm_password);
    }

    pub fn password_checklist(&self) -> PasswordChecklist {
        self.checklist
    }

    pub fn is_succeeded(&self) -> bool {
        self.stage == Stage::Succeeded
    }

    fn validate_required(&self) -> Result<(), RegistrationError> {
        let texts = [
            &self.name,
            &self.about,
            &self.phone,
            &self.address,
            &self.country,
            &self.city,
            &self.contact_person,
            &self.contact_person_role,
            &self.contact_person_phone,
        ];
        let texts_ok = texts.iter().all(|value| required_text(value));
        if !texts_ok || self.categories.is_empty() || self.products_services.is_empty() {
            return Err(RegistrationError::MissingRequiredFields);
        }
        Ok(())
    }

    /// Attempt the submission. When both the organization and the contact
    /// person supplied distinct emails the flow pauses until
    /// [`choose_account_email`](Self::choose_account_email) is called.
    pub fn submit(
        &mut self,
        gateway: &dyn PortalGateway,
    ) -> Result<RegistrationProgress, RegistrationError> {
        self.validate_required()?;

        match resolve_account_email(&self.email, &self.contact_person_email)? {
            EmailResolution::Resolved(account_email) => {
                let outcome = self.finish(account_email, gateway)?;
                Ok(RegistrationProgress::Outcome(outcome))
            }
            EmailResolution::NeedsChoice { candidates } => {
                self.stage = Stage::AwaitingEmailChoice {
                    pending: EmailResolution::NeedsChoice {
                        candidates: candidates.clone(),
                    },
                };
                Ok(RegistrationProgress::AwaitingEmailChoice { candidates })
            }
        }
    }

    /// Resume a paused submission with the user's explicit email choice.
    pub fn choose_account_email(
        &mut self,
        choice: &str,
        gateway: &dyn PortalGateway,
    ) -> Result<SubmissionOutcome, RegistrationError> {
        let pending = match &self.stage {
            Stage::AwaitingEmailChoice { pending } => pending.clone(),
            _ => return Err(RegistrationError::NoPendingChoice),
        };
        if !pending.permits(choice) {
            return Err(RegistrationError::InvalidEmailChoice);
        }
        self.stage = Stage::Editing;
        self.finish(choice.to_string(), gateway)
    }

    fn finish(
        &mut self,
        account_email: String,
        gateway: &dyn PortalGateway,
    ) -> Result<SubmissionOutcome, RegistrationError> {
        if !self.checklist.satisfied() {
            return Err(RegistrationError::WeakPassword);
        }

        let mut payload = FormPayload::new();
        payload.push_scalar("accountEmail", account_email);
        payload.push_scalar("name", self.name.clone());
        payload.push_scalar("about", self.about.clone());
        payload.push_scalar("phone", self.phone.clone());
        payload.push_scalar("email", self.email.clone());
        payload.push_scalar("address", self.address.clone());
        payload.push_scalar("country", self.country.clone());
        payload.push_scalar("city", self.city.clone());
        payload.push_scalar("contactPerson", self.contact_person.clone());
        payload.push_scalar("contactPersonPhone", self.contact_person_phone.clone());
        payload.push_scalar("contactPersonEmail", self.contact_person_email.clone());
        payload.push_scalar("contactPersonRole", self.contact_person_role.clone());
        payload.push_scalar("password", self.password.clone());
        payload.push_array(
            "category",
            self.categories.clone(),
            ArrayEncoding::RepeatedKey,
        );
        payload.push_array(
            "productsServices",
            self.products_services.values(),
            ArrayEncoding::RepeatedKey,
        );
        if let Some(file) = self.documents.file() {
            payload.push_file(self.documents.key(), file.clone());
        }

        let outcome = gateway.register_supplier(&payload);
        if outcome.is_success() {
            info!("supplier account created");
            self.reset();
            self.stage = Stage::Succeeded;
        }
        Ok(outcome)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
