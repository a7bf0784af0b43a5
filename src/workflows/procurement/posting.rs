//! Staff publishing of a procurement opportunity.
//!
//! Unlike the supplier-facing multipart forms, the list sections here are
//! serialized as JSON strings inside the multipart body; the backend
//! parses them back into arrays.

use chrono::NaiveDate;
use tracing::info;

use crate::forms::attachment::{AttachmentError, FileCandidate, FileConstraints, UploadSlot};
use crate::forms::list::ListEditor;
use crate::forms::payload::{ArrayEncoding, FormPayload};
use crate::forms::validators::required_text;
use crate::gateway::{PortalGateway, SubmissionOutcome};
use crate::session::SessionHandle;

#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    #[error("Please fill in all required fields before proceeding.")]
    MissingRequiredFields,
    #[error("an active staff session is required to publish")]
    NoStaffSession,
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

/// One opportunity being drafted for publication.
#[derive(Debug)]
pub struct ProcurementPostForm {
    created_by: String,
    category: String,
    title: String,
    introduction: String,
    description: String,
    issuance_date: Option<NaiveDate>,
    submission_deadline: Option<NaiveDate>,
    questions_deadline: Option<NaiveDate>,
    contract_award_date: Option<NaiveDate>,
    deliverables: ListEditor,
    submission_requirements: ListEditor,
    evaluation_criteria: ListEditor,
    terms_and_conditions: ListEditor,
    other_documents: UploadSlot,
    created_post_id: Option<String>,
}

impl ProcurementPostForm {
    /// Open a draft. The author is taken from the injected staff session.
    pub fn open(session: &SessionHandle) -> Result<Self, PostingError> {
        let created_by = session
            .load()
            .and_then(|info| info.staff_id)
            .ok_or(PostingError::NoStaffSession)?;

        Ok(Self {
            created_by,
            ..Self::empty()
        })
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.category = value.into();
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
    }

    pub fn set_introduction(&mut self, value: impl Into<String>) {
        self.introduction = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_issuance_date(&mut self, date: NaiveDate) {
        self.issuance_date = Some(date);
    }

    pub fn set_submission_deadline(&mut self, date: NaiveDate) {
        self.submission_deadline = Some(date);
    }

    pub fn set_questions_deadline(&mut self, date: NaiveDate) {
        self.questions_deadline = Some(date);
    }

    pub fn set_contract_award_date(&mut self, date: NaiveDate) {
        self.contract_award_date = Some(date);
    }

    pub fn deliverables(&mut self) -> &mut ListEditor {
        &mut self.deliverables
    }

    pub fn submission_requirements(&mut self) -> &mut ListEditor {
        &mut self.submission_requirements
    }

    pub fn evaluation_criteria(&mut self) -> &mut ListEditor {
        &mut self.evaluation_criteria
    }

    /// Optional section; an all-blank editor is simply omitted.
    pub fn terms_and_conditions(&mut self) -> &mut ListEditor {
        &mut self.terms_and_conditions
    }

    pub fn attach_other_documents(&mut self, file: FileCandidate) -> Result<(), PostingError> {
        Ok(self.other_documents.attach(file)?)
    }

    /// Identifier of the published post, once submission succeeded.
    pub fn created_post_id(&self) -> Option<&str> {
        self.created_post_id.as_deref()
    }

    fn validate(&self) -> Result<(), PostingError> {
        let texts_ok = [
            &self.category,
            &self.title,
            &self.introduction,
            &self.description,
        ]
        .iter()
        .all(|value| required_text(value));
        let dates_ok = self.issuance_date.is_some()
            && self.submission_deadline.is_some()
            && self.questions_deadline.is_some()
            && self.contract_award_date.is_some();
        let lists_ok = !self.deliverables.is_empty()
            && !self.submission_requirements.is_empty()
            && !self.evaluation_criteria.is_empty();

        if texts_ok && dates_ok && lists_ok {
            Ok(())
        } else {
            Err(PostingError::MissingRequiredFields)
        }
    }

    fn build_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        payload.push_scalar("createdBy", self.created_by.clone());
        payload.push_scalar("category", self.category.clone());
        payload.push_scalar("title", self.title.clone());
        payload.push_scalar("introduction", self.introduction.clone());
        payload.push_scalar("description", self.description.clone());
        for (name, date) in [
            ("issuanceDate", self.issuance_date),
            ("submissionDeadline", self.submission_deadline),
            ("questionsDeadline", self.questions_deadline),
            ("contractAwardDate", self.contract_award_date),
        ] {
            if let Some(date) = date {
                payload.push_scalar(name, date.format("%Y-%m-%d").to_string());
            }
        }
        payload.push_array(
            "deliverables",
            self.deliverables.values(),
            ArrayEncoding::JsonString,
        );
        payload.push_array(
            "submissionRequirements",
            self.submission_requirements.values(),
            ArrayEncoding::JsonString,
        );
        payload.push_array(
            "evaluationCriteria",
            self.evaluation_criteria.values(),
            ArrayEncoding::JsonString,
        );
        let terms = self.terms_and_conditions.values();
        if !terms.is_empty() {
            payload.push_array("termsAndConditions", terms, ArrayEncoding::JsonString);
        }
        if let Some(file) = self.other_documents.file() {
            payload.push_file(self.other_documents.key(), file.clone());
        }
        payload
    }

    /// Validate and publish. A success clears the draft for the next post
    /// and records the new post's identifier.
    pub fn submit(&mut self, gateway: &dyn PortalGateway) -> Result<SubmissionOutcome, PostingError> {
        self.validate()?;

        let payload = self.build_payload();
        let outcome = gateway.post_procurement(&payload);
        if let SubmissionOutcome::Success(body) = &outcome {
            let post_id = body
                .pointer("/data/procureID")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);
            info!(post = post_id.as_deref().unwrap_or("unknown"), "opportunity published");
            let created_by = std::mem::take(&mut self.created_by);
            *self = Self {
                created_by,
                ..Self::empty()
            };
            self.created_post_id = post_id;
        }
        Ok(outcome)
    }

    fn empty() -> Self {
        Self {
            created_by: String::new(),
            category: String::new(),
            title: String::new(),
            introduction: String::new(),
            description: String::new(),
            issuance_date: None,
            submission_deadline: None,
            questions_deadline: None,
            contract_award_date: None,
            deliverables: ListEditor::new(),
            submission_requirements: ListEditor::new(),
            evaluation_criteria: ListEditor::new(),
            terms_and_conditions: ListEditor::new(),
            other_documents: UploadSlot::new(
                "otherDocuments",
                FileConstraints::new(&["pdf", "doc", "docx"], 5.0),
            ),
            created_post_id: None,
        }
    }
}
