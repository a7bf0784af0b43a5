//! Staff onboarding: a three-step intake form posted as one JSON record.
//!
//! Step order is bio data, then contact details, then employment details.
//! Optional fields that were never touched (or left blank) are sent as
//! explicit nulls, and the selected role is wrapped into a one-element
//! array because staff accounts may later hold several.

use serde_json::{json, Map, Value};

use crate::forms::fields::FormSession;
use crate::forms::stepper::{FormError, MultiStepForm, StepDefinition};
use crate::gateway::{PortalGateway, SubmissionOutcome};

pub use crate::forms::stepper::FormPhase;

const STEPS: [StepDefinition; 3] = [
    StepDefinition {
        title: "Bio Data",
        required: &["firstName", "surName", "gender", "dob", "nationality"],
    },
    StepDefinition {
        title: "Contact Details",
        required: &["email1", "phone1", "address1"],
    },
    StepDefinition {
        title: "Employment Details",
        required: &["staffID", "staffCategory", "roles"],
    },
];

const TEXT_FIELDS: [&str; 18] = [
    "firstName",
    "middleName",
    "surName",
    "gender",
    "nationality",
    "NIN",
    "TIN",
    "NSSF",
    "email1",
    "email2",
    "email3",
    "phone1",
    "phone2",
    "phone3",
    "address1",
    "address2",
    "staffID",
    "staffCategory",
];

/// The staff intake workflow, a thin wrapper over the step controller.
#[derive(Debug)]
pub struct StaffIntakeForm {
    form: MultiStepForm,
}

impl Default for StaffIntakeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffIntakeForm {
    pub fn new() -> Self {
        let [bio, contact, employment] = STEPS;
        Self {
            form: MultiStepForm::new(bio, vec![contact, employment]),
        }
    }

    pub fn session(&self) -> &FormSession {
        self.form.session()
    }

    pub fn session_mut(&mut self) -> &mut FormSession {
        self.form.session_mut()
    }

    pub fn current_step(&self) -> usize {
        self.form.current_step()
    }

    pub fn phase(&self) -> FormPhase {
        self.form.phase()
    }

    pub fn next(&mut self) -> Result<usize, FormError> {
        self.form.next()
    }

    pub fn prev(&mut self) -> usize {
        self.form.prev()
    }

    /// Serialize the session into the backend's staff record: every known
    /// field present, blanks as null, `roles` as a one-element array.
    fn clean_record(session: &FormSession) -> Value {
        let mut record = Map::new();
        for name in TEXT_FIELDS {
            let value = match session.text(name) {
                Some(text) if !text.trim().is_empty() => json!(text),
                _ => Value::Null,
            };
            record.insert(name.to_string(), value);
        }
        let dob = match session.date("dob") {
            Some(date) => json!(date.format("%Y-%m-%d").to_string()),
            None => Value::Null,
        };
        record.insert("dob".to_string(), dob);
        let roles = match session.text("roles") {
            Some(role) if !role.trim().is_empty() => json!([role]),
            _ => json!([]),
        };
        record.insert("roles".to_string(), roles);
        Value::Object(record)
    }

    /// Submit from the final step. The step controller gates validation
    /// and the single-pending-submission rule.
    pub fn submit(
        &mut self,
        gateway: &dyn PortalGateway,
    ) -> Result<SubmissionOutcome, FormError> {
        self.form
            .submit(|session| gateway.submit_staff_details(&Self::clean_record(session)))
    }
}
