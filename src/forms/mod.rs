//! Shared form building blocks used by every portal workflow: the field
//! session, validators, the dynamic list editor, file attachment slots, the
//! multi-step controller, and the typed submission payload builder.

pub mod attachment;
pub mod email;
pub mod fields;
pub mod list;
pub mod payload;
pub mod stepper;
pub mod validators;

pub use attachment::{AttachmentError, FileCandidate, FileConstraints, UploadSlot};
pub use email::{resolve_account_email, EmailResolution, EmailResolutionError};
pub use fields::{FieldValue, FormSession};
pub use list::ListEditor;
pub use payload::{ArrayEncoding, FormPayload, PayloadField};
pub use stepper::{FormError, FormPhase, MultiStepForm, StepDefinition};
pub use validators::{has_entries, required_text, PasswordChecklist};
