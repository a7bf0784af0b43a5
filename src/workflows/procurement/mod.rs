//! Procurement-side workflows: supplier registration, applying to a
//! published opportunity, staff posting of opportunities, and staff status
//! review.

pub mod application;
pub mod domain;
pub mod posting;
pub mod registration;
pub mod status;

pub use application::{ApplicationError, ApplicationStage, ProcurementApplicationForm};
pub use domain::{
    ApplicationId, ApplicationStatus, AppliedServiceView, ProcurementId, SupplierId,
};
pub use posting::{PostingError, ProcurementPostForm};
pub use registration::{RegistrationError, RegistrationProgress, SupplierRegistrationForm};
pub use status::{StatusTransitionFlow, StatusUpdateError, StatusView};
