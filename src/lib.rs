//! Workflow engine for the procurement portal.
//!
//! Staff publish procurement opportunities, suppliers register accounts and
//! apply with supporting documents, and staff track and update application
//! status. This crate implements the client-side workflow layer behind those
//! screens: form sessions, field validation, file attachment handling,
//! multi-step navigation, and the single-attempt submission protocol against
//! the portal's REST backend.

pub mod config;
pub mod forms;
pub mod gateway;
pub mod session;
pub mod telemetry;
pub mod workflows;
