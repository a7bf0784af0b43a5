//! Portal workflows, one module per user-facing flow family.

pub mod auth;
pub mod procurement;
pub mod staff;
