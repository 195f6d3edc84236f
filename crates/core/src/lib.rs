//! Domain core for the atrium CRM backend.
//!
//! Pure types and validation logic shared by every other crate: the
//! activity-payload validator, the AI-assist request contracts, and the
//! error taxonomy. No I/O and no async -- everything here is safe to call
//! from any context.

pub mod activity;
pub mod ai_assist;
pub mod error;
pub mod types;
pub mod validation;
