//! Request handlers, one module per feature area.

pub mod activities;
pub mod ai_assist;
pub mod auth;
pub mod emails;
pub mod health;
pub mod leads;
