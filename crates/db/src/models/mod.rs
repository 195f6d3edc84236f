//! Row models and request DTOs, one module per table.

pub mod account;
pub mod activity;
pub mod contact;
pub mod lead;
pub mod opportunity;
pub mod user;
