//! Request extractors for authentication.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user (and their
//!   tenant) from a JWT Bearer token.

pub mod auth;
