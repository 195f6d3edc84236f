//! JWT token handling and password hashing.

pub mod jwt;
pub mod password;
