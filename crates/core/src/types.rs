//! Shared primitive aliases and the core entity-type enum.

use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The kind of CRM record an activity or AI request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Account,
    Contact,
    Lead,
    Opportunity,
}

impl EntityType {
    /// The wire/database representation of this entity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Account => "account",
            EntityType::Contact => "contact",
            EntityType::Lead => "lead",
            EntityType::Opportunity => "opportunity",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
