//! Lead models and the conversion DTO.

use atrium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::account::Account;
use super::contact::Contact;
use super::opportunity::Opportunity;

/// Lead status values stored in `leads.status`.
pub const LEAD_STATUS_CONVERTED: &str = "converted";

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub tenant_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub converted_account_id: Option<DbId>,
    pub converted_contact_id: Option<DbId>,
    pub converted_opportunity_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    pub fn is_converted(&self) -> bool {
        self.status == LEAD_STATUS_CONVERTED
    }
}

/// DTO for `POST /api/v1/leads/{id}/convert`.
///
/// `account_name` defaults to the lead's company (or full name) when
/// omitted. An opportunity is only created when `opportunity_name` is set.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConvertLeadRequest {
    #[validate(length(min = 1, max = 255))]
    pub account_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub opportunity_name: Option<String>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
}

/// Everything created by a successful lead conversion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadConversion {
    pub lead: Lead,
    pub account: Account,
    pub contact: Contact,
    pub opportunity: Option<Opportunity>,
}
