//! AI-assist request contracts.
//!
//! Four independent request shapes consumed by the external AI-generation
//! collaborator: email drafting, next-action suggestion, converting a
//! suggested action, and activity summarization. Each is a flat
//! field-constraint record; enum-typed fields are closed serde enums
//! (rejected at deserialization), while numeric ranges, lengths, and
//! non-emptiness are enforced by a fail-fast `validate()`.

use serde::{Deserialize, Serialize};

use crate::types::EntityType;
use crate::validation::ValidationError;

/// Maximum length of the optional `recipientEmail` field. Deliberately a
/// length cap only; the address format is not validated here.
pub const MAX_RECIPIENT_EMAIL_LEN: usize = 255;

/// Maximum length of the optional free-text `additionalContext` field.
pub const MAX_ADDITIONAL_CONTEXT_LEN: usize = 2000;

/// Allowed range and default for [`NextActionsRequest::count`].
pub const MIN_ACTION_COUNT: i64 = 1;
pub const MAX_ACTION_COUNT: i64 = 10;
pub const DEFAULT_ACTION_COUNT: i64 = 5;

/// Allowed range and default for [`GenerateSummaryRequest::days`].
pub const MIN_SUMMARY_DAYS: i64 = 1;
pub const MAX_SUMMARY_DAYS: i64 = 365;
pub const DEFAULT_SUMMARY_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Draft email
// ---------------------------------------------------------------------------

/// Entity types the email drafter accepts. Its own local enum rather than
/// [`EntityType`]: the drafter's allowed set is owned by this request and
/// may diverge from the shared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftEmailEntityType {
    Opportunity,
    Contact,
    Lead,
    Account,
}

/// What the drafted email is trying to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailIntent {
    FollowUp,
    Recap,
    Pricing,
    NextSteps,
    ReEngage,
    Intro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTone {
    Friendly,
    Professional,
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailLength {
    Short,
    Medium,
}

/// Request to draft an outbound email for a CRM entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEmailRequest {
    pub entity_type: DraftEmailEntityType,
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<EmailIntent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<EmailTone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<EmailLength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

impl DraftEmailRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("entityId", &self.entity_id)?;
        check_max_len(
            "recipientEmail",
            self.recipient_email.as_deref(),
            MAX_RECIPIENT_EMAIL_LEN,
        )?;
        check_max_len(
            "additionalContext",
            self.additional_context.as_deref(),
            MAX_ADDITIONAL_CONTEXT_LEN,
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Next actions
// ---------------------------------------------------------------------------

/// Request for suggested next actions on a CRM entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextActionsRequest {
    pub entity_type: EntityType,
    pub entity_id: String,
    /// Number of actions to suggest. Defaults to
    /// [`DEFAULT_ACTION_COUNT`]; out-of-range values fail validation
    /// rather than being clamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl NextActionsRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("entityId", &self.entity_id)?;
        if let Some(count) = self.count {
            if !(MIN_ACTION_COUNT..=MAX_ACTION_COUNT).contains(&count) {
                return Err(ValidationError::ValueOutOfRange {
                    field: "count",
                    min: MIN_ACTION_COUNT,
                    max: MAX_ACTION_COUNT,
                });
            }
        }
        Ok(())
    }

    /// Effective action count after applying the default.
    pub fn count(&self) -> i64 {
        self.count.unwrap_or(DEFAULT_ACTION_COUNT)
    }

    /// Copy of the request with the effective count filled in, so the
    /// default is explicit on the wire rather than left to the provider.
    pub fn with_defaults(self) -> Self {
        Self {
            count: Some(self.count()),
            ..self
        }
    }
}

/// Request to convert one previously suggested action. `actionIndex` is a
/// position in the generated recommendation list; bounds checking against
/// the actual list is the AI collaborator's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertActionRequest {
    pub action_index: u32,
}

impl ConvertActionRequest {
    // Non-negativity is carried by the unsigned type; nothing further to
    // check at this layer.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Request to summarize recent activity on a CRM entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummaryRequest {
    pub entity_type: EntityType,
    pub entity_id: String,
    /// Lookback window in days. Defaults to [`DEFAULT_SUMMARY_DAYS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
}

impl GenerateSummaryRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("entityId", &self.entity_id)?;
        if let Some(days) = self.days {
            if !(MIN_SUMMARY_DAYS..=MAX_SUMMARY_DAYS).contains(&days) {
                return Err(ValidationError::ValueOutOfRange {
                    field: "days",
                    min: MIN_SUMMARY_DAYS,
                    max: MAX_SUMMARY_DAYS,
                });
            }
        }
        Ok(())
    }

    /// Effective lookback window after applying the default.
    pub fn days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_SUMMARY_DAYS)
    }

    /// Copy of the request with the effective lookback window filled in,
    /// so the default is explicit on the wire rather than left to the
    /// provider.
    pub fn with_defaults(self) -> Self {
        Self {
            days: Some(self.days()),
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

fn check_max_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    if let Some(s) = value {
        if s.chars().count() > max {
            return Err(ValidationError::FieldLengthExceeded { field, max });
        }
    }
    Ok(())
}
