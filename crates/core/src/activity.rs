//! Activity types and the payload validator.
//!
//! An activity is a timestamped record attached to a CRM entity, carrying a
//! type tag and a type-specific payload. The payload shape is fully
//! determined by the tag: [`validate_payload`] looks the tag up in a static
//! tag-to-schema table and checks the untrusted JSON body field by field
//! against that variant's declarative rules. Adding a new activity type is
//! one new entry in [`PAYLOAD_SCHEMAS`].
//!
//! Validation is pure and fail-fast. On success only the fields declared
//! for the variant are returned; unknown extra fields are dropped, not
//! rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::ValidationError;

/// The closed set of activity type tags.
///
/// The last three are system-generated: they carry no user-submitted
/// payload and cannot be logged through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Note,
    Call,
    Meeting,
    Email,
    Task,
    AiSummary,
    StageChange,
    AiRecommendation,
    FileUploaded,
    FileDeleted,
}

impl ActivityType {
    /// The wire/database tag for this activity type.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ActivityType::Note => "note",
            ActivityType::Call => "call",
            ActivityType::Meeting => "meeting",
            ActivityType::Email => "email",
            ActivityType::Task => "task",
            ActivityType::AiSummary => "ai_summary",
            ActivityType::StageChange => "stage_change",
            ActivityType::AiRecommendation => "ai_recommendation",
            ActivityType::FileUploaded => "file_uploaded",
            ActivityType::FileDeleted => "file_deleted",
        }
    }

    /// Parse a wire tag. Returns `None` for tags outside the closed set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "note" => Some(ActivityType::Note),
            "call" => Some(ActivityType::Call),
            "meeting" => Some(ActivityType::Meeting),
            "email" => Some(ActivityType::Email),
            "task" => Some(ActivityType::Task),
            "ai_summary" => Some(ActivityType::AiSummary),
            "stage_change" => Some(ActivityType::StageChange),
            "ai_recommendation" => Some(ActivityType::AiRecommendation),
            "file_uploaded" => Some(ActivityType::FileUploaded),
            "file_deleted" => Some(ActivityType::FileDeleted),
        _ => None,
        }
    }

    /// Whether users may log this activity type directly. System-only
    /// types are written by the platform, never from a request body.
    pub fn is_user_loggable(&self) -> bool {
        !matches!(
            self,
            ActivityType::AiRecommendation
                | ActivityType::FileUploaded
                | ActivityType::FileDeleted
        )
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ---------------------------------------------------------------------------
// Declarative field rules
// ---------------------------------------------------------------------------

/// What a single payload field must look like.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// A JSON string. `non_empty` additionally rejects `""`.
    Text { non_empty: bool },
    /// Any JSON number.
    Number,
    /// A string that parses as an ISO-8601 date or datetime.
    IsoDate,
    /// A string restricted to a closed set of values.
    Enum(&'static [&'static str]),
    /// A JSON object with opaque contents.
    Object,
}

/// One declared field of a payload variant.
#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    required: bool,
    kind: FieldKind,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
        kind,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        kind,
    }
}

const TEXT: FieldKind = FieldKind::Text { non_empty: false };
const NON_EMPTY_TEXT: FieldKind = FieldKind::Text { non_empty: true };

const NOTE_FIELDS: &[FieldSpec] = &[required("text", NON_EMPTY_TEXT)];

const CALL_FIELDS: &[FieldSpec] = &[
    optional("summary", TEXT),
    optional("outcome", TEXT),
    optional("nextStep", TEXT),
];

// Meetings share the call shape but are a distinct variant so they can
// diverge without a migration.
const MEETING_FIELDS: &[FieldSpec] = CALL_FIELDS;

const EMAIL_FIELDS: &[FieldSpec] = &[
    optional("subject", TEXT),
    optional("body", TEXT),
    optional("direction", FieldKind::Enum(&["inbound", "outbound"])),
];

const TASK_FIELDS: &[FieldSpec] = &[
    required("title", NON_EMPTY_TEXT),
    optional("dueAt", FieldKind::IsoDate),
    optional("status", FieldKind::Enum(&["open", "done"])),
];

const AI_SUMMARY_FIELDS: &[FieldSpec] = &[
    required("text", NON_EMPTY_TEXT),
    optional("sources", FieldKind::Object),
];

const STAGE_CHANGE_FIELDS: &[FieldSpec] = &[
    optional("fromStage", TEXT),
    optional("toStage", TEXT),
    optional("reason", TEXT),
    optional("notes", TEXT),
    optional("competitor", TEXT),
    optional("nextSteps", TEXT),
    optional("finalAmount", FieldKind::Number),
];

/// Tag-to-schema dispatch table for user-loggable activity types.
static PAYLOAD_SCHEMAS: &[(&str, &[FieldSpec])] = &[
    ("note", NOTE_FIELDS),
    ("call", CALL_FIELDS),
    ("meeting", MEETING_FIELDS),
    ("email", EMAIL_FIELDS),
    ("task", TASK_FIELDS),
    ("ai_summary", AI_SUMMARY_FIELDS),
    ("stage_change", STAGE_CHANGE_FIELDS),
];

fn schema_for(tag: &str) -> Option<&'static [FieldSpec]> {
    PAYLOAD_SCHEMAS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, schema)| *schema)
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validate an untrusted payload against the schema selected by `tag`.
///
/// Unknown tags fail with [`ValidationError::UnknownActivityType`] before
/// any field is inspected. On success the returned map carries exactly the
/// declared fields that were present in the input.
pub fn validate_payload(tag: &str, raw: &Value) -> Result<Map<String, Value>, ValidationError> {
    let schema = schema_for(tag).ok_or_else(|| ValidationError::UnknownActivityType {
        tag: tag.to_string(),
    })?;

    let empty = Map::new();
    let fields = match raw {
        Value::Object(map) => map,
        // A null/absent payload is treated as empty; required-field checks
        // then produce the precise error.
        Value::Null => &empty,
        _ => {
            return Err(ValidationError::TypeMismatch {
                field: "payload",
                expected: "object",
            })
        }
    };

    let mut validated = Map::new();
    for spec in schema {
        match fields.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(ValidationError::MissingField { field: spec.name });
                }
            }
            Some(value) => {
                check_field(spec, value)?;
                validated.insert(spec.name.to_string(), value.clone());
            }
        }
    }
    Ok(validated)
}

fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    match spec.kind {
        FieldKind::Text { non_empty } => {
            let s = as_str(spec, value)?;
            if non_empty && s.trim().is_empty() {
                return Err(ValidationError::MissingField { field: spec.name });
            }
        }
        FieldKind::Number => {
            if !value.is_number() {
                return Err(ValidationError::TypeMismatch {
                    field: spec.name,
                    expected: "number",
                });
            }
        }
        FieldKind::IsoDate => {
            let s = as_str(spec, value)?;
            if !parses_as_iso8601(s) {
                return Err(ValidationError::InvalidDateFormat { field: spec.name });
            }
        }
        FieldKind::Enum(allowed) => {
            let s = as_str(spec, value)?;
            if !allowed.contains(&s) {
                return Err(ValidationError::InvalidEnumValue {
                    field: spec.name,
                    allowed,
                });
            }
        }
        FieldKind::Object => {
            if !value.is_object() {
                return Err(ValidationError::TypeMismatch {
                    field: spec.name,
                    expected: "object",
                });
            }
        }
    }
    Ok(())
}

fn as_str<'a>(spec: &FieldSpec, value: &'a Value) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or(ValidationError::TypeMismatch {
        field: spec.name,
        expected: "string",
    })
}

/// Accepts an RFC 3339 datetime (`2025-03-31T00:00:00Z`) or a plain
/// calendar date (`2025-03-31`).
fn parses_as_iso8601(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
