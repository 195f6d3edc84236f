//! Field-level validation error taxonomy.
//!
//! Every validator in this crate (activity payloads, AI-assist requests)
//! reports failures through [`ValidationError`]. Validation is uniformly
//! fail-fast: the first violation encountered is returned and nothing else
//! is inspected.

/// A single field-level validation failure.
///
/// Field names refer to the JSON representation (`entityId`, `dueAt`, ...),
/// not the Rust struct fields, since that is what the caller submitted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The activity type tag is not a member of the known set.
    #[error("Unknown activity type: {tag}")]
    UnknownActivityType { tag: String },

    /// A required field is absent, null, or an empty string.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A field is present but has the wrong primitive type.
    #[error("Field '{field}' must be of type {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    /// An enum-constrained field holds a value outside its allowed set.
    #[error("Field '{field}' must be one of: {}", allowed.join(", "))]
    InvalidEnumValue {
        field: &'static str,
        allowed: &'static [&'static str],
    },

    /// A date-like field does not parse as ISO-8601.
    #[error("Field '{field}' must be an ISO-8601 date")]
    InvalidDateFormat { field: &'static str },

    /// A string field exceeds its maximum length.
    #[error("Field '{field}' must be at most {max} characters")]
    FieldLengthExceeded { field: &'static str, max: usize },

    /// An integer field is outside its allowed range.
    #[error("Field '{field}' must be between {min} and {max}")]
    ValueOutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

impl ValidationError {
    /// Stable error-kind name used as the `error` field of the HTTP
    /// failure envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::UnknownActivityType { .. } => "UNKNOWN_ACTIVITY_TYPE",
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::TypeMismatch { .. } => "TYPE_MISMATCH",
            ValidationError::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            ValidationError::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            ValidationError::FieldLengthExceeded { .. } => "FIELD_LENGTH_EXCEEDED",
            ValidationError::ValueOutOfRange { .. } => "VALUE_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = ValidationError::MissingField { field: "text" };
        assert_eq!(err.to_string(), "Missing required field: text");

        let err = ValidationError::InvalidEnumValue {
            field: "direction",
            allowed: &["inbound", "outbound"],
        };
        assert_eq!(
            err.to_string(),
            "Field 'direction' must be one of: inbound, outbound"
        );

        let err = ValidationError::ValueOutOfRange {
            field: "count",
            min: 1,
            max: 10,
        };
        assert_eq!(err.to_string(), "Field 'count' must be between 1 and 10");
    }

    #[test]
    fn kind_names_are_stable() {
        let err = ValidationError::UnknownActivityType {
            tag: "bogus".into(),
        };
        assert_eq!(err.kind(), "UNKNOWN_ACTIVITY_TYPE");

        let err = ValidationError::FieldLengthExceeded {
            field: "additionalContext",
            max: 2000,
        };
        assert_eq!(err.kind(), "FIELD_LENGTH_EXCEEDED");
    }
}
