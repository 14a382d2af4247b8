//! Error types for schema decoding and validation.

use thiserror::Error;

/// Error type for decoding BigQuery REST payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required member.
    #[error("missing required member '{member}' in '{context}'")]
    MissingMember {
        /// Enclosing object.
        context: String,
        /// Member name.
        member: String,
    },

    /// Invalid member value.
    #[error("invalid value '{value}' for member '{member}' in '{context}'")]
    InvalidMember {
        /// Enclosing object.
        context: String,
        /// Member name.
        member: String,
        /// Invalid value.
        value: String,
    },
}

/// Error type for table schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A field has no name.
    #[error("field #{position} of table '{table}' has an empty name")]
    EmptyFieldName {
        /// Table identifier.
        table: String,
        /// Zero-based field position.
        position: usize,
    },

    /// Two fields share a name.
    #[error("duplicate field '{field}' in table '{table}'")]
    DuplicateField {
        /// Table identifier.
        table: String,
        /// Field name.
        field: String,
    },
}

impl ParseError {
    /// Creates a missing member error.
    pub fn missing(context: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MissingMember {
            context: context.into(),
            member: member.into(),
        }
    }

    /// Creates an invalid member error.
    pub fn invalid(
        context: impl Into<String>,
        member: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidMember {
            context: context.into(),
            member: member.into(),
            value: value.into(),
        }
    }
}
