//! BigQuery to Go type mapping.

use crate::error::UnsupportedFieldType;
use bqschema_schema::FieldType;

/// Import path of the standard `time` package.
pub const IMPORT_TIME: &str = "time";
/// Import path of the civil date/time package used by the BigQuery client.
pub const IMPORT_CIVIL: &str = "cloud.google.com/go/civil";
/// Import path of the standard `math/big` package.
pub const IMPORT_MATH_BIG: &str = "math/big";

/// Go type for a catalog field type, plus the package it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// Go type expression.
    pub target_type: &'static str,
    /// Import path the type expression depends on.
    pub required_import: Option<&'static str>,
}

impl TypeMapping {
    const fn builtin(target_type: &'static str) -> Self {
        Self {
            target_type,
            required_import: None,
        }
    }

    const fn imported(target_type: &'static str, import: &'static str) -> Self {
        Self {
            target_type,
            required_import: Some(import),
        }
    }
}

/// Maps a catalog field type to the Go type the BigQuery client library
/// reads it into.
///
/// # Errors
/// Returns `UnsupportedFieldType` for nested records and for literals this
/// crate does not know.
pub fn map_field_type(field_type: &FieldType) -> Result<TypeMapping, UnsupportedFieldType> {
    // No wildcard arm: a new FieldType variant must be mapped here.
    match field_type {
        FieldType::String => Ok(TypeMapping::builtin("string")),
        FieldType::Bytes => Ok(TypeMapping::builtin("[]uint8")),
        FieldType::Integer => Ok(TypeMapping::builtin("int64")),
        FieldType::Float => Ok(TypeMapping::builtin("float64")),
        FieldType::Boolean => Ok(TypeMapping::builtin("bool")),
        FieldType::Timestamp => Ok(TypeMapping::imported("time.Time", IMPORT_TIME)),
        FieldType::Date => Ok(TypeMapping::imported("civil.Date", IMPORT_CIVIL)),
        FieldType::Time => Ok(TypeMapping::imported("civil.Time", IMPORT_CIVIL)),
        FieldType::DateTime => Ok(TypeMapping::imported("civil.DateTime", IMPORT_CIVIL)),
        FieldType::Numeric => Ok(TypeMapping::imported("*big.Rat", IMPORT_MATH_BIG)),
        // Well-known text.
        FieldType::Geography => Ok(TypeMapping::builtin("string")),
        FieldType::Record => Err(UnsupportedFieldType {
            field_type: field_type.clone(),
            reason: "nested record fields are not supported",
        }),
        FieldType::Unknown(_) => Err(UnsupportedFieldType {
            field_type: field_type.clone(),
            reason: "unknown field type",
        }),
    }
}
