//! Table schema validation.
//!
//! Checks that a decoded table can be turned into a declaration whose
//! members are all named and distinct.

use crate::error::SchemaError;
use crate::types::TableSchema;
use std::collections::HashSet;

/// Validates a table schema.
///
/// # Arguments
/// * `table` - The table to validate
///
/// # Errors
/// Returns `SchemaError` if a field has an empty name or two fields share a
/// name.
pub fn validate_table(table: &TableSchema) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for (position, field) in table.fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(SchemaError::EmptyFieldName {
                table: table.identifier.clone(),
                position,
            });
        }

        // Column names are case-insensitive in the catalog.
        if !seen_names.insert(field.name.to_ascii_lowercase()) {
            return Err(SchemaError::DuplicateField {
                table: table.identifier.clone(),
                field: field.name.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    #[test]
    fn test_validate_valid_table() {
        let table = TableSchema::new("stories", "p:d.stories")
            .with_field("id", FieldType::Integer)
            .with_field("title", FieldType::String);

        assert!(validate_table(&table).is_ok());
    }

    #[test]
    fn test_validate_table_without_fields() {
        let table = TableSchema::new("empty", "p:d.empty");
        assert!(validate_table(&table).is_ok());
    }

    #[test]
    fn test_validate_empty_field_name() {
        let table = TableSchema::new("t", "p:d.t")
            .with_field("a", FieldType::String)
            .with_field("", FieldType::String);

        let result = validate_table(&table);
        assert!(matches!(
            result,
            Err(SchemaError::EmptyFieldName { position: 1, .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_field_ignores_case() {
        let table = TableSchema::new("t", "p:d.t")
            .with_field("Name", FieldType::String)
            .with_field("name", FieldType::String);

        let err = validate_table(&table).unwrap_err();
        assert_eq!(err.to_string(), "duplicate field 'name' in table 't'");
    }
}
