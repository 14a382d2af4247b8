//! Struct declaration generation.

use crate::error::TableError;
use crate::go::naming::normalize_identifier;
use crate::go::types::map_field_type;
use bqschema_schema::{TableSchema, validate_table};
use std::collections::HashMap;

/// One table's declaration and the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Table identifier as reported by the catalog.
    pub table: String,
    /// Name of the emitted struct.
    pub type_name: String,
    /// Declaration block, ending with a blank line.
    pub code: String,
    /// Imports required by the fields, in field order, duplicates kept.
    pub imports: Vec<&'static str>,
}

/// Generator for the Go struct mirroring one table.
pub struct StructGenerator<'a> {
    table: &'a TableSchema,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(table: &'a TableSchema) -> Self {
        Self { table }
    }

    /// Generates the struct declaration.
    ///
    /// Nothing is emitted for a table that fails: either every field maps or
    /// the whole table is rejected.
    ///
    /// # Errors
    /// Returns `TableError` if the table has no identifier, fails validation,
    /// has a field of unsupported type, or two fields collide once
    /// normalized.
    pub fn generate(&self) -> Result<GeneratedUnit, TableError> {
        let table = self.table;
        if table.identifier.is_empty() {
            return Err(TableError::TableIdentifierEmpty {
                qualified_id: table.qualified_id.clone(),
            });
        }
        validate_table(table)?;

        let struct_name = normalize_identifier(&table.identifier);
        let mut output = String::new();
        let mut imports = Vec::new();
        let mut members: HashMap<String, &str> = HashMap::with_capacity(table.fields.len());

        output.push_str(&format!(
            "// {} is BigQuery Table `{}` schema struct.\n",
            struct_name, table.qualified_id
        ));
        output.push_str(&doc_line("Description: ", &table.description));
        output.push_str(&format!("type {} struct {{\n", struct_name));

        for field in &table.fields {
            let mapping =
                map_field_type(&field.field_type).map_err(|source| TableError::UnsupportedFieldType {
                    table: table.identifier.clone(),
                    field: field.name.clone(),
                    source,
                })?;

            let member = normalize_identifier(&field.name);
            if let Some(first) = members.insert(member.clone(), &field.name) {
                return Err(TableError::MemberCollision {
                    table: table.identifier.clone(),
                    first: first.to_string(),
                    second: field.name.clone(),
                    member,
                });
            }

            // The tag keeps the catalog's spelling; only the member is normalized.
            output.push_str(&format!(
                "\t{} {} `bigquery:\"{}\"`\n",
                member, mapping.target_type, field.name
            ));

            if let Some(import) = mapping.required_import {
                imports.push(import);
            }
        }

        output.push_str("}\n\n");

        Ok(GeneratedUnit {
            table: table.identifier.clone(),
            type_name: struct_name,
            code: output,
            imports,
        })
    }
}

/// Renders `prefix` + `text` as `//` comment lines, one per line of `text`.
fn doc_line(prefix: &str, text: &str) -> String {
    let mut output = String::new();
    let mut lines = text.lines();

    output.push_str(&format!("// {}{}\n", prefix, lines.next().unwrap_or("")));
    for line in lines {
        if line.is_empty() {
            output.push_str("//\n");
        } else {
            output.push_str(&format!("// {}\n", line));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use bqschema_schema::FieldType;

    fn stories() -> TableSchema {
        TableSchema::new("stories", "bigquery-public-data:hacker_news.stories")
            .with_description("Hacker News stories")
            .with_field("id", FieldType::Integer)
            .with_field("by", FieldType::String)
            .with_field("time_ts", FieldType::Timestamp)
            .with_field("dead", FieldType::Boolean)
    }

    #[test]
    fn test_generate_struct() {
        let unit = StructGenerator::new(&stories()).generate().expect("generate");

        let expected = "\
// Stories is BigQuery Table `bigquery-public-data:hacker_news.stories` schema struct.
// Description: Hacker News stories
type Stories struct {
\tId int64 `bigquery:\"id\"`
\tBy string `bigquery:\"by\"`
\tTime_ts time.Time `bigquery:\"time_ts\"`
\tDead bool `bigquery:\"dead\"`
}

";
        assert_eq!(unit.code, expected);
        assert_eq!(unit.table, "stories");
        assert_eq!(unit.type_name, "Stories");
        assert_eq!(unit.imports, ["time"]);
    }

    #[test]
    fn test_generate_keeps_original_name_in_tag() {
        let table = TableSchema::new("my-table", "p:d.my-table").with_field("first-name", FieldType::String);

        let unit = StructGenerator::new(&table).generate().expect("generate");

        assert!(unit.code.contains("type My_table struct {\n"));
        assert!(unit.code.contains("\tFirst_name string `bigquery:\"first-name\"`\n"));
    }

    #[test]
    fn test_generate_imports_in_field_order_with_duplicates() {
        let table = TableSchema::new("events", "p:d.events")
            .with_field("day", FieldType::Date)
            .with_field("amount", FieldType::Numeric)
            .with_field("at", FieldType::Time)
            .with_field("name", FieldType::String);

        let unit = StructGenerator::new(&table).generate().expect("generate");

        assert_eq!(
            unit.imports,
            ["cloud.google.com/go/civil", "math/big", "cloud.google.com/go/civil"]
        );
    }

    #[test]
    fn test_generate_empty_identifier() {
        let table = TableSchema::new("", "p:d.").with_field("a", FieldType::String);

        let result = StructGenerator::new(&table).generate();
        assert!(matches!(result, Err(TableError::TableIdentifierEmpty { .. })));
    }

    #[test]
    fn test_generate_unsupported_field_aborts_table() {
        let table = TableSchema::new("nested", "p:d.nested")
            .with_field("ok", FieldType::String)
            .with_field("payload", FieldType::Record);

        let err = StructGenerator::new(&table).generate().unwrap_err();
        match &err {
            TableError::UnsupportedFieldType { table, field, source } => {
                assert_eq!(table, "nested");
                assert_eq!(field, "payload");
                assert_eq!(source.field_type, FieldType::Record);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("payload"));
    }

    #[test]
    fn test_generate_member_collision() {
        let table = TableSchema::new("t", "p:d.t")
            .with_field("a-b", FieldType::String)
            .with_field("a_b", FieldType::String);

        let result = StructGenerator::new(&table).generate();
        assert!(matches!(
            result,
            Err(TableError::MemberCollision { ref member, .. }) if member == "A_b"
        ));
    }

    #[test]
    fn test_generate_invalid_schema() {
        let table = TableSchema::new("t", "p:d.t").with_field("", FieldType::String);

        let result = StructGenerator::new(&table).generate();
        assert!(matches!(result, Err(TableError::InvalidSchema(_))));
    }

    #[test]
    fn test_generate_without_fields_or_description() {
        let table = TableSchema::new("empty", "p:d.empty");
        let unit = StructGenerator::new(&table).generate().expect("generate");

        assert_eq!(
            unit.code,
            "// Empty is BigQuery Table `p:d.empty` schema struct.\n// Description: \ntype Empty struct {\n}\n\n"
        );
        assert!(unit.imports.is_empty());
    }

    #[test]
    fn test_multiline_description_stays_commented() {
        let table = TableSchema::new("t", "p:d.t").with_description("first\n\nthird");
        let unit = StructGenerator::new(&table).generate().expect("generate");

        assert!(unit.code.contains("// Description: first\n//\n// third\ntype T struct"));
    }
}
