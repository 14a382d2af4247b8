//! Schema type definitions.
//!
//! This module contains the data structures representing BigQuery tables,
//! their fields and the closed set of field types the catalog reports.

use std::fmt;

/// BigQuery field types.
///
/// The set is closed: every literal the catalog can send decodes into one of
/// these variants, and literals this crate does not know are kept verbatim in
/// [`FieldType::Unknown`] so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Variable-length character data.
    String,
    /// Variable-length binary data.
    Bytes,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit IEEE floating point.
    Float,
    /// Boolean.
    Boolean,
    /// Absolute point in time.
    Timestamp,
    /// Nested record (STRUCT).
    Record,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Calendar date and time of day, no zone.
    DateTime,
    /// Exact decimal with 38 digits of precision.
    Numeric,
    /// Point, line or polygon on the earth's surface.
    Geography,
    /// Any literal not listed above.
    Unknown(String),
}

impl FieldType {
    /// Decodes a field type from its catalog literal.
    ///
    /// Both the legacy names (`INTEGER`, `RECORD`) and their standard SQL
    /// aliases (`INT64`, `STRUCT`) are accepted. Matching is case-sensitive,
    /// as the catalog always reports upper-case literals.
    #[must_use]
    pub fn parse(literal: &str) -> Self {
        match literal {
            "STRING" => Self::String,
            "BYTES" => Self::Bytes,
            "INTEGER" | "INT64" => Self::Integer,
            "FLOAT" | "FLOAT64" => Self::Float,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "TIMESTAMP" => Self::Timestamp,
            "RECORD" | "STRUCT" => Self::Record,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "DATETIME" => Self::DateTime,
            "NUMERIC" => Self::Numeric,
            "GEOGRAPHY" => Self::Geography,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the catalog literal for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "STRING",
            Self::Bytes => "BYTES",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::Timestamp => "TIMESTAMP",
            Self::Record => "RECORD",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Numeric => "NUMERIC",
            Self::Geography => "GEOGRAPHY",
            Self::Unknown(literal) => literal,
        }
    }

    /// Returns true if this is a nested record type.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// On-wire field name, used verbatim in serialization tags.
    pub name: String,
    /// Field type.
    pub field_type: FieldType,
}

impl FieldSchema {
    /// Creates a new field schema.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Schema of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table identifier, possibly containing hyphens.
    pub identifier: String,
    /// Fully-qualified `project:dataset.table` name.
    pub qualified_id: String,
    /// Table description (may be empty).
    pub description: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl TableSchema {
    /// Creates a new table schema with no fields.
    #[must_use]
    pub fn new(identifier: impl Into<String>, qualified_id: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            qualified_id: qualified_id.into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a field, keeping declaration order.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.add_field(FieldSchema::new(name, field_type));
        self
    }

    /// Appends a field, keeping declaration order.
    pub fn add_field(&mut self, field: FieldSchema) {
        self.fields.push(field);
    }
}

/// Reference to a table inside a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Project identifier.
    pub project_id: String,
    /// Dataset identifier.
    pub dataset_id: String,
    /// Table identifier.
    pub table_id: String,
}

impl TableRef {
    /// Creates a new table reference.
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    /// Returns the fully-qualified `project:dataset.table` name.
    #[must_use]
    pub fn full_id(&self) -> String {
        format!("{}:{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

/// One page of a dataset's table listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableListPage {
    /// Tables on this page, in catalog order.
    pub tables: Vec<TableRef>,
    /// Token for the next page, if any.
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parse_legacy_names() {
        assert_eq!(FieldType::parse("STRING"), FieldType::String);
        assert_eq!(FieldType::parse("INTEGER"), FieldType::Integer);
        assert_eq!(FieldType::parse("RECORD"), FieldType::Record);
        assert_eq!(FieldType::parse("DATETIME"), FieldType::DateTime);
    }

    #[test]
    fn test_field_type_parse_standard_aliases() {
        assert_eq!(FieldType::parse("INT64"), FieldType::Integer);
        assert_eq!(FieldType::parse("FLOAT64"), FieldType::Float);
        assert_eq!(FieldType::parse("BOOL"), FieldType::Boolean);
        assert_eq!(FieldType::parse("STRUCT"), FieldType::Record);
    }

    #[test]
    fn test_field_type_unknown_keeps_literal() {
        let parsed = FieldType::parse("BIGNUMERIC");
        assert_eq!(parsed, FieldType::Unknown("BIGNUMERIC".to_string()));
        assert_eq!(parsed.as_str(), "BIGNUMERIC");
        assert_eq!(parsed.to_string(), "BIGNUMERIC");
    }

    #[test]
    fn test_field_type_is_record() {
        assert!(FieldType::Record.is_record());
        assert!(!FieldType::String.is_record());
    }

    #[test]
    fn test_table_schema_keeps_field_order() {
        let table = TableSchema::new("t", "p:d.t")
            .with_field("z", FieldType::String)
            .with_field("a", FieldType::Integer)
            .with_field("m", FieldType::Bytes);

        let names: Vec<_> = table.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert!(table.description.is_empty());
    }

    #[test]
    fn test_table_ref_full_id() {
        let table = TableRef::new("bigquery-public-data", "hacker_news", "full");
        assert_eq!(table.full_id(), "bigquery-public-data:hacker_news.full");
        assert_eq!(table.to_string(), table.full_id());
    }
}
