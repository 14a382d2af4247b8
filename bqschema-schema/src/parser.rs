//! BigQuery REST payload decoder.
//!
//! This module decodes the JSON documents returned by the BigQuery v2
//! `tables.get` and `tables.list` endpoints into the schema model.

use crate::error::ParseError;
use crate::types::{FieldSchema, FieldType, TableListPage, TableRef, TableSchema};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableReferenceWire {
    project_id: Option<String>,
    dataset_id: Option<String>,
    table_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FieldWire {
    name: Option<String>,
    #[serde(rename = "type")]
    field_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SchemaWire {
    #[serde(default)]
    fields: Vec<FieldWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableWire {
    id: Option<String>,
    table_reference: Option<TableReferenceWire>,
    description: Option<String>,
    schema: Option<SchemaWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableListWire {
    #[serde(default)]
    tables: Vec<TableListEntryWire>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableListEntryWire {
    table_reference: Option<TableReferenceWire>,
}

/// Parses a `tables.get` response body into a table schema.
///
/// # Arguments
/// * `json` - Table resource JSON
///
/// # Returns
/// Decoded table schema with fields in catalog order.
///
/// # Errors
/// Returns `ParseError` if the document is not valid JSON or lacks the
/// table reference or a field's name or type.
pub fn parse_table(json: &str) -> Result<TableSchema, ParseError> {
    let wire: TableWire = serde_json::from_str(json)?;
    let reference = parse_reference(wire.table_reference, "table")?;

    let qualified_id = wire
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| reference.full_id());

    let mut table = TableSchema::new(reference.table_id, qualified_id)
        .with_description(wire.description.unwrap_or_default());

    for (position, field) in wire.schema.unwrap_or_default().fields.into_iter().enumerate() {
        table.add_field(parse_field(field, position)?);
    }

    Ok(table)
}

/// Parses a `tables.list` response body into one page of table references.
///
/// # Errors
/// Returns `ParseError` if the document is not valid JSON or an entry has
/// no table reference.
pub fn parse_table_list(json: &str) -> Result<TableListPage, ParseError> {
    let wire: TableListWire = serde_json::from_str(json)?;

    let tables = wire
        .tables
        .into_iter()
        .map(|entry| parse_reference(entry.table_reference, "tables[]"))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableListPage {
        tables,
        next_page_token: wire.next_page_token.filter(|token| !token.is_empty()),
    })
}

fn parse_reference(
    reference: Option<TableReferenceWire>,
    context: &str,
) -> Result<TableRef, ParseError> {
    let reference = reference.ok_or_else(|| ParseError::missing(context, "tableReference"))?;

    // An empty table id is passed through; the emitter rejects it per table.
    Ok(TableRef::new(
        reference.project_id.unwrap_or_default(),
        reference.dataset_id.unwrap_or_default(),
        reference.table_id.unwrap_or_default(),
    ))
}

fn parse_field(field: FieldWire, position: usize) -> Result<FieldSchema, ParseError> {
    let context = format!("schema.fields[{}]", position);
    let name = field.name.ok_or_else(|| ParseError::missing(&context, "name"))?;
    let literal = field
        .field_type
        .ok_or_else(|| ParseError::missing(&context, "type"))?;

    if literal.is_empty() {
        return Err(ParseError::invalid(context, "type", literal));
    }

    Ok(FieldSchema::new(name, FieldType::parse(&literal)))
}
