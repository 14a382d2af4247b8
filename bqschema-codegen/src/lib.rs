//! # bqschema Codegen
//!
//! Go struct generation from BigQuery table schemas.
//!
//! This crate provides:
//! - Field type to Go type mapping
//! - Identifier normalization and struct emission
//! - Import block aggregation
//! - Dataset-wide generation with per-table failure isolation
//! - Formatting and import resolution through the Go toolchain

pub mod error;
pub mod generator;
pub mod go;
pub mod postprocess;

pub use error::{GenerateError, PostProcessError, TableError, UnsupportedFieldType};
pub use generator::{DEFAULT_PACKAGE, GENERATOR_NAME, GenerationReport, Generator, SkippedTable};
pub use go::{GeneratedUnit, StructGenerator, TypeMapping, aggregate_imports, map_field_type, normalize_identifier};
pub use postprocess::{Formatter, GofmtFormatter, GoimportsResolver, ImportResolver, Passthrough};

/// Generates an unformatted Go file from a table metadata JSON document.
///
/// # Arguments
/// * `json` - Table resource as returned by `tables.get`
/// * `package` - Go package name
///
/// # Errors
/// Returns `TableError` if the document is malformed or the table cannot be
/// emitted.
pub fn generate_from_json(json: &str, package: &str) -> Result<String, TableError> {
    let table = bqschema_schema::parse_table(json).map_err(bqschema_schema::SchemaError::from)?;
    let mut report = GenerationReport::default();
    report.units.push(StructGenerator::new(&table).generate()?);
    Ok(Generator::new(package).assemble(&report))
}
