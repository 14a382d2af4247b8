//! # bqschema Schema
//!
//! BigQuery table schema model and decoding.
//!
//! This crate provides:
//! - A closed enumeration of BigQuery field types
//! - Table and field schema definitions
//! - Decoding of BigQuery REST table resources and table list pages
//! - Table schema validation

pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_table, parse_table_list};
pub use types::{FieldSchema, FieldType, TableListPage, TableRef, TableSchema};
pub use validation::validate_table;
