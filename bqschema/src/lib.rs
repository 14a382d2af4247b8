//! # bqschema
//!
//! Generate Go structs from BigQuery table schemas.
//!
//! Every table of a dataset becomes one exported Go struct whose members carry
//! `bigquery:"…"` tags, so rows can be loaded with the Go BigQuery client
//! without hand-written models.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bqschema::catalog::{BigQueryCatalogBuilder, CancellationToken};
//! use bqschema::codegen::Generator;
//!
//! let catalog = BigQueryCatalogBuilder::new("my-project").connect().await?;
//! let cancel = CancellationToken::new();
//! let source = Generator::new("models")
//!     .generate(&catalog, "my_dataset", &cancel)
//!     .await?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Table schema model and BigQuery JSON decoding
//! - [`codegen`] - Go struct generation
//! - [`catalog`] - Catalog access (BigQuery REST and in-memory)
//! - [`config`] - Command-line configuration resolution
//! - [`output`] - Writing the generated file

#![warn(missing_docs)]

pub mod config;
pub mod output;

/// Table schema model and decoding.
pub mod schema {
    pub use bqschema_schema::*;
}

/// Go struct generation.
pub mod codegen {
    pub use bqschema_codegen::*;
}

/// Catalog access.
pub mod catalog {
    pub use bqschema_catalog::*;
}

// Re-export commonly used items at the crate root
pub use bqschema_catalog::{BigQueryCatalog, BigQueryCatalogBuilder, CancellationToken, Catalog, MemoryCatalog};
pub use bqschema_codegen::{GenerateError, GenerationReport, Generator, TableError};
pub use bqschema_schema::{FieldType, TableSchema};
