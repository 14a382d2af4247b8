//! Error types for code generation.

use bqschema_catalog::CatalogError;
use bqschema_schema::{FieldType, SchemaError};
use thiserror::Error;

/// A catalog field type with no Go counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bigquery.FieldType not supported. field type: {field_type}: {reason}")]
pub struct UnsupportedFieldType {
    /// Offending type.
    pub field_type: FieldType,
    /// Why it cannot be mapped.
    pub reason: &'static str,
}

/// Error that prevents one table from being emitted.
///
/// These are recoverable: the generator skips the table and carries on with
/// the rest of the dataset.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table has no usable name.
    #[error("table identifier is empty (qualified id: '{qualified_id}')")]
    TableIdentifierEmpty {
        /// Fully-qualified name, for diagnostics.
        qualified_id: String,
    },

    /// A field's type cannot be mapped.
    #[error("field '{field}' of table '{table}': {source}")]
    UnsupportedFieldType {
        /// Table identifier.
        table: String,
        /// Field name.
        field: String,
        /// Mapping failure.
        #[source]
        source: UnsupportedFieldType,
    },

    /// Two fields normalize to the same member name.
    #[error("fields '{first}' and '{second}' of table '{table}' both map to member '{member}'")]
    MemberCollision {
        /// Table identifier.
        table: String,
        /// First field name.
        first: String,
        /// Second field name.
        second: String,
        /// Colliding member name.
        member: String,
    },

    /// Two tables normalize to the same struct name.
    #[error("tables '{first}' and '{table}' both map to struct '{type_name}'")]
    TypeCollision {
        /// Table skipped.
        table: String,
        /// Table already emitted under that name.
        first: String,
        /// Colliding struct name.
        type_name: String,
    },

    /// The table schema failed validation.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    /// The table's metadata could not be fetched.
    #[error("failed to fetch metadata for table '{table}': {source}")]
    MetadataFetch {
        /// Fully-qualified table name.
        table: String,
        /// Catalog failure.
        #[source]
        source: CatalogError,
    },
}

/// Error raised by the formatting and import-resolution stages.
#[derive(Debug, Error)]
pub enum PostProcessError {
    /// The formatter rejected the source.
    #[error("format error ({tool}): {message}")]
    Format {
        /// Tool that failed.
        tool: String,
        /// Error message.
        message: String,
    },

    /// Import resolution rejected the source.
    #[error("import resolution error ({tool}): {message}")]
    ResolveImports {
        /// Tool that failed.
        tool: String,
        /// Error message.
        message: String,
    },
}

/// Error that aborts a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The dataset's tables could not be enumerated.
    #[error("failed to list tables of dataset '{dataset}': {source}")]
    ListTables {
        /// Dataset identifier.
        dataset: String,
        /// Catalog failure.
        #[source]
        source: CatalogError,
    },

    /// The catalog rejected the credentials while fetching a table.
    #[error("catalog access denied while fetching table '{table}': {source}")]
    CatalogAccess {
        /// Fully-qualified table name.
        table: String,
        /// Catalog failure.
        #[source]
        source: CatalogError,
    },

    /// The run was cancelled.
    #[error("generation cancelled while {stage}")]
    Cancelled {
        /// What was in flight.
        stage: String,
    },

    /// Formatting or import resolution failed.
    #[error("post-processing failed: {0}")]
    PostProcess(#[from] PostProcessError),
}

impl GenerateError {
    /// Creates a cancellation error for the given stage.
    pub fn cancelled(stage: impl Into<String>) -> Self {
        Self::Cancelled {
            stage: stage.into(),
        }
    }
}
