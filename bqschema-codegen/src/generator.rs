//! Dataset-wide generation.
//!
//! [`Generator`] walks every table of a dataset, emits one struct per table,
//! skips tables that cannot be expressed, and assembles the result into a
//! single Go source file.

use crate::error::{GenerateError, PostProcessError, TableError};
use crate::go::imports::aggregate_imports;
use crate::go::structs::{GeneratedUnit, StructGenerator};
use crate::postprocess::{Formatter, ImportResolver, Passthrough};
use bqschema_catalog::{CancellationToken, Catalog, CatalogError, TableLister};
use bqschema_schema::TableSchema;
use std::collections::HashMap;

/// Name written into the generated file's header.
pub const GENERATOR_NAME: &str = "bqschema-gen";

/// Go package used when none is configured.
pub const DEFAULT_PACKAGE: &str = "bqschema";

/// A table left out of the generated file.
#[derive(Debug)]
pub struct SkippedTable {
    /// Table name.
    pub table: String,
    /// Why it was skipped.
    pub reason: TableError,
}

/// Outcome of walking a dataset: emitted units and skipped tables, both in
/// catalog order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Successfully emitted tables.
    pub units: Vec<GeneratedUnit>,
    /// Tables that were skipped.
    pub skipped: Vec<SkippedTable>,
    /// Struct name to the table it was emitted for.
    type_names: HashMap<String, String>,
}

impl GenerationReport {
    /// Builds a report from table schemas already in hand.
    #[must_use]
    pub fn from_schemas<'t, I>(tables: I) -> Self
    where
        I: IntoIterator<Item = &'t TableSchema>,
    {
        let mut report = Self::default();
        for table in tables {
            report.record(table.qualified_id.clone(), StructGenerator::new(table).generate());
        }
        report
    }

    /// Adds one table's outcome.
    ///
    /// A unit whose struct name was already emitted for an earlier table is
    /// recorded as skipped.
    pub fn record(&mut self, table: String, outcome: Result<GeneratedUnit, TableError>) {
        let outcome = outcome.and_then(|unit| match self.type_names.get(&unit.type_name) {
            Some(first) => Err(TableError::TypeCollision {
                table: table.clone(),
                first: first.clone(),
                type_name: unit.type_name,
            }),
            None => Ok(unit),
        });

        match outcome {
            Ok(unit) => {
                self.type_names.insert(unit.type_name.clone(), table.clone());
                tracing::debug!("Generated struct for table {}", table);
                self.units.push(unit);
            }
            Err(reason) => {
                tracing::warn!("Skipping table {}: {}", table, reason);
                self.skipped.push(SkippedTable { table, reason });
            }
        }
    }

    /// Returns every required import, tables then fields, duplicates kept.
    pub fn imports(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.units.iter().flat_map(|unit| unit.imports.iter().copied())
    }

    /// Returns the concatenated declarations.
    #[must_use]
    pub fn body(&self) -> String {
        self.units.iter().map(|unit| unit.code.as_str()).collect()
    }
}

/// Go source generator for a whole dataset.
pub struct Generator {
    package: String,
    formatter: Box<dyn Formatter>,
    resolver: Box<dyn ImportResolver>,
}

impl Generator {
    /// Creates a generator for the given Go package that leaves its output
    /// unformatted.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            formatter: Box::new(Passthrough),
            resolver: Box::new(Passthrough),
        }
    }

    /// Sets the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Sets the import resolver.
    #[must_use]
    pub fn with_import_resolver(mut self, resolver: impl ImportResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Returns the fixed file header.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "// Code generated by {name}; DO NOT EDIT.\n\n//go:generate {name}\n\npackage {package}\n\n",
            name = GENERATOR_NAME,
            package = self.package
        )
    }

    /// Walks the dataset and emits one struct per table.
    ///
    /// Tables that cannot be emitted, including tables whose metadata fetch
    /// fails, are logged and recorded as skipped. A fetch rejected for lack
    /// of access ends the run instead.
    ///
    /// # Errors
    /// Returns `GenerateError` if the dataset cannot be listed, the catalog
    /// denies access, or the token is cancelled.
    pub async fn collect(
        &self,
        catalog: &dyn Catalog,
        dataset_id: &str,
        cancel: &CancellationToken,
    ) -> Result<GenerationReport, GenerateError> {
        let mut report = GenerationReport::default();
        let mut lister = TableLister::new(catalog, dataset_id);

        loop {
            let table_ref = match lister.next_table(cancel).await {
                Ok(Some(table_ref)) => table_ref,
                Ok(None) => break,
                Err(CatalogError::Cancelled) => {
                    return Err(GenerateError::cancelled(format!(
                        "listing tables of dataset '{}'",
                        dataset_id
                    )));
                }
                Err(source) => {
                    return Err(GenerateError::ListTables {
                        dataset: dataset_id.to_string(),
                        source,
                    });
                }
            };

            let outcome = match catalog.fetch_metadata(&table_ref, cancel).await {
                Ok(schema) => StructGenerator::new(&schema).generate(),
                Err(CatalogError::Cancelled) => {
                    return Err(GenerateError::cancelled(format!(
                        "fetching metadata of table '{}'",
                        table_ref
                    )));
                }
                Err(source) if source.is_access_denied() => {
                    return Err(GenerateError::CatalogAccess {
                        table: table_ref.full_id(),
                        source,
                    });
                }
                Err(source) => Err(TableError::MetadataFetch {
                    table: table_ref.full_id(),
                    source,
                }),
            };

            report.record(table_ref.full_id(), outcome);
        }

        tracing::info!(
            "Generated {} structs from dataset {} ({} tables skipped)",
            report.units.len(),
            dataset_id,
            report.skipped.len()
        );

        Ok(report)
    }

    /// Assembles header, import block and declarations.
    #[must_use]
    pub fn assemble(&self, report: &GenerationReport) -> String {
        let mut output = self.header();
        output.push_str(&aggregate_imports(report.imports()));
        output.push_str(&report.body());
        output
    }

    /// Formats the assembled source, then resolves its imports.
    ///
    /// # Errors
    /// Returns `PostProcessError` if either stage rejects the source.
    pub fn post_process(&self, source: &str) -> Result<String, PostProcessError> {
        let formatted = self.formatter.format(source)?;
        self.resolver.resolve_imports(&formatted)
    }

    /// Generates the complete Go file for a dataset.
    ///
    /// # Errors
    /// Returns `GenerateError` if listing fails, the run is cancelled, or
    /// post-processing rejects the output.
    pub async fn generate(
        &self,
        catalog: &dyn Catalog,
        dataset_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, GenerateError> {
        let report = self.collect(catalog, dataset_id, cancel).await?;
        let source = self.assemble(&report);
        Ok(self.post_process(&source)?.into_bytes())
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE)
    }
}
