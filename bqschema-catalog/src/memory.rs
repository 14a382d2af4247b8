//! In-memory catalog.
//!
//! Holds a fixed snapshot of one dataset. Used by tests and for generating
//! declarations from schemas that were exported ahead of time.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use async_trait::async_trait;
use bqschema_schema::{TableListPage, TableRef, TableSchema};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
enum Entry {
    Schema(TableSchema),
    FetchFailure { table_id: String, message: String },
}

impl Entry {
    fn table_id(&self) -> &str {
        match self {
            Self::Schema(schema) => &schema.identifier,
            Self::FetchFailure { table_id, .. } => table_id,
        }
    }
}

/// Catalog backed by a list of table schemas.
#[derive(Debug)]
pub struct MemoryCatalog {
    project_id: String,
    dataset_id: String,
    entries: Vec<Entry>,
    page_size: usize,
    list_calls: AtomicUsize,
}

impl MemoryCatalog {
    /// Creates an empty catalog for one dataset.
    #[must_use]
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            entries: Vec::new(),
            page_size: 50,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Sets the number of tables returned per listing page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Appends a table, keeping catalog order.
    pub fn add_table(&mut self, table: TableSchema) {
        self.entries.push(Entry::Schema(table));
    }

    /// Appends a table whose metadata fetch always fails.
    pub fn add_fetch_failure(&mut self, table_id: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Entry::FetchFailure {
            table_id: table_id.into(),
            message: message.into(),
        });
    }

    /// Returns the number of listing pages requested so far.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }

    fn table_ref(&self, table_id: &str) -> TableRef {
        TableRef::new(&self.project_id, &self.dataset_id, table_id)
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list_tables_page(
        &self,
        dataset_id: &str,
        page_token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<TableListPage, CatalogError> {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }
        self.list_calls.fetch_add(1, Ordering::Relaxed);

        if dataset_id != self.dataset_id {
            return Err(CatalogError::DatasetNotFound {
                dataset: dataset_id.to_string(),
            });
        }

        let start = match page_token {
            Some(token) => token.parse::<usize>().map_err(|_| CatalogError::Status {
                status: 400,
                url: format!("memory://{}/{}", self.project_id, dataset_id),
                body: format!("invalid page token '{}'", token),
            })?,
            None => 0,
        };
        let end = (start + self.page_size).min(self.entries.len());

        let tables = self.entries[start.min(end)..end]
            .iter()
            .map(|entry| self.table_ref(entry.table_id()))
            .collect();

        Ok(TableListPage {
            tables,
            next_page_token: (end < self.entries.len()).then(|| end.to_string()),
        })
    }

    async fn fetch_metadata(
        &self,
        table: &TableRef,
        cancel: &CancellationToken,
    ) -> Result<TableSchema, CatalogError> {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        let entry = self
            .entries
            .iter()
            .find(|entry| entry.table_id() == table.table_id)
            .ok_or_else(|| CatalogError::TableNotFound {
                table: table.full_id(),
            })?;

        match entry {
            Entry::Schema(schema) => Ok(schema.clone()),
            Entry::FetchFailure { message, .. } => Err(CatalogError::Status {
                status: 500,
                url: format!("memory://{}", table.full_id()),
                body: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bqschema_schema::FieldType;

    #[tokio::test]
    async fn test_fetch_metadata_returns_snapshot() {
        let mut catalog = MemoryCatalog::new("p", "d");
        let schema = TableSchema::new("stories", "p:d.stories").with_field("id", FieldType::Integer);
        catalog.add_table(schema.clone());

        let cancel = CancellationToken::new();
        let fetched = catalog
            .fetch_metadata(&TableRef::new("p", "d", "stories"), &cancel)
            .await
            .expect("fetch");

        assert_eq!(fetched, schema);
    }

    #[tokio::test]
    async fn test_fetch_metadata_failure_entry() {
        let mut catalog = MemoryCatalog::new("p", "d");
        catalog.add_fetch_failure("broken", "backend error");

        let cancel = CancellationToken::new();
        let result = catalog
            .fetch_metadata(&TableRef::new("p", "d", "broken"), &cancel)
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("backend error"));
    }

    #[tokio::test]
    async fn test_fetch_metadata_unknown_table() {
        let catalog = MemoryCatalog::new("p", "d");
        let cancel = CancellationToken::new();
        let result = catalog
            .fetch_metadata(&TableRef::new("p", "d", "nope"), &cancel)
            .await;

        assert!(matches!(result, Err(CatalogError::TableNotFound { .. })));
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_calls() {
        let mut catalog = MemoryCatalog::new("p", "d");
        catalog.add_table(TableSchema::new("t", "p:d.t"));

        let cancel = CancellationToken::new();
        cancel.cancel();

        let listed = catalog.list_tables_page("d", None, &cancel).await;
        assert!(matches!(listed, Err(CatalogError::Cancelled)));

        let fetched = catalog.fetch_metadata(&TableRef::new("p", "d", "t"), &cancel).await;
        assert!(matches!(fetched, Err(CatalogError::Cancelled)));
    }

    #[tokio::test]
    async fn test_invalid_page_token() {
        let catalog = MemoryCatalog::new("p", "d");
        let cancel = CancellationToken::new();
        let result = catalog.list_tables_page("d", Some("abc"), &cancel).await;

        assert!(matches!(result, Err(CatalogError::Status { status: 400, .. })));
    }
}
