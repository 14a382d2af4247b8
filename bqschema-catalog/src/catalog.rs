//! Catalog trait and lazy table enumeration.

use crate::error::CatalogError;
use async_trait::async_trait;
use bqschema_schema::{TableListPage, TableRef, TableSchema};
use std::collections::VecDeque;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Source of dataset listings and table schemas.
///
/// Every call receives the caller's cancellation token unchanged; cancelling
/// it aborts the in-flight call with [`CatalogError::Cancelled`].
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches one page of the dataset's table listing.
    ///
    /// # Errors
    /// Returns `CatalogError` if the dataset cannot be listed.
    async fn list_tables_page(
        &self,
        dataset_id: &str,
        page_token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<TableListPage, CatalogError>;

    /// Fetches the schema of a single table.
    ///
    /// # Errors
    /// Returns `CatalogError` if the table metadata cannot be fetched.
    async fn fetch_metadata(
        &self,
        table: &TableRef,
        cancel: &CancellationToken,
    ) -> Result<TableSchema, CatalogError>;
}

/// Lazy, page-at-a-time walk over a dataset's tables.
///
/// `next_table` returns `Ok(None)` once the last page is drained.
pub struct TableLister<'a> {
    catalog: &'a dyn Catalog,
    dataset_id: String,
    buffered: VecDeque<TableRef>,
    next_page_token: Option<String>,
    exhausted: bool,
}

impl<'a> TableLister<'a> {
    /// Creates a lister for the given dataset. No request is made until the
    /// first call to [`TableLister::next_table`].
    #[must_use]
    pub fn new(catalog: &'a dyn Catalog, dataset_id: impl Into<String>) -> Self {
        Self {
            catalog,
            dataset_id: dataset_id.into(),
            buffered: VecDeque::new(),
            next_page_token: None,
            exhausted: false,
        }
    }

    /// Returns the dataset being listed.
    #[must_use]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Returns the next table in catalog order, fetching pages as needed.
    ///
    /// # Errors
    /// Returns `CatalogError` if a page request fails.
    pub async fn next_table(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Option<TableRef>, CatalogError> {
        loop {
            if let Some(table) = self.buffered.pop_front() {
                return Ok(Some(table));
            }
            if self.exhausted {
                return Ok(None);
            }

            let page = self
                .catalog
                .list_tables_page(&self.dataset_id, self.next_page_token.as_deref(), cancel)
                .await?;

            tracing::debug!(
                "Listed {} tables from dataset {} (more pages: {})",
                page.tables.len(),
                self.dataset_id,
                page.next_page_token.is_some()
            );

            self.exhausted = page.next_page_token.is_none();
            self.next_page_token = page.next_page_token;
            self.buffered.extend(page.tables);
        }
    }
}

/// Runs `future` unless `cancel` fires first.
///
/// # Errors
/// Returns `CatalogError::Cancelled` if the token is cancelled before the
/// future completes, otherwise the future's own result.
pub async fn cancellable<T, F>(cancel: &CancellationToken, future: F) -> Result<T, CatalogError>
where
    F: Future<Output = Result<T, CatalogError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CatalogError::Cancelled),
        result = future => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCatalog;
    use bqschema_schema::FieldType;

    fn catalog_with(count: usize, page_size: usize) -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new("p", "d").with_page_size(page_size);
        for i in 0..count {
            let id = format!("t{}", i);
            catalog.add_table(
                TableSchema::new(&id, format!("p:d.{}", id)).with_field("a", FieldType::String),
            );
        }
        catalog
    }

    #[tokio::test]
    async fn test_lister_walks_all_pages_in_order() {
        let catalog = catalog_with(5, 2);
        let cancel = CancellationToken::new();
        let mut lister = TableLister::new(&catalog, "d");

        let mut ids = Vec::new();
        while let Some(table) = lister.next_table(&cancel).await.expect("list") {
            ids.push(table.table_id);
        }

        assert_eq!(ids, ["t0", "t1", "t2", "t3", "t4"]);
        assert_eq!(catalog.list_calls(), 3);
    }

    #[tokio::test]
    async fn test_lister_empty_dataset() {
        let catalog = catalog_with(0, 2);
        let cancel = CancellationToken::new();
        let mut lister = TableLister::new(&catalog, "d");

        assert!(lister.next_table(&cancel).await.expect("list").is_none());
        assert!(lister.next_table(&cancel).await.expect("list").is_none());
        assert_eq!(catalog.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_lister_unknown_dataset() {
        let catalog = catalog_with(1, 2);
        let cancel = CancellationToken::new();
        let mut lister = TableLister::new(&catalog, "missing");

        let result = lister.next_table(&cancel).await;
        assert!(matches!(result, Err(CatalogError::DatasetNotFound { .. })));
    }

    #[tokio::test]
    async fn test_cancellable_returns_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result: Result<(), _> = cancellable(&cancel, std::future::pending()).await;
        assert!(matches!(result, Err(CatalogError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let result = cancellable(&cancel, async { Ok(7) }).await;
        assert_eq!(result.expect("value"), 7);
    }
}
