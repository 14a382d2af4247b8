//! # bqschema Catalog
//!
//! Access to the BigQuery schema catalog.
//!
//! This crate provides:
//! - The [`Catalog`] trait the code generator pulls table schemas through
//! - Lazy, paginated table enumeration with [`TableLister`]
//! - A BigQuery REST implementation (feature `bigquery`)
//! - An in-memory implementation for tests and offline use
//! - Retry with exponential backoff for transient catalog failures

pub mod auth;
#[cfg(feature = "bigquery")]
pub mod bigquery;
pub mod catalog;
pub mod error;
pub mod memory;
pub mod retry;

pub use auth::{AccessToken, TokenSource};
#[cfg(feature = "bigquery")]
pub use bigquery::{BigQueryCatalog, BigQueryCatalogBuilder};
pub use catalog::{Catalog, TableLister, cancellable};
pub use error::CatalogError;
pub use memory::MemoryCatalog;
pub use retry::{RetryConfig, retry_transient};
pub use tokio_util::sync::CancellationToken;
