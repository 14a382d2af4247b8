//! BigQuery v2 REST catalog.

use crate::auth::{AccessToken, TokenSource};
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::retry::{RetryConfig, retry_transient};
use async_trait::async_trait;
use bqschema_schema::{TableListPage, TableRef, TableSchema, parse_table, parse_table_list};
use reqwest::{Client, Url};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Production endpoint of the BigQuery v2 API.
pub const DEFAULT_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2/";

const MAX_ERROR_BODY: usize = 512;

/// Builder for configuring and creating a BigQuery catalog.
pub struct BigQueryCatalogBuilder {
    project_id: String,
    base_url: String,
    token_source: TokenSource,
    request_timeout: Duration,
    page_size: u32,
    retry_config: RetryConfig,
}

impl BigQueryCatalogBuilder {
    /// Creates a new builder for the given project.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token_source: TokenSource::Gcloud,
            request_timeout: Duration::from_secs(30),
            page_size: 100,
            retry_config: RetryConfig::default(),
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets where the access token comes from.
    #[must_use]
    pub fn token_source(mut self, source: TokenSource) -> Self {
        self.token_source = source;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the number of tables requested per listing page.
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the retry behavior for transient failures.
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Obtains an access token and builds the catalog.
    ///
    /// # Errors
    /// Returns `CatalogError::Access` if the project is empty, the base URL
    /// is invalid, the HTTP client cannot be built, or no token is available.
    pub async fn connect(self) -> Result<BigQueryCatalog, CatalogError> {
        if self.project_id.is_empty() {
            return Err(CatalogError::access("project id is empty"));
        }

        let mut base_url = Url::parse(&self.base_url)
            .map_err(|e| CatalogError::access(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(self.request_timeout)
            .user_agent(concat!("bqschema/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::access(format!("failed to create HTTP client: {}", e)))?;

        let token = self.token_source.token().await?;
        tracing::info!("Connected to BigQuery project {}", self.project_id);

        Ok(BigQueryCatalog {
            http,
            base_url,
            project_id: self.project_id,
            token,
            page_size: self.page_size,
            retry_config: self.retry_config,
        })
    }
}

/// Catalog backed by the BigQuery REST API.
pub struct BigQueryCatalog {
    http: Client,
    base_url: Url,
    project_id: String,
    token: AccessToken,
    page_size: u32,
    retry_config: RetryConfig,
}

impl BigQueryCatalog {
    /// Returns the project this catalog reads from.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Builds `{base}projects/{project}/datasets/{dataset}/tables[/{table}]`
    /// with each segment percent-encoded.
    fn tables_url(&self, dataset_id: &str, table_id: Option<&str>) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatalogError::access("base URL cannot carry a path"))?;
            segments
                .pop_if_empty()
                .extend(["projects", self.project_id.as_str(), "datasets", dataset_id, "tables"]);
            if let Some(table_id) = table_id {
                segments.push(table_id);
            }
        }
        Ok(url)
    }

    /// GETs `url` with retries and returns the body text.
    async fn get_text(&self, url: Url, cancel: &CancellationToken) -> Result<String, CatalogError> {
        retry_transient(&self.retry_config, cancel, || self.get_once(url.clone())).await
    }

    async fn get_once(&self, url: Url) -> Result<String, CatalogError> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(self.token.secret())
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                context: format!("requesting {}", url),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| CatalogError::Http {
            context: format!("reading response from {}", url),
            source,
        })?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl Catalog for BigQueryCatalog {
    async fn list_tables_page(
        &self,
        dataset_id: &str,
        page_token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<TableListPage, CatalogError> {
        let mut url = self.tables_url(dataset_id, None)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("maxResults", &self.page_size.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }

        let body = self.get_text(url, cancel).await.map_err(|e| match e {
            CatalogError::Status { status: 404, .. } => CatalogError::DatasetNotFound {
                dataset: dataset_id.to_string(),
            },
            other => other,
        })?;

        Ok(parse_table_list(&body)?)
    }

    async fn fetch_metadata(
        &self,
        table: &TableRef,
        cancel: &CancellationToken,
    ) -> Result<TableSchema, CatalogError> {
        let url = self.tables_url(&table.dataset_id, Some(&table.table_id))?;

        let body = self.get_text(url, cancel).await.map_err(|e| match e {
            CatalogError::Status { status: 404, .. } => CatalogError::TableNotFound {
                table: table.full_id(),
            },
            other => other,
        })?;

        Ok(parse_table(&body)?)
    }
}

fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
