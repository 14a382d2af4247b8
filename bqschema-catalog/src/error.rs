//! Error types for catalog operations.

use thiserror::Error;

/// Error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Client construction or authentication failure.
    #[error("catalog access error: {message}")]
    Access {
        /// Error message.
        message: String,
    },

    /// HTTP transport error.
    #[cfg(feature = "bigquery")]
    #[error("HTTP error while {context}: {source}")]
    Http {
        /// What was being requested.
        context: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The catalog answered with a non-success status.
    #[error("catalog returned status {status} for {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
        /// Response body (truncated).
        body: String,
    },

    /// The catalog answered with a body that could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] bqschema_schema::ParseError),

    /// Dataset does not exist.
    #[error("dataset '{dataset}' not found")]
    DatasetNotFound {
        /// Dataset identifier.
        dataset: String,
    },

    /// Table does not exist.
    #[error("table '{table}' not found")]
    TableNotFound {
        /// Fully-qualified table name.
        table: String,
    },

    /// Operation cancelled through the cancellation token.
    #[error("catalog operation cancelled")]
    Cancelled,
}

impl CatalogError {
    /// Creates an access error with the given message.
    pub fn access(message: impl Into<String>) -> Self {
        Self::Access {
            message: message.into(),
        }
    }

    /// Returns true if the error came from the cancellation token.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if the catalog refused the caller's credentials.
    ///
    /// Such a failure is not specific to one table and affects every
    /// following request.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::Access { .. } | Self::Status { status: 401 | 403, .. })
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            #[cfg(feature = "bigquery")]
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        let status = |status| CatalogError::Status {
            status,
            url: "https://example.invalid".to_string(),
            body: String::new(),
        };

        assert!(status(429).is_transient());
        assert!(status(503).is_transient());
        assert!(!status(403).is_transient());
        assert!(!status(404).is_transient());
    }

    #[test]
    fn test_cancelled_is_not_transient() {
        assert!(CatalogError::Cancelled.is_cancelled());
        assert!(!CatalogError::Cancelled.is_transient());
        assert!(!CatalogError::access("no token").is_cancelled());
    }

    #[test]
    fn test_access_denied() {
        let status = |status| CatalogError::Status {
            status,
            url: "https://example.invalid".to_string(),
            body: String::new(),
        };

        assert!(CatalogError::access("expired").is_access_denied());
        assert!(status(401).is_access_denied());
        assert!(status(403).is_access_denied());
        assert!(!status(404).is_access_denied());
        assert!(!status(500).is_access_denied());
        assert!(!CatalogError::TableNotFound { table: "p:d.t".to_string() }.is_access_denied());
    }
}
