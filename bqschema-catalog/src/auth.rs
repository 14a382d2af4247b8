//! OAuth access tokens for the catalog API.

use crate::error::CatalogError;
use std::fmt;
use tokio::process::Command;

/// Bearer token sent with every catalog request.
///
/// The `Debug` output never contains the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns `CatalogError::Access` if the token is empty.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CatalogError> {
        let token = raw.as_ref().trim();
        if token.is_empty() {
            return Err(CatalogError::access("access token is empty"));
        }
        Ok(Self(token.to_string()))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Where to obtain the access token from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// A token supplied up front.
    Static(AccessToken),
    /// Ask the Cloud SDK (`gcloud auth print-access-token`).
    Gcloud,
}

impl TokenSource {
    /// Obtains a token.
    ///
    /// # Errors
    /// Returns `CatalogError::Access` if `gcloud` cannot be run, exits with a
    /// failure, or prints no token.
    pub async fn token(&self) -> Result<AccessToken, CatalogError> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::Gcloud => {
                let output = Command::new("gcloud")
                    .args(["auth", "print-access-token"])
                    .output()
                    .await
                    .map_err(|e| CatalogError::access(format!("failed to run gcloud: {}", e)))?;

                if !output.status.success() {
                    return Err(CatalogError::access(format!(
                        "gcloud auth print-access-token failed ({}): {}",
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    )));
                }

                AccessToken::new(String::from_utf8_lossy(&output.stdout))
            }
        }
    }
}
