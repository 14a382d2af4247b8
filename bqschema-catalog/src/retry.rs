//! Retrying catalog requests that failed transiently.
//!
//! Only errors for which [`CatalogError::is_transient`] holds are retried
//! (rate limiting, 5xx, timeouts, refused connections). The wait between
//! attempts grows geometrically up to a cap and is cut short by the
//! cancellation token.

use crate::catalog::cancellable;
use crate::error::CatalogError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Whether retrying is enabled.
    pub enabled: bool,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Maximum number of attempts, including the first.
    pub max_attempts: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
            backoff_multiplier: 2.0,
            max_attempts: 4,
        }
    }
}

impl RetryConfig {
    /// Returns a configuration that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Returns the wait after `failures` failed attempts, or `None` once no
    /// further attempt is allowed.
    #[must_use]
    pub fn delay_after(&self, failures: usize) -> Option<Duration> {
        if !self.enabled || failures == 0 || failures >= self.max_attempts {
            return None;
        }

        let exponent = i32::try_from(failures - 1).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Some(Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64())))
    }
}

/// Runs `request` until it succeeds, fails permanently, or runs out of
/// attempts.
///
/// # Errors
/// Returns the last request error, or `CatalogError::Cancelled` if the token
/// fires while waiting.
pub async fn retry_transient<T, F, Fut>(
    config: &RetryConfig,
    cancel: &CancellationToken,
    mut request: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut failures = 0;

    loop {
        let error = match cancellable(cancel, request()).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => e,
            Err(e) => return Err(e),
        };

        failures += 1;
        let Some(delay) = config.delay_after(failures) else {
            tracing::warn!("Giving up after {} attempts: {}", failures, error);
            return Err(error);
        };

        tracing::warn!("Transient catalog error ({}), retrying in {:?}", error, delay);
        cancellable(cancel, async {
            tokio::time::sleep(delay).await;
            Ok(())
        })
        .await?;
    }
}
