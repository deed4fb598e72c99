//! Bounded store calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use makerhub_core::error::AppError;
use makerhub_core::result::AppResult;

/// Runs a store operation, failing with `ServiceUnavailable` once `limit`
/// elapses instead of waiting on an unresponsive backend.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &'static str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store operation timed out"
            );
            Err(AppError::service_unavailable(
                "The makerspace store did not respond in time",
            ))
        }
    }
}
