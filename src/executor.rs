//! Bounded request execution.
//!
//! Every network call made on behalf of the interface goes through
//! [`with_timeout`] so a stalled backend can never leave a flow waiting
//! forever.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Races `operation` against a deadline.
///
/// If the deadline passes first the result is [`ClientError::Timeout`] and
/// the operation is dropped, so a success that arrives later is never
/// observed by the caller.
pub async fn with_timeout<F, T>(operation: F, deadline: Duration) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Request timed out");
            Err(ClientError::Timeout)
        }
    }
}
