//! Timeout and cancellation helpers.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::AuthError;

/// Wrap a future with a timeout, mapping expiry through `on_elapsed`.
pub async fn with_timeout<T, E>(
    duration: Duration,
    future: impl Future<Output = Result<T, E>>,
    on_elapsed: impl FnOnce(Duration) -> E,
) -> Result<T, E> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(on_elapsed(duration)),
    }
}

/// Race a provider call against a cancellation token and optional deadline.
pub async fn with_cancellation<T>(
    cancel: &CancellationToken,
    deadline: Option<Duration>,
    future: impl Future<Output = Result<T, AuthError>>,
) -> Result<T, AuthError> {
    let guarded = async {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AuthError::Cancelled),
            result = future => result,
        }
    };
    match deadline {
        Some(limit) => with_timeout(limit, guarded, AuthError::DeadlineExceeded).await,
        None => guarded.await,
    }
}
