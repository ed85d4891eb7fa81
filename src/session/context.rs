use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Cancellation and deadline for a single token request.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use headless_auth::session::TokenContext;
/// use tokio_util::sync::CancellationToken;
///
/// let cancel = CancellationToken::new();
/// let ctx = TokenContext::new()
///     .with_cancellation(cancel.child_token())
///     .with_deadline(Duration::from_secs(30));
/// assert_eq!(ctx.deadline(), Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenContext {
    cancel: CancellationToken,
    deadline: Option<Duration>,
}

impl TokenContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Fail the request if the provider has not answered within `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}
