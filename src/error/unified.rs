//! Error classification and recovery.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Authentication,
    Timeout,
    Persistence,
    Token,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Fix client or tenant identifiers, or the provider setup.
    CheckConfiguration,
    /// Make the record store's directory readable and writable, then retry.
    CheckStorage,
    /// Call `login` (or `ensure_authenticated`) again.
    Reauthenticate,
    /// The session works for this process; retry persisting it later.
    RetryPersistence,
}
