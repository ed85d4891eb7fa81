//! Error types for session operations.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use std::time::Duration;

use strum::Display;
use thiserror::Error;

use crate::auth::AuthError;

/// Session operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Construct,
    Login,
    EnsureAuthenticated,
    Logout,
    Token,
}

/// Primary error type for all session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Record storage error during {operation}: {source}")]
    Storage {
        operation: Operation,
        #[source]
        source: AuthError,
    },

    #[error("Failed to bind identity provider: {0}")]
    ProviderBinding(#[source] AuthError),

    #[error("Failed to authenticate during {operation}: {source}")]
    Authentication {
        operation: Operation,
        #[source]
        source: AuthError,
    },

    #[error("Interactive authentication during {operation} timed out after {}s", .after.as_secs())]
    Timeout { operation: Operation, after: Duration },

    #[error("Failed to store authentication record during {operation}: {source}")]
    Persistence {
        operation: Operation,
        #[source]
        source: AuthError,
    },

    #[error("Token request failed: {0}")]
    Token(#[source] AuthError),
}

impl SessionError {
    pub(crate) fn storage(operation: Operation, source: AuthError) -> Self {
        Self::Storage { operation, source }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::ProviderBinding(_) => ErrorCategory::Configuration,
            Self::Storage { .. } => ErrorCategory::Storage,
            Self::Authentication { .. } => ErrorCategory::Authentication,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::Persistence { .. } => ErrorCategory::Persistence,
            Self::Token(_) => ErrorCategory::Token,
        }
    }

    /// Whether calling the session again (without changing the environment)
    /// can succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.category(),
            ErrorCategory::Configuration | ErrorCategory::Storage
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Storage => RecoverySuggestion::CheckStorage,
            ErrorCategory::Persistence => RecoverySuggestion::RetryPersistence,
            ErrorCategory::Authentication | ErrorCategory::Timeout | ErrorCategory::Token => {
                RecoverySuggestion::Reauthenticate
            }
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SessionError>;
