//! Convenience re-exports for common use.

pub use crate::auth::{
    AccessToken, AuthError, AuthenticationRecord, FileRecordStore, IdentityProvider,
    ProviderOptions, RecordStore, RecordStoreConfig, TokenRequest,
};
pub use crate::config::SessionConfig;
pub use crate::error::{Result, SessionError};
pub use crate::session::{SessionController, SessionState, TokenContext};
