//! Authentication records, their persistence, and the identity provider seam.

pub mod error;
pub mod provider;
pub mod record;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use provider::{IdentityProvider, ProviderOptions, TokenCacheOptions};
pub use record::AuthenticationRecord;
pub use store::{FileRecordStore, RecordStore, RecordStoreConfig};
pub use token::{AccessToken, TokenRequest};
