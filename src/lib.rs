//! Resumable device-code authentication sessions for headless clients.
//!
//! A [`SessionController`](session::SessionController) holds one
//! authentication record, mirrors it into a [`RecordStore`](auth::RecordStore)
//! so later processes can resume without user interaction, and asks an
//! [`IdentityProvider`](auth::IdentityProvider) for access tokens. The
//! device-code protocol itself belongs to the provider.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use headless_auth::prelude::*;
//!
//! # fn bind_provider(_: ProviderOptions) -> std::result::Result<Box<dyn IdentityProvider>, AuthError> { unimplemented!() }
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::from_env("my-tool");
//! let store = Arc::new(FileRecordStore::open(RecordStoreConfig::for_app("my-tool"))?);
//! let mut session = SessionController::new(store, config, bind_provider)?;
//!
//! session.ensure_authenticated().await?;
//! let token = session.token(&TokenContext::new()).await?;
//! println!("token expires at {}", token.expires_on);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;
pub mod session;
pub mod util;
