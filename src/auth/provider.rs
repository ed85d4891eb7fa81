//! Identity provider seam.
//!
//! The device-code protocol, token validation and token cache encryption all
//! live behind [`IdentityProvider`]. A session only needs two things from it:
//! an interactive exchange that yields an [`AuthenticationRecord`], and silent
//! issuance of [`AccessToken`]s for a cached record.

use async_trait::async_trait;

use super::error::AuthError;
use super::record::AuthenticationRecord;
use super::token::{AccessToken, TokenRequest};

/// Interactive device-code authentication plus silent token issuance.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the interactive device-code exchange. May block for as long as the
    /// user takes to complete sign-in on another device.
    async fn authenticate(&self) -> Result<AuthenticationRecord, AuthError>;

    /// Issue an access token from cached state without user interaction.
    async fn get_token(&self, request: &TokenRequest) -> Result<AccessToken, AuthError>;
}

/// Token cache binding handed to the provider. The provider decides how the
/// named cache is stored and encrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCacheOptions {
    pub name: String,
}

/// Everything a provider needs at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOptions {
    pub client_id: String,
    pub tenant_id: String,
    pub cache: TokenCacheOptions,
    /// Record to pre-seed the provider with; empty when no session exists.
    pub record: AuthenticationRecord,
}
