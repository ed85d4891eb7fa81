use std::fmt;
use std::sync::Arc;

use crate::auth::{
    AccessToken, AuthError, AuthenticationRecord, IdentityProvider, ProviderOptions, RecordStore,
    TokenCacheOptions, TokenRequest,
};
use crate::config::SessionConfig;
use crate::error::{Operation, Result, SessionError};
use crate::util::timeout::{with_cancellation, with_timeout};

use super::context::TokenContext;
use super::SessionState;

/// Owns the in-memory authentication record for one session and decides when
/// the interactive device-code exchange is needed.
///
/// Mutating operations take `&mut self`; share a controller between tasks by
/// wrapping it in a mutex.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use headless_auth::auth::{FileRecordStore, IdentityProvider, ProviderOptions, RecordStoreConfig};
/// use headless_auth::config::SessionConfig;
/// use headless_auth::session::{SessionController, TokenContext};
///
/// # fn my_provider(_: ProviderOptions) -> Box<dyn IdentityProvider> { unimplemented!() }
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SessionConfig::from_env("my-tool");
/// let store = Arc::new(FileRecordStore::open(RecordStoreConfig::for_app("my-tool"))?);
/// let mut session = SessionController::new(store, config, |options| Ok(my_provider(options)))?;
/// session.ensure_authenticated().await?;
/// let token = session.token(&TokenContext::new()).await?;
/// # let _ = token;
/// # Ok(())
/// # }
/// ```
pub struct SessionController {
    record: AuthenticationRecord,
    provider: Box<dyn IdentityProvider>,
    store: Arc<dyn RecordStore>,
    config: SessionConfig,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("record", &self.record)
            .field("provider", &"..")
            .field("store", &"..")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionController {
    /// Load the persisted record, validate `config`, and bind a provider
    /// pre-seeded with the loaded record.
    ///
    /// `bind` runs once, after validation; its error is reported as
    /// [`SessionError::ProviderBinding`].
    pub fn new<F>(store: Arc<dyn RecordStore>, config: SessionConfig, bind: F) -> Result<Self>
    where
        F: FnOnce(ProviderOptions) -> std::result::Result<Box<dyn IdentityProvider>, AuthError>,
    {
        let record = store
            .retrieve_record()
            .map_err(|source| SessionError::storage(Operation::Construct, source))?;
        config.validate()?;

        let provider = bind(ProviderOptions {
            client_id: config.client_id.clone(),
            tenant_id: config.tenant_id.clone(),
            cache: TokenCacheOptions {
                name: config.app_name.clone(),
            },
            record: record.clone(),
        })
        .map_err(SessionError::ProviderBinding)?;

        tracing::debug!(
            app = %config.app_name,
            resumed = !record.is_empty(),
            "Session controller ready"
        );

        Ok(Self {
            record,
            provider,
            store,
            config,
        })
    }

    pub fn record(&self) -> &AuthenticationRecord {
        &self.record
    }

    pub fn state(&self) -> SessionState {
        if self.record.is_empty() {
            SessionState::Unauthenticated
        } else {
            SessionState::Authenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Resume the held session.
    ///
    /// Does nothing when no session is held: a fresh controller never starts
    /// the interactive flow from here, use
    /// [`ensure_authenticated`](Self::ensure_authenticated) for that. When a
    /// session is held, a non-empty persisted record is adopted as-is; only
    /// when the persisted copy is gone does the interactive exchange run.
    pub async fn login(&mut self) -> Result<()> {
        if self.record.is_empty() {
            tracing::debug!("No session held; login is a no-op");
            return Ok(());
        }
        if self.resume_persisted(Operation::Login) {
            return Ok(());
        }
        self.authenticate_interactively(Operation::Login).await
    }

    /// Reach the authenticated state, running the interactive exchange
    /// whenever no persisted record can be resumed.
    pub async fn ensure_authenticated(&mut self) -> Result<()> {
        if self.resume_persisted(Operation::EnsureAuthenticated) {
            return Ok(());
        }
        self.authenticate_interactively(Operation::EnsureAuthenticated)
            .await
    }

    /// Forget the session in memory and overwrite the persisted record.
    ///
    /// The controller is unauthenticated afterwards even when the store write
    /// fails.
    pub fn logout(&mut self) -> Result<()> {
        self.record = AuthenticationRecord::empty();
        tracing::info!(app = %self.config.app_name, "Logged out");
        self.store
            .store_record(&self.record)
            .map_err(|source| SessionError::storage(Operation::Logout, source))
    }

    /// Issue an access token for the configured scopes, scoped to the held
    /// record's tenant. The record store is not consulted.
    pub async fn token(&self, ctx: &TokenContext) -> Result<AccessToken> {
        let request = TokenRequest {
            scopes: self.config.scopes.clone(),
            tenant_id: self.record.tenant_id.clone(),
        };
        with_cancellation(
            ctx.cancellation_token(),
            ctx.deadline(),
            self.provider.get_token(&request),
        )
        .await
        .map_err(SessionError::Token)
    }

    fn resume_persisted(&mut self, operation: Operation) -> bool {
        match self.store.retrieve_record() {
            Ok(record) if !record.is_empty() => {
                tracing::debug!(
                    %operation,
                    tenant_id = %record.tenant_id,
                    "Resumed persisted session"
                );
                self.record = record;
                true
            }
            Ok(_) => {
                tracing::debug!(%operation, "No persisted session");
                false
            }
            Err(error) => {
                tracing::warn!(
                    %operation,
                    error = %error,
                    "Could not read persisted session; falling back to interactive login"
                );
                false
            }
        }
    }

    async fn authenticate_interactively(&mut self, operation: Operation) -> Result<()> {
        let timeout = self.config.login_timeout;
        tracing::info!(
            %operation,
            timeout_secs = timeout.as_secs(),
            "Starting interactive device-code authentication"
        );

        let provider = &self.provider;
        let record = with_timeout(
            timeout,
            async {
                provider
                    .authenticate()
                    .await
                    .map_err(|source| SessionError::Authentication { operation, source })
            },
            |after| SessionError::Timeout { operation, after },
        )
        .await?;

        // Memory first: a failed write below must not lose the new session.
        self.record = record;
        tracing::info!(
            %operation,
            tenant_id = %self.record.tenant_id,
            "Interactive authentication succeeded"
        );

        self.store.store_record(&self.record).map_err(|source| {
            tracing::warn!(
                %operation,
                error = %source,
                "Authenticated but could not persist the record"
            );
            SessionError::Persistence { operation, source }
        })
    }
}
