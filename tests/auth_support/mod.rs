#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use headless_auth::auth::{
    AccessToken, AuthError, AuthenticationRecord, IdentityProvider, ProviderOptions, RecordStore,
    TokenRequest,
};
use headless_auth::config::SessionConfig;

/// Record store kept in memory. `None` in the slot models missing backing storage.
pub struct InMemoryRecordStore {
    slot: Mutex<Option<AuthenticationRecord>>,
    fail_retrieve: AtomicBool,
    fail_store: AtomicBool,
    retrieve_calls: AtomicUsize,
    store_calls: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_slot(Some(AuthenticationRecord::empty()))
    }

    pub fn seeded(record: AuthenticationRecord) -> Self {
        Self::with_slot(Some(record))
    }

    pub fn missing() -> Self {
        Self::with_slot(None)
    }

    fn with_slot(slot: Option<AuthenticationRecord>) -> Self {
        Self {
            slot: Mutex::new(slot),
            fail_retrieve: AtomicBool::new(false),
            fail_store: AtomicBool::new(false),
            retrieve_calls: AtomicUsize::new(0),
            store_calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, record: AuthenticationRecord) {
        *self.slot.lock().expect("store lock poisoned") = Some(record);
    }

    pub fn get(&self) -> Option<AuthenticationRecord> {
        self.slot.lock().expect("store lock poisoned").clone()
    }

    pub fn fail_retrieve(&self, fail: bool) {
        self.fail_retrieve.store(fail, Ordering::SeqCst);
    }

    pub fn fail_store(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn retrieve_record(&self) -> Result<AuthenticationRecord, AuthError> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_retrieve.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "unreadable").into());
        }
        self.get()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no record slot").into())
    }

    fn store_record(&self, record: &AuthenticationRecord) -> Result<(), AuthError> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
        }
        self.set(record.clone());
        Ok(())
    }

    fn clear_record(&self) -> Result<(), AuthError> {
        *self.slot.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

/// Shared script and call log for [`ScriptedProvider`].
#[derive(Default)]
pub struct ProviderScript {
    logins: Mutex<VecDeque<Result<AuthenticationRecord, AuthError>>>,
    hang_on_authenticate: AtomicBool,
    hang_on_token: AtomicBool,
    fail_tokens: AtomicBool,
    authenticate_calls: AtomicUsize,
    token_requests: Mutex<Vec<TokenRequest>>,
    bound: Mutex<Vec<ProviderOptions>>,
}

impl ProviderScript {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_login(&self, record: AuthenticationRecord) {
        self.logins.lock().expect("script lock").push_back(Ok(record));
    }

    pub fn push_login_error(&self, error: AuthError) {
        self.logins.lock().expect("script lock").push_back(Err(error));
    }

    pub fn hang_on_authenticate(&self) {
        self.hang_on_authenticate.store(true, Ordering::SeqCst);
    }

    pub fn hang_on_token(&self) {
        self.hang_on_token.store(true, Ordering::SeqCst);
    }

    pub fn fail_tokens(&self) {
        self.fail_tokens.store(true, Ordering::SeqCst);
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    pub fn token_requests(&self) -> Vec<TokenRequest> {
        self.token_requests.lock().expect("script lock").clone()
    }

    pub fn bound(&self) -> Vec<ProviderOptions> {
        self.bound.lock().expect("script lock").clone()
    }

    /// Binder for `SessionController::new` that records the options it saw.
    pub fn binder(
        self: &Arc<Self>,
    ) -> impl FnOnce(ProviderOptions) -> Result<Box<dyn IdentityProvider>, AuthError> {
        let script = Arc::clone(self);
        move |options| {
            script.bound.lock().expect("script lock").push(options);
            Ok(Box::new(ScriptedProvider { script }) as Box<dyn IdentityProvider>)
        }
    }
}

pub struct ScriptedProvider {
    script: Arc<ProviderScript>,
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn authenticate(&self) -> Result<AuthenticationRecord, AuthError> {
        self.script.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        if self.script.hang_on_authenticate.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.script
            .logins
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(Err(AuthError::AccessDenied))
    }

    async fn get_token(&self, request: &TokenRequest) -> Result<AccessToken, AuthError> {
        self.script
            .token_requests
            .lock()
            .expect("script lock")
            .push(request.clone());
        if self.script.hang_on_token.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.script.fail_tokens.load(Ordering::SeqCst) {
            return Err(AuthError::ExpiredOrInvalidGrant);
        }
        Ok(AccessToken::new(
            format!("token-for-{}", request.tenant_id),
            Utc::now() + Duration::hours(1),
        ))
    }
}

pub fn record(tenant_id: &str, username: &str) -> AuthenticationRecord {
    AuthenticationRecord {
        authority: "login.example.com".to_string(),
        client_id: "client-id".to_string(),
        home_account_id: format!("{username}.{tenant_id}"),
        tenant_id: tenant_id.to_string(),
        username: username.to_string(),
        version: "1.0".to_string(),
    }
}

pub fn config() -> SessionConfig {
    SessionConfig::builder()
        .app_name("headless-auth-tests")
        .client_id("client-id")
        .tenant_id("home-tenant")
        .scopes(vec!["api://app/.default".to_string(), "offline_access".to_string()])
        .build()
}
