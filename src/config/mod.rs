//! Session configuration (code > env > `.env` file).

use std::time::Duration;

use bon::Builder;

use crate::error::SessionError;

/// Upper bound on the interactive device-code exchange.
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Immutable inputs for a session controller.
///
/// # Example
/// ```
/// use headless_auth::config::SessionConfig;
///
/// let config = SessionConfig::builder()
///     .app_name("my-tool")
///     .client_id("00000000-0000-0000-0000-000000000000")
///     .tenant_id("contoso")
///     .scopes(vec!["api://my-tool/.default".to_string()])
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Builder, PartialEq, Eq)]
pub struct SessionConfig {
    /// Names the provider's token cache.
    #[builder(into)]
    pub app_name: String,
    #[builder(into)]
    pub client_id: String,
    #[builder(into)]
    pub tenant_id: String,
    #[builder(default)]
    pub scopes: Vec<String>,
    #[builder(default = DEFAULT_LOGIN_TIMEOUT)]
    pub login_timeout: Duration,
}

impl SessionConfig {
    /// Load from `<PREFIX>_CLIENT_ID`, `<PREFIX>_TENANT_ID`, `<PREFIX>_SCOPES`
    /// and `<PREFIX>_LOGIN_TIMEOUT_SECS`, where the prefix is derived from
    /// `app_name` (`my-tool` becomes `MY_TOOL`). A `.env` file is read first
    /// when present.
    ///
    /// Missing identifiers are left empty and reported by [`validate`](Self::validate).
    pub fn from_env(app_name: impl Into<String>) -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(app_name, |key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(
        app_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let app_name = app_name.into();
        let prefix = env_prefix(&app_name);
        let var = |suffix: &str| lookup(&format!("{prefix}_{suffix}"));

        let scopes = var("SCOPES")
            .map(|raw| parse_scopes(&raw))
            .unwrap_or_default();

        let login_timeout = match var("LOGIN_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        variable = %format!("{prefix}_LOGIN_TIMEOUT_SECS"),
                        value = %raw,
                        "Ignoring invalid login timeout"
                    );
                    DEFAULT_LOGIN_TIMEOUT
                }
            },
            None => DEFAULT_LOGIN_TIMEOUT,
        };

        Self {
            client_id: var("CLIENT_ID").unwrap_or_default(),
            tenant_id: var("TENANT_ID").unwrap_or_default(),
            app_name,
            scopes,
            login_timeout,
        }
    }

    /// Reject configurations without a client or tenant identifier.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.client_id.trim().is_empty() {
            return Err(SessionError::Configuration(
                "client id is not present".to_string(),
            ));
        }
        if self.tenant_id.trim().is_empty() {
            return Err(SessionError::Configuration(
                "tenant id is not defined".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_prefix(app_name: &str) -> String {
    app_name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|scope| !scope.is_empty())
        .map(str::to_string)
        .collect()
}
