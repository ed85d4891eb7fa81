use serde::{Deserialize, Serialize};

/// Resumable handle to a completed interactive authentication.
///
/// The default value is the empty record, meaning "no session". Only the
/// identity provider creates non-empty records; the session layer treats them
/// as opaque apart from [`tenant_id`](Self::tenant_id), which scopes token
/// requests.
///
/// # Example
/// ```
/// use headless_auth::auth::AuthenticationRecord;
///
/// let record = AuthenticationRecord {
///     tenant_id: "contoso".to_string(),
///     username: "ada@contoso.example".to_string(),
///     ..Default::default()
/// };
/// assert!(!record.is_empty());
/// assert!(AuthenticationRecord::empty().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRecord {
    #[serde(default)]
    pub authority: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub home_account_id: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub version: String,
}

impl AuthenticationRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
