use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Access tokens are considered fresh for this many seconds after they were
/// obtained; past that they must be refreshed before use.
pub const TOKEN_TTL_SECS: i64 = 1800;

/// Long-lived OAuth client credentials. Loaded once at startup and never
/// mutated; the engine owns them and lends them to the token manager.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// The current access token and when it was obtained.
///
/// `access_token` is `None` until the first successful refresh. Only the
/// token manager writes to this; readers must tolerate an absent or stale
/// token.
#[derive(Debug, Clone)]
pub struct TokenState {
    access_token: Option<String>,
    obtained_at: DateTime<Utc>,
}

impl Default for TokenState {
    fn default() -> Self {
        Self {
            access_token: None,
            obtained_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl TokenState {
    /// The stored token regardless of freshness, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// The stored token, but only while it is still inside the TTL window.
    pub fn fresh_token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.access_token.as_deref()?;
        if (now - self.obtained_at).num_seconds() < TOKEN_TTL_SECS {
            Some(token)
        } else {
            None
        }
    }

    /// Replace the token and reset the freshness clock in one step.
    pub(crate) fn store(&mut self, access_token: String, obtained_at: DateTime<Utc>) {
        self.access_token = Some(access_token);
        self.obtained_at = obtained_at;
    }
}

/// Access and refresh token pair returned by the authorization-code grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Body of a successful (or unsuccessful) token-endpoint response. Zoho
/// reports grant failures with 200 + an `error` field, so both variants are
/// modeled here.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
