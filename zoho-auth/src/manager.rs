use crate::error::AuthError;
use crate::models::{Credentials, TokenResponse, TokenState};
use chrono::Utc;
use std::time::Duration;

const TOKEN_URL: &str = "https://accounts.zoho.eu/oauth/v2/token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the access token and keeps it fresh via the refresh-token grant.
///
/// Freshness is a fixed TTL window (see [`crate::TOKEN_TTL_SECS`]); there is
/// no invalidation beyond expiry and no backoff on failure. Retry cadence is
/// entirely up to the caller's own loop.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    state: TokenState,
}

impl TokenManager {
    pub fn new() -> Result<Self, AuthError> {
        Self::with_token_url(TOKEN_URL)
    }

    pub fn with_token_url(token_url: impl Into<String>) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            token_url: token_url.into(),
            state: TokenState::default(),
        })
    }

    /// The stored token regardless of freshness. Callers that can tolerate a
    /// stale token fall back to this when a refresh fails.
    pub fn current_token(&self) -> Option<&str> {
        self.state.access_token()
    }

    /// Return a fresh access token, hitting the network only when the cached
    /// one has expired.
    ///
    /// On failure the stored state is left untouched, so a previously
    /// obtained (stale) token stays available via [`current_token`].
    ///
    /// [`current_token`]: TokenManager::current_token
    pub async fn ensure_fresh(&mut self, credentials: &Credentials) -> Result<String, AuthError> {
        let now = Utc::now();
        if let Some(token) = self.state.fresh_token_at(now) {
            tracing::debug!("access token still fresh, skipping refresh");
            return Ok(token.to_string());
        }

        let token = self.request_refresh(credentials).await?;
        self.state.store(token.clone(), now);
        tracing::info!("access token refreshed");
        Ok(token)
    }

    async fn request_refresh(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let params = [
            ("refresh_token", credentials.refresh_token.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let resp = self.http.post(&self.token_url).form(&params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AuthError::Endpoint(status));
        }

        let body: TokenResponse = resp.json().await?;
        if let Some(error) = body.error {
            return Err(AuthError::OAuth(error));
        }

        body.access_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingAccessToken)
    }

    /// Backdate the freshness clock, as if the token had been obtained
    /// `secs` seconds ago.
    #[cfg(test)]
    pub(crate) fn backdate(&mut self, secs: i64) {
        if let Some(token) = self.state.access_token().map(str::to_string) {
            let obtained_at = Utc::now() - chrono::Duration::seconds(secs);
            self.state.store(token, obtained_at);
        }
    }
}
