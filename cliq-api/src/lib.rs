mod error;
pub mod models;

pub use crate::error::CliqApiError;
use crate::models::StatusResponse;
use std::time::Duration;

const BASE_URL: &str = "https://cliq.zoho.eu/api/v2";
const AUTH_SCHEME: &str = "Zoho-oauthtoken";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Zoho Cliq REST API.
///
/// Only the presence-status endpoint is wrapped. Every request carries a
/// bounded timeout so a hung call cannot stall the caller indefinitely.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new() -> Result<Self, CliqApiError> {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at a different API root (tests, other Zoho regions).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CliqApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current presence status of the authenticated user.
    ///
    /// Zoho Cliq uses its own `Zoho-oauthtoken` authorization scheme instead
    /// of `Bearer`.
    pub async fn current_status(&self, access_token: &str) -> Result<StatusResponse, CliqApiError> {
        let url = format!("{}/statuses/current", self.base_url);

        let resp = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("{AUTH_SCHEME} {access_token}"),
            )
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CliqApiError::Endpoint(status));
        }

        Ok(resp.json::<StatusResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_status_sends_zoho_auth_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/statuses/current")
            .match_header("authorization", "Zoho-oauthtoken tok-123")
            .with_status(200)
            .with_body(r#"{"data":{"code":"available"}}"#)
            .create_async()
            .await;

        let client = Client::with_base_url(server.url()).unwrap();
        let resp = client.current_status("tok-123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(resp.code(), Some("available"));
    }

    #[tokio::test]
    async fn current_status_maps_unauthorized_to_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/statuses/current")
            .with_status(401)
            .with_body(r#"{"message":"invalid oauth token"}"#)
            .create_async()
            .await;

        let client = Client::with_base_url(server.url()).unwrap();
        let err = client.current_status("expired").await.unwrap_err();

        match err {
            CliqApiError::Endpoint(status) => assert_eq!(status.as_u16(), 401),
            other => panic!("unexpected error: {other}"),
        }
    }
}
