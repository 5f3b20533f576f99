//! One-time authorization-code grant helpers.
//!
//! Used when setting up credentials for the first time: the user opens the
//! consent URL in a browser, copies the `code` query parameter from the
//! redirect, and exchanges it here for an access/refresh token pair. The
//! refresh token then goes into the configuration file and everything after
//! that runs on [`crate::TokenManager`].

use crate::error::AuthError;
use crate::models::{TokenPair, TokenResponse};
use std::time::Duration;
use url::Url;

const AUTHORIZE_URL: &str = "https://accounts.zoho.eu/oauth/v2/auth";
const TOKEN_URL: &str = "https://accounts.zoho.eu/oauth/v2/token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the browser consent URL for the given client and scope.
pub fn authorize_url(
    client_id: &str,
    scope: &str,
    redirect_uri: &str,
) -> Result<Url, AuthError> {
    let url = Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("scope", scope),
            ("client_id", client_id),
            ("response_type", "code"),
            ("access_type", "offline"),
            ("redirect_uri", redirect_uri),
        ],
    )?;
    Ok(url)
}

/// Exchange an authorization code for an access/refresh token pair.
pub async fn exchange_authorization_code(
    client_id: &str,
    client_secret: &str,
    redirect_uri: &str,
    code: &str,
) -> Result<TokenPair, AuthError> {
    exchange_at(TOKEN_URL, client_id, client_secret, redirect_uri, code).await
}

async fn exchange_at(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    redirect_uri: &str,
    code: &str,
) -> Result<TokenPair, AuthError> {
    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let params = [
        ("grant_type", "authorization_code"),
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("redirect_uri", redirect_uri),
        ("code", code),
    ];

    let resp = http.post(token_url).form(&params).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AuthError::Endpoint(status));
    }

    let body: TokenResponse = resp.json().await?;
    if let Some(error) = body.error {
        return Err(AuthError::OAuth(error));
    }

    let access_token = body
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingAccessToken)?;
    let refresh_token = body
        .refresh_token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingRefreshToken)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_all_query_params() {
        let url = authorize_url("cid", "ZohoCliq.Users.READ", "http://localhost").unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(query.contains(&("client_id".into(), "cid".into())));
        assert!(query.contains(&("scope".into(), "ZohoCliq.Users.READ".into())));
        assert!(query.contains(&("response_type".into(), "code".into())));
        assert!(query.contains(&("access_type".into(), "offline".into())));
        assert!(query.contains(&("redirect_uri".into(), "http://localhost".into())));
    }

    #[tokio::test]
    async fn exchange_returns_both_tokens() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/v2/token")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                mockito::Matcher::UrlEncoded("code".into(), "code-1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token":"acc","refresh_token":"ref"}"#)
            .create_async()
            .await;

        let url = server.url() + "/oauth/v2/token";
        let pair = exchange_at(&url, "cid", "secret", "http://localhost", "code-1")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(pair.access_token, "acc");
        assert_eq!(pair.refresh_token, "ref");
    }

    #[tokio::test]
    async fn exchange_without_refresh_token_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/v2/token")
            .with_status(200)
            .with_body(r#"{"access_token":"acc"}"#)
            .create_async()
            .await;

        let url = server.url() + "/oauth/v2/token";
        let err = exchange_at(&url, "cid", "secret", "http://localhost", "code-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingRefreshToken));
    }
}
