use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Transport-level failure or a body that failed to decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status code.
    #[error("token endpoint returned HTTP {0}")]
    Endpoint(reqwest::StatusCode),

    /// The token endpoint reported a grant failure (`error` field in body).
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// A 2xx response whose body carries no usable access token.
    #[error("token endpoint response is missing an access token")]
    MissingAccessToken,

    /// Authorization-code exchange succeeded but returned no refresh token.
    #[error("token endpoint response is missing a refresh token")]
    MissingRefreshToken,

    #[error("invalid authorization URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
