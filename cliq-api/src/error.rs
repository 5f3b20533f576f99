use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliqApiError {
    /// Transport-level failure or a body that failed to decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Cliq API returned HTTP {0}")]
    Endpoint(reqwest::StatusCode),
}
