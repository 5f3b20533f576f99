use thiserror::Error;

#[derive(Error, Debug)]
pub enum LuxaforApiError {
    /// Transport-level failure (connect, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status code.
    #[error("Luxafor webhook returned HTTP {0}")]
    Endpoint(reqwest::StatusCode),
}
