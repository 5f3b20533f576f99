mod error;

pub use crate::error::LuxaforApiError;

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

const WEBHOOK_URL: &str = "https://api.luxafor.com/webhook/v1/actions/solid_color";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The colors the Luxafor webhook API accepts for the `solid_color` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    White,
    Cyan,
    Magenta,
    Off,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::White => "white",
            Color::Cyan => "cyan",
            Color::Magenta => "magenta",
            Color::Off => "off",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
struct SolidColorRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    #[serde(rename = "actionFields")]
    action_fields: ActionFields,
}

#[derive(Debug, Serialize)]
struct ActionFields {
    color: Color,
}

/// Client for the Luxafor webhook command endpoint.
pub struct Client {
    http: reqwest::Client,
    webhook_url: String,
}

impl Client {
    pub fn new() -> Result<Self, LuxaforApiError> {
        Self::with_webhook_url(WEBHOOK_URL)
    }

    pub fn with_webhook_url(webhook_url: impl Into<String>) -> Result<Self, LuxaforApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            webhook_url: webhook_url.into(),
        })
    }

    /// Switch the light identified by `user_id` to a solid color.
    ///
    /// No retry here; a failed command is expected to be reissued by the
    /// caller on its next cycle.
    pub async fn solid_color(&self, user_id: &str, color: Color) -> Result<(), LuxaforApiError> {
        let body = SolidColorRequest {
            user_id,
            action_fields: ActionFields { color },
        };

        let resp = self.http.post(&self.webhook_url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LuxaforApiError::Endpoint(status));
        }

        Ok(())
    }
}
