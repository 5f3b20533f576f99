use serde::Deserialize;

/// Response of `GET /statuses/current`.
///
/// The interesting part lives under `data`: a transient status (meeting,
/// focus time, ...) that temporarily overrides the user's base status, and
/// the base status code itself. Either may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub data: StatusData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusData {
    #[serde(default)]
    pub transient_status: Option<TransientStatus>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransientStatus {
    #[serde(default)]
    pub code: Option<String>,
}

impl StatusResponse {
    /// The effective status code: the transient status wins over the base
    /// status, and empty strings count as absent.
    pub fn code(&self) -> Option<&str> {
        self.data
            .transient_status
            .as_ref()
            .and_then(|t| t.code.as_deref())
            .filter(|code| !code.is_empty())
            .or_else(|| self.data.code.as_deref().filter(|code| !code.is_empty()))
    }
}
