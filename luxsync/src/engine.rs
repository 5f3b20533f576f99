use crate::mapper;
use crate::settings::Settings;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use zoho_auth::{Credentials, TokenManager};

/// The last successfully observed presence status, published for display.
///
/// `status` is `None` until the first successful fetch. Readers get an
/// eventually-consistent snapshot; only the engine writes.
#[derive(Debug, Clone, Default)]
pub struct Observation {
    pub status: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl Observation {
    /// Display form, with an "unknown" sentinel before the first fetch.
    pub fn display(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

/// Drives the refresh → fetch → map → apply → sleep cycle forever.
///
/// Every external failure is logged and degrades into a no-op for that
/// cycle; nothing short of aborting the task stops the loop.
pub struct Engine {
    token_manager: TokenManager,
    credentials: Credentials,
    cliq: cliq_api::Client,
    luxafor: luxafor_api::Client,
    device_user_id: String,
    poll_interval: Duration,
    skip_unchanged: bool,
}

/// Handle to a running engine: the task itself plus the observation channel.
pub struct EngineHandle {
    pub task: JoinHandle<()>,
    observations: watch::Receiver<Observation>,
}

impl EngineHandle {
    /// A fresh read-only subscription to the latest observation.
    pub fn observations(&self) -> watch::Receiver<Observation> {
        self.observations.clone()
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

impl Engine {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            token_manager: TokenManager::with_token_url(&settings.zoho.token_url)?,
            credentials: settings.credentials(),
            cliq: cliq_api::Client::with_base_url(&settings.zoho.api_url)?,
            luxafor: luxafor_api::Client::with_webhook_url(&settings.luxafor.webhook_url)?,
            device_user_id: settings.luxafor.user_id.clone(),
            poll_interval: Duration::from_secs(settings.app.poll_interval_secs),
            skip_unchanged: settings.app.skip_unchanged,
        })
    }

    /// Override the poll interval (settings give whole seconds only).
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Start polling as a background task.
    ///
    /// Consumes the engine, so a process cannot accidentally run two polling
    /// loops off the same instance. Cancellation is `handle.abort()` or
    /// process exit; the sleep boundary is the only yield point that matters.
    pub fn spawn(self) -> EngineHandle {
        let (tx, rx) = watch::channel(Observation::default());
        let task = tokio::spawn(self.run(tx));
        EngineHandle {
            task,
            observations: rx,
        }
    }

    async fn run(mut self, observations: watch::Sender<Observation>) {
        tracing::info!(interval = ?self.poll_interval, "sync engine started");
        let mut previous: Option<String> = None;

        loop {
            self.cycle(&observations, &mut previous).await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One refresh → fetch → map → apply pass.
    async fn cycle(
        &mut self,
        observations: &watch::Sender<Observation>,
        previous: &mut Option<String>,
    ) {
        // A failed refresh is tolerated: fall back to whatever token exists,
        // possibly none, and let the next cycle retry.
        let token = match self.token_manager.ensure_fresh(&self.credentials).await {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::error!("token refresh failed: {e}");
                self.token_manager.current_token().map(str::to_string)
            }
        };

        // Absence means "no new information": keep the previous device state
        // and observation untouched.
        let Some(status) = self.fetch_status(token.as_deref()).await else {
            return;
        };

        if self.skip_unchanged && previous.as_deref() == Some(status.as_str()) {
            tracing::debug!(%status, "status unchanged, skipping device update");
        } else {
            let color = mapper::map_status(&status);
            tracing::debug!(%status, %color, "applying device action");
            if let Err(e) = self.luxafor.solid_color(&self.device_user_id, color).await {
                tracing::error!("luxafor update failed: {e}");
            }
        }
        *previous = Some(status.clone());

        // Published even when the device call failed, so the display always
        // tracks the last thing the API reported.
        let _ = observations.send(Observation {
            status: Some(status),
            observed_at: Some(Utc::now()),
        });
    }

    /// Fetch the current status, folding every failure into `None`.
    async fn fetch_status(&self, token: Option<&str>) -> Option<String> {
        // No token yet: skip the network call entirely.
        let token = token?;

        match self.cliq.current_status(token).await {
            Ok(resp) => resp.code().map(str::to_string),
            Err(e) => {
                tracing::error!("status fetch failed: {e}");
                None
            }
        }
    }
}
