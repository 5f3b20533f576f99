use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use zoho_auth::Credentials;

fn default_token_url() -> String {
    "https://accounts.zoho.eu/oauth/v2/token".to_string()
}

fn default_api_url() -> String {
    "https://cliq.zoho.eu/api/v2".to_string()
}

fn default_webhook_url() -> String {
    "https://api.luxafor.com/webhook/v1/actions/solid_color".to_string()
}

fn default_poll_interval() -> u64 {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub zoho: ZohoSettings,
    pub luxafor: LuxaforSettings,
    #[serde(default)]
    pub app: AppSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZohoSettings {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LuxaforSettings {
    pub user_id: String,
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    #[serde(default)]
    pub start_in_background: bool,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Skip the device call when the status matches the previous cycle.
    /// Off by default: the light is re-driven every cycle so a missed
    /// update heals itself.
    #[serde(default)]
    pub skip_unchanged: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            start_in_background: false,
            poll_interval_secs: default_poll_interval(),
            skip_unchanged: false,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("LUXSYNC_CONFIG").unwrap_or_else(|_| "luxsync.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("LUXSYNC").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.zoho.client_id.is_empty() {
            return Err("zoho.client_id is required".to_string());
        }
        if self.zoho.client_secret.is_empty() {
            return Err("zoho.client_secret is required".to_string());
        }
        if self.zoho.refresh_token.is_empty() {
            return Err("zoho.refresh_token is required".to_string());
        }
        if self.luxafor.user_id.is_empty() {
            return Err("luxafor.user_id is required".to_string());
        }
        if self.app.poll_interval_secs == 0 {
            return Err("app.poll_interval_secs must be at least 1".to_string());
        }
        for (name, url) in [
            ("zoho.token_url", &self.zoho.token_url),
            ("zoho.api_url", &self.zoho.api_url),
            ("luxafor.webhook_url", &self.luxafor.webhook_url),
        ] {
            if !url.starts_with("http") {
                return Err(format!("{name} must be a valid HTTP(S) URL"));
            }
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.zoho.client_id.clone(),
            client_secret: self.zoho.client_secret.clone(),
            refresh_token: self.zoho.refresh_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn minimal_config_gets_endpoint_defaults() {
        let settings = from_toml(
            r#"
            [zoho]
            client_id = "cid"
            client_secret = "secret"
            refresh_token = "ref"

            [luxafor]
            user_id = "lux-1"
            "#,
        )
        .unwrap();

        settings.validate().unwrap();
        assert_eq!(settings.zoho.token_url, "https://accounts.zoho.eu/oauth/v2/token");
        assert_eq!(settings.zoho.api_url, "https://cliq.zoho.eu/api/v2");
        assert_eq!(
            settings.luxafor.webhook_url,
            "https://api.luxafor.com/webhook/v1/actions/solid_color"
        );
        assert_eq!(settings.app.poll_interval_secs, 4);
        assert!(!settings.app.start_in_background);
        assert!(!settings.app.skip_unchanged);
    }

    #[test]
    fn missing_required_section_fails_to_deserialize() {
        let result = from_toml(
            r#"
            [zoho]
            client_id = "cid"
            client_secret = "secret"
            refresh_token = "ref"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_required_field_fails_validation() {
        let settings = from_toml(
            r#"
            [zoho]
            client_id = "cid"
            client_secret = "secret"
            refresh_token = ""

            [luxafor]
            user_id = "lux-1"
            "#,
        )
        .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(err.contains("refresh_token"));
    }

    #[test]
    fn app_section_overrides_apply() {
        let settings = from_toml(
            r#"
            [zoho]
            client_id = "cid"
            client_secret = "secret"
            refresh_token = "ref"

            [luxafor]
            user_id = "lux-1"

            [app]
            start_in_background = true
            poll_interval_secs = 10
            skip_unchanged = true
            "#,
        )
        .unwrap();

        assert!(settings.app.start_in_background);
        assert_eq!(settings.app.poll_interval_secs, 10);
        assert!(settings.app.skip_unchanged);
    }
}
