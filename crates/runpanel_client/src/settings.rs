use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const HEALTH_PATH: &str = "/api/health";
pub const RUN_JOB_PATH: &str = "/api/run-bot";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid backend url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("backend url must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub probe_timeout: Duration,
    /// `None` leaves the run request unbounded; a run lasts as long as the backend needs.
    pub submit_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(10),
            submit_timeout: None,
        }
    }
}

impl ClientSettings {
    /// Default settings pointed at `raw`, which must be an absolute http(s) URL.
    pub fn with_base_url(raw: &str) -> Result<Self, SettingsError> {
        let parsed = url::Url::parse(raw.trim()).map_err(|err| SettingsError::InvalidUrl {
            url: raw.to_string(),
            message: err.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(SettingsError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            base_url: raw.trim().trim_end_matches('/').to_string(),
            ..Self::default()
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
