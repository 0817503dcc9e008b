use panel_logging::{panel_debug, panel_info, panel_warn};
use reqwest::header::CONTENT_TYPE;
use runpanel_core::{
    JobConfig, JobResult, ProbeOutcome, TransportError, TransportFailure, UnreachableReason,
};
use serde::Deserialize;

use crate::settings::{ClientSettings, HEALTH_PATH, RUN_JOB_PATH};

#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync {
    /// Single attempt; never retries.
    async fn check_health(&self) -> ProbeOutcome;
}

#[async_trait::async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Posts a validated job. `Ok` carries the backend's answer even when it reports failure.
    async fn submit(&self, config: &JobConfig) -> Result<JobResult, TransportError>;
}

/// Body of `GET /api/health`; other fields are ignored.
#[derive(Debug, Deserialize)]
struct HealthReport {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// HTTP client for the automation backend.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| TransportError::new(TransportFailure::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl HealthProbe for ReqwestBackend {
    async fn check_health(&self) -> ProbeOutcome {
        let url = self.settings.endpoint(HEALTH_PATH);
        panel_debug!("GET {}", url);

        let response = match self
            .client
            .get(&url)
            .timeout(self.settings.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                panel_warn!("health probe to {} failed: {}", url, err);
                return ProbeOutcome::Unreachable(UnreachableReason::Network(err.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            panel_warn!("health probe to {} answered {}", url, status);
            return ProbeOutcome::Unreachable(UnreachableReason::BadStatus(status.as_u16()));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                return ProbeOutcome::Unreachable(UnreachableReason::Network(err.to_string()));
            }
        };
        match serde_json::from_slice::<HealthReport>(&body) {
            Ok(report) => {
                panel_info!(
                    "backend reachable at {} (status {})",
                    self.settings.base_url,
                    report.status.as_deref().unwrap_or("unknown")
                );
                ProbeOutcome::Reachable {
                    message: report.message,
                }
            }
            Err(err) => ProbeOutcome::Unreachable(UnreachableReason::InvalidBody(err.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl JobSubmitter for ReqwestBackend {
    async fn submit(&self, config: &JobConfig) -> Result<JobResult, TransportError> {
        let url = self.settings.endpoint(RUN_JOB_PATH);
        let body = serde_json::to_vec(config)
            .map_err(|err| TransportError::new(TransportFailure::InvalidBody, err.to_string()))?;
        panel_info!(
            "POST {} ({} accounts, max_comments={}, iterations={})",
            url,
            config.account_count(),
            config.max_comments(),
            config.iterations()
        );

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(timeout) = self.settings.submit_timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let mut err = TransportError::new(
                TransportFailure::HttpStatus(status.as_u16()),
                status.canonical_reason().unwrap_or_default(),
            );
            // Backends usually explain 4xx/5xx answers with a JobResult-shaped body.
            if let Some(message) = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<JobResult>(&body).ok())
                .map(|result| result.message)
                .filter(|message| !message.is_empty())
            {
                err = err.with_detail(message);
            }
            panel_warn!("run request to {} failed: {}", url, err);
            return Err(err);
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let result = serde_json::from_slice::<JobResult>(&body)
            .map_err(|err| TransportError::new(TransportFailure::InvalidBody, err.to_string()))?;
        panel_info!(
            "backend answered success={} message={:?}",
            result.success,
            result.message
        );
        Ok(result)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportFailure::Timeout, err.to_string());
    }
    TransportError::new(TransportFailure::Network, err.to_string())
}
