//! Pipeline endpoint configuration loaded from environment variables.

use std::time::Duration;

/// Connection settings for the generation pipeline API.
///
/// Loaded once at process start. In production, override via
/// environment variables.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the pipeline API. The submission endpoint is the
    /// base URL itself; other endpoints are paths beneath it.
    pub base_url: String,
    /// Optional API key sent as the `x-api-key` header on submission.
    /// `None` means anonymous mode: the header is omitted entirely.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                         | Default                             |
    /// |---------------------------------|-------------------------------------|
    /// | `PIPELINE_API_URL`              | *(empty, requests fail until set)*  |
    /// | `PIPELINE_API_KEY`              | *(unset, header omitted)*           |
    /// | `PIPELINE_REQUEST_TIMEOUT_SECS` | `30`                                |
    ///
    /// A missing `PIPELINE_API_URL` is a misconfiguration. It is
    /// logged here and then surfaces as a transport failure on the
    /// first request rather than a startup panic.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PIPELINE_API_URL").unwrap_or_else(|_| {
            tracing::warn!("PIPELINE_API_URL is not set; all pipeline requests will fail");
            String::new()
        });

        let api_key = std::env::var("PIPELINE_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let request_timeout_secs: u64 = std::env::var("PIPELINE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("PIPELINE_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            request_timeout_secs,
        }
    }

    /// Build a configuration directly, bypassing the environment.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            request_timeout_secs: 30,
        }
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
