//! REST client for the generation pipeline HTTP endpoints.
//!
//! Wraps prompt submission, project status resolution, and project
//! listing using [`reqwest`]. Every method issues exactly one outbound
//! request; retries and scheduling are the caller's concern.

use std::time::Duration;

use appforge_core::error::CoreError;
use appforge_core::status::{resolve_status, StatusReport};
use appforge_core::types::{validate_prompt, ProjectHandle};

use crate::config::PipelineConfig;
use crate::wire::{ProjectListResponse, ProjectRecord, ProjectStatusResponse, SubmitRequest};

/// HTTP client for the generation pipeline API.
///
/// Holds no per-project state; concurrent calls for the same project
/// are independent reads against current backend truth.
pub struct PipelineApi {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    request_timeout: Duration,
}

/// Errors from the pipeline REST layer.
///
/// Backend-specific failure detail is normalized into one stable
/// variant per kind; callers render the message and decide whether to
/// retry.
#[derive(Debug, thiserror::Error)]
pub enum PipelineApiError {
    /// The prompt failed client-side validation; no request was made.
    #[error("Invalid prompt: {0}")]
    Validation(#[from] CoreError),

    /// The submission endpoint returned a non-success status, or its
    /// body could not be parsed.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// The status or project-list endpoint returned a non-success
    /// status, or a body that could not be parsed.
    #[error("Status check failed: {0}")]
    StatusCheckFailed(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl PipelineApi {
    /// Create a new API client from the given configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across components).
    pub fn with_client(client: reqwest::Client, config: &PipelineConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Submit a prompt for generation.
    ///
    /// Sends a single `POST {base_url}` request with the prompt as the
    /// JSON body. The `x-api-key` header is attached only when a key
    /// is configured; a missing key means anonymous mode, not an
    /// error. The returned handle is the backend's response body taken
    /// as-is.
    ///
    /// The prompt must be non-empty after trimming; a blank prompt is
    /// rejected before any request is made.
    pub async fn submit(&self, prompt: &str) -> Result<ProjectHandle, PipelineApiError> {
        validate_prompt(prompt)?;

        let mut request = self
            .client
            .post(&self.base_url)
            .timeout(self.request_timeout)
            .json(&SubmitRequest { prompt });
        if let Some(ref key) = self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineApiError::SubmissionFailed(status_text(status)));
        }

        let handle: ProjectHandle = response.json().await.map_err(|e| {
            PipelineApiError::SubmissionFailed(format!("unparseable response body: {e}"))
        })?;

        tracing::info!(
            project_id = %handle.project_id,
            execution_arn = handle.execution_arn.as_deref().unwrap_or("<none>"),
            "Prompt submitted to pipeline",
        );

        Ok(handle)
    }

    /// Resolve the canonical status of a project.
    ///
    /// Issues a single `GET {base_url}/project-status` request with
    /// URL-encoded identifiers, flattens the nested backend body, and
    /// reduces it via [`resolve_status`]. Each call is an independent
    /// read of current backend state; nothing is cached between calls.
    pub async fn project_status(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<StatusReport, PipelineApiError> {
        let response = self
            .client
            .get(format!("{}/project-status", self.base_url))
            .timeout(self.request_timeout)
            .query(&[("userId", user_id), ("projectId", project_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineApiError::StatusCheckFailed(status_text(status)));
        }

        let body: ProjectStatusResponse = response.json().await.map_err(|e| {
            PipelineApiError::StatusCheckFailed(format!("unparseable response body: {e}"))
        })?;

        let report = resolve_status(&body.signals());
        tracing::debug!(user_id, project_id, status = ?report.status, "Resolved project status");
        Ok(report)
    }

    /// Fetch the stored project list for a user.
    ///
    /// Sends a `GET {base_url}/projects` request. Read-only display
    /// data; failures normalize the same way as status checks.
    pub async fn list_projects(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProjectRecord>, PipelineApiError> {
        let response = self
            .client
            .get(format!("{}/projects", self.base_url))
            .timeout(self.request_timeout)
            .query(&[("userId", user_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineApiError::StatusCheckFailed(status_text(status)));
        }

        let body: ProjectListResponse = response.json().await.map_err(|e| {
            PipelineApiError::StatusCheckFailed(format!("unparseable response body: {e}"))
        })?;

        Ok(body.projects)
    }
}

/// Human-readable status text for an HTTP status code, e.g.
/// `"Internal Server Error"`.
fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
