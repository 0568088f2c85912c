//! High-level project tracking facade.
//!
//! [`ProjectTracker`] ties the REST client and the polling loop
//! together and broadcasts [`ProjectEvent`]s so that any number of
//! observers can follow a project from submission to a terminal
//! outcome. The tracker itself keeps no per-project state: freshness
//! across overlapping submissions is the caller's concern, keyed by
//! project ID.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use appforge_core::status::StatusReport;
use appforge_core::types::ProjectHandle;

use crate::api::{PipelineApi, PipelineApiError};
use crate::config::PipelineConfig;
use crate::events::ProjectEvent;
use crate::poll::{poll_until_terminal, PollConfig, PollOutcome};

/// Broadcast channel capacity for lifecycle events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Tracks generated projects against the remote pipeline.
///
/// Created once at application startup; cheap to share behind an
/// `Arc`. All methods take `&self` and hold no cross-call state.
pub struct ProjectTracker {
    api: PipelineApi,
    event_tx: broadcast::Sender<ProjectEvent>,
}

impl ProjectTracker {
    /// Create a tracker from pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api: PipelineApi::new(config),
            event_tx,
        }
    }

    /// Subscribe to lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProjectEvent> {
        self.event_tx.subscribe()
    }

    /// Borrow the underlying REST client.
    pub fn api(&self) -> &PipelineApi {
        &self.api
    }

    /// Submit a prompt and return the resulting project handle.
    ///
    /// Emits [`ProjectEvent::Submitted`] on success. See
    /// [`PipelineApi::submit`] for validation and error behavior.
    pub async fn submit(&self, prompt: &str) -> Result<ProjectHandle, PipelineApiError> {
        let handle = self.api.submit(prompt).await?;
        let _ = self.event_tx.send(ProjectEvent::Submitted {
            project_id: handle.project_id.clone(),
            execution_arn: handle.execution_arn.clone(),
        });
        Ok(handle)
    }

    /// Resolve the current canonical status of a project.
    ///
    /// One independent read per call; see
    /// [`PipelineApi::project_status`].
    pub async fn resolve(
        &self,
        user_id: &str,
        project_id: &str,
    ) -> Result<StatusReport, PipelineApiError> {
        self.api.project_status(user_id, project_id).await
    }

    /// Watch a project until a terminal outcome, emitting events along
    /// the way. Returns `None` if `cancel` fires first.
    pub async fn watch(
        &self,
        user_id: &str,
        project_id: &str,
        poll: &PollConfig,
        cancel: &CancellationToken,
    ) -> Option<PollOutcome> {
        poll_until_terminal(&self.api, user_id, project_id, poll, cancel, &self.event_tx).await
    }
}
