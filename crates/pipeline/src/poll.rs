//! Bounded-backoff status polling.
//!
//! A watched project is resolved repeatedly with exponentially
//! increasing delays until a terminal status, the attempt ceiling, or
//! cancellation. There is no "assume ready after N seconds" shortcut:
//! only a real `PREVIEW_READY` or `FAILED` resolution ends a watch
//! early, and exhausting the ceiling is reported as its own outcome
//! rather than a fabricated success.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use appforge_core::status::ProjectStatus;

use crate::api::PipelineApi;
use crate::events::ProjectEvent;

/// Tunable parameters for the polling backoff strategy.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the first status poll.
    pub initial_delay: Duration,
    /// Upper bound on the delay between polls.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each poll.
    pub multiplier: f64,
    /// Maximum number of polls before giving up with
    /// [`PollOutcome::TimedOut`].
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            max_attempts: 60,
        }
    }
}

/// Calculate the next poll delay from the current delay and config.
///
/// The result is clamped to [`PollConfig::max_delay`].
pub fn next_delay(current: Duration, config: &PollConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// How a watch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The preview artifact is ready at the given URL.
    PreviewReady { preview_url: String },
    /// The pipeline reported the build as failed.
    Failed,
    /// The attempt ceiling was reached without a terminal status.
    TimedOut,
}

/// Poll a project until it reaches a terminal status.
///
/// Emits [`ProjectEvent`]s on the broadcast channel as the observed
/// status changes. Transient resolve failures are logged and consume
/// an attempt; they do not end the watch. Returns `None` if `cancel`
/// is triggered first.
pub async fn poll_until_terminal(
    api: &PipelineApi,
    user_id: &str,
    project_id: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
    event_tx: &broadcast::Sender<ProjectEvent>,
) -> Option<PollOutcome> {
    let mut delay = config.initial_delay;
    let mut last_status: Option<ProjectStatus> = None;

    for attempt in 1..=config.max_attempts {
        // Wait before polling, respecting cancellation.
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(project_id, "Watch cancelled");
                return None;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        match api.project_status(user_id, project_id).await {
            Ok(report) => {
                if last_status != Some(report.status) {
                    last_status = Some(report.status);
                    let _ = event_tx.send(ProjectEvent::StatusChanged {
                        project_id: project_id.to_string(),
                        status: report.status,
                    });
                }

                match report.status {
                    ProjectStatus::PreviewReady => {
                        if let Some(preview_url) = report.preview_url {
                            tracing::info!(project_id, attempt, %preview_url, "Preview ready");
                            let _ = event_tx.send(ProjectEvent::PreviewReady {
                                project_id: project_id.to_string(),
                                preview_url: preview_url.clone(),
                            });
                            return Some(PollOutcome::PreviewReady { preview_url });
                        }
                        // The mapping only emits PREVIEW_READY with a URL;
                        // treat a report without one as still in progress.
                        tracing::warn!(project_id, "PREVIEW_READY report without a preview URL");
                    }
                    ProjectStatus::Failed => {
                        tracing::info!(project_id, attempt, "Build failed");
                        let _ = event_tx.send(ProjectEvent::Failed {
                            project_id: project_id.to_string(),
                        });
                        return Some(PollOutcome::Failed);
                    }
                    ProjectStatus::Processing | ProjectStatus::Building => {
                        tracing::debug!(
                            project_id,
                            attempt,
                            status = ?report.status,
                            "Project still in progress",
                        );
                    }
                }
            }
            Err(e) => {
                tracing::warn!(project_id, attempt, error = %e, "Status poll failed");
            }
        }

        delay = next_delay(delay, config);
    }

    tracing::warn!(
        project_id,
        attempts = config.max_attempts,
        "Watch exhausted its attempt ceiling; status unknown",
    );
    let _ = event_tx.send(ProjectEvent::TimedOut {
        project_id: project_id.to_string(),
    });
    Some(PollOutcome::TimedOut)
}
