//! Lifecycle events emitted by the project tracker.
//!
//! High-level state changes that observers (a UI, a log sink) care
//! about, broadcast while a project is tracked from submission to a
//! terminal outcome.

use serde::Serialize;

use appforge_core::status::ProjectStatus;

/// A lifecycle event for one tracked project.
#[derive(Debug, Clone, Serialize)]
pub enum ProjectEvent {
    /// A prompt was accepted and an execution started.
    Submitted {
        project_id: String,
        execution_arn: Option<String>,
    },

    /// A poll observed a different canonical status than the previous
    /// one.
    StatusChanged {
        project_id: String,
        status: ProjectStatus,
    },

    /// The preview artifact is deployed and reachable.
    PreviewReady {
        project_id: String,
        preview_url: String,
    },

    /// The pipeline reported the build as failed.
    Failed { project_id: String },

    /// Polling hit its attempt ceiling with no terminal status. The
    /// project may still complete later; this is "status unknown",
    /// not a failure verdict.
    TimedOut { project_id: String },
}
