//! Canonical project lifecycle status and the raw-signal mapping.
//!
//! The backend reports build state through loosely-shaped nested JSON.
//! This module reduces those raw signals to one closed enum. The
//! mapping is total: any combination of absent, ambiguous, or
//! unrecognized fields resolves to a status rather than an error.

use serde::{Deserialize, Serialize};

// Backend build-status vocabulary. The set is open-ended on the wire;
// only these three values are recognized, everything else maps to
// `Processing`.
pub const BUILD_IN_PROGRESS: &str = "IN_PROGRESS";
pub const BUILD_SUCCEEDED: &str = "SUCCEEDED";
pub const BUILD_FAILED: &str = "FAILED";

/// Canonical lifecycle status of a generated project.
///
/// A project moves through zero or more `Processing`/`Building`
/// observations and reaches at most one terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Submission accepted, no definite build signal yet.
    Processing,
    /// The backend reported the build as running.
    Building,
    /// Build succeeded and the preview artifact is deployed.
    PreviewReady,
    /// The backend reported the build as failed.
    Failed,
}

impl ProjectStatus {
    /// Whether this status ends the project lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::PreviewReady | ProjectStatus::Failed)
    }
}

/// Raw build signals extracted from one status poll.
///
/// `None` means the corresponding nested field was absent from the
/// backend body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSignals {
    pub build_status: Option<String>,
    pub build_complete: Option<bool>,
    pub preview_url: Option<String>,
}

/// Canonical outcome of one status resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: ProjectStatus,

    /// Present only when `status` is [`ProjectStatus::PreviewReady`].
    #[serde(
        rename = "previewUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_url: Option<String>,
}

/// Reduce raw build signals to a canonical [`StatusReport`].
///
/// Precedence when several signals are present:
/// `Failed` > `PreviewReady` > `Building` > `Processing`.
///
/// - `Failed` iff `build_status == FAILED`, regardless of completeness.
///   A failed build wins even when a stale preview URL leaks through.
/// - `PreviewReady` iff `build_complete == true`, `build_status ==
///   SUCCEEDED`, and a non-empty preview URL is present. Only then is
///   the URL reported.
/// - `Building` iff `build_status == IN_PROGRESS`.
/// - Everything else, including unrecognized `build_status` values,
///   is `Processing`.
pub fn resolve_status(signals: &BuildSignals) -> StatusReport {
    let build_status = signals.build_status.as_deref();
    let preview_url = signals.preview_url.as_deref().filter(|url| !url.is_empty());

    if build_status == Some(BUILD_FAILED) {
        return StatusReport {
            status: ProjectStatus::Failed,
            preview_url: None,
        };
    }

    if signals.build_complete == Some(true) && build_status == Some(BUILD_SUCCEEDED) {
        if let Some(url) = preview_url {
            return StatusReport {
                status: ProjectStatus::PreviewReady,
                preview_url: Some(url.to_string()),
            };
        }
    }

    if build_status == Some(BUILD_IN_PROGRESS) {
        return StatusReport {
            status: ProjectStatus::Building,
            preview_url: None,
        };
    }

    StatusReport {
        status: ProjectStatus::Processing,
        preview_url: None,
    }
}
