//! Wire contract for the generation pipeline HTTP API.
//!
//! The status endpoint returns a backend-shaped nested body in which
//! every level may be absent. The nonstandard field casing (`Build`,
//! `BuildStatus`, `BuildComplete`) is the backend's, preserved
//! verbatim via serde renames rather than normalized.

use serde::{Deserialize, Serialize};

use appforge_core::status::BuildSignals;
use appforge_core::types::Timestamp;

/// Body of a `POST {base_url}` submission request.
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub prompt: &'a str,
}

/// Response body of the status endpoint.
///
/// Everything beyond the identifying fields is optional; absence at
/// any nesting level deserializes to `None` rather than failing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectStatusResponse {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,

    #[serde(rename = "projectId", default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub prompt: Option<String>,

    #[serde(default)]
    pub build: Option<BuildEnvelope>,

    #[serde(default)]
    pub upload: Option<UploadInfo>,
}

/// Wrapper around the build system's `Build` object.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildEnvelope {
    #[serde(rename = "Build", default)]
    pub build: Option<BuildDetail>,
}

/// Build state as reported by the backend build system.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildDetail {
    #[serde(rename = "BuildStatus", default)]
    pub build_status: Option<String>,

    #[serde(rename = "BuildComplete", default)]
    pub build_complete: Option<bool>,
}

/// Upload and deployment info, attached once an artifact exists.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadInfo {
    #[serde(rename = "previewUrl", default)]
    pub preview_url: Option<String>,
}

impl ProjectStatusResponse {
    /// Flatten the nested optional structure into raw build signals.
    ///
    /// Any missing link in `build.Build.*` or `upload.previewUrl`
    /// yields `None` for that signal.
    pub fn signals(&self) -> BuildSignals {
        let detail = self.build.as_ref().and_then(|envelope| envelope.build.as_ref());
        BuildSignals {
            build_status: detail.and_then(|d| d.build_status.clone()),
            build_complete: detail.and_then(|d| d.build_complete),
            preview_url: self
                .upload
                .as_ref()
                .and_then(|upload| upload.preview_url.clone()),
        }
    }
}

/// Response body of the project-list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListResponse {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

/// One stored project row as returned by the project-list endpoint.
///
/// `status` is a backend string, not the canonical enum: list rows
/// carry whatever the backend persisted at write time.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "projectId")]
    pub project_id: String,

    #[serde(rename = "userId")]
    pub user_id: String,

    pub prompt: String,

    pub status: String,

    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,

    #[serde(rename = "previewUrl", default)]
    pub preview_url: Option<String>,

    #[serde(rename = "artifactZipKey", default)]
    pub artifact_zip_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fully_populated_status_body() {
        let json = r#"{
            "userId": "user-1",
            "projectId": "p-1",
            "prompt": "a todo app",
            "build": {"Build": {"BuildStatus": "SUCCEEDED", "BuildComplete": true}},
            "upload": {"previewUrl": "https://x/y"}
        }"#;
        let body: ProjectStatusResponse = serde_json::from_str(json).unwrap();
        let signals = body.signals();
        assert_eq!(signals.build_status.as_deref(), Some("SUCCEEDED"));
        assert_eq!(signals.build_complete, Some(true));
        assert_eq!(signals.preview_url.as_deref(), Some("https://x/y"));
    }

    #[test]
    fn parse_empty_object() {
        let body: ProjectStatusResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.signals(), BuildSignals::default());
    }

    #[test]
    fn parse_build_without_inner_object() {
        let json = r#"{"build": {}}"#;
        let body: ProjectStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.signals(), BuildSignals::default());
    }

    #[test]
    fn parse_inner_build_with_partial_fields() {
        let json = r#"{"build": {"Build": {"BuildStatus": "IN_PROGRESS"}}}"#;
        let body: ProjectStatusResponse = serde_json::from_str(json).unwrap();
        let signals = body.signals();
        assert_eq!(signals.build_status.as_deref(), Some("IN_PROGRESS"));
        assert_eq!(signals.build_complete, None);
        assert_eq!(signals.preview_url, None);
    }

    #[test]
    fn parse_upload_without_preview_url() {
        let json = r#"{"upload": {}}"#;
        let body: ProjectStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.signals().preview_url, None);
    }

    #[test]
    fn submit_request_serializes_prompt_only() {
        let request = SubmitRequest { prompt: "a chat app" };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"prompt":"a chat app"}"#
        );
    }

    #[test]
    fn parse_project_list() {
        let json = r#"{
            "projects": [
                {
                    "projectId": "p-1",
                    "userId": "user-1",
                    "prompt": "a todo app",
                    "status": "PREVIEW_READY",
                    "createdAt": "2025-11-03T12:30:00Z",
                    "previewUrl": "https://x/y",
                    "artifactZipKey": "artifacts/p-1.zip"
                },
                {
                    "projectId": "p-2",
                    "userId": "user-1",
                    "prompt": "a chat app",
                    "status": "BUILDING",
                    "createdAt": "2025-11-04T08:00:00Z"
                }
            ]
        }"#;
        let body: ProjectListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.projects.len(), 2);

        let first = &body.projects[0];
        assert_eq!(first.project_id, "p-1");
        assert_eq!(first.preview_url.as_deref(), Some("https://x/y"));
        assert_eq!(first.artifact_zip_key.as_deref(), Some("artifacts/p-1.zip"));
        assert_eq!(first.created_at.to_rfc3339(), "2025-11-03T12:30:00+00:00");

        let second = &body.projects[1];
        assert!(second.preview_url.is_none());
        assert!(second.artifact_zip_key.is_none());
    }

    #[test]
    fn parse_project_list_without_projects_field() {
        let body: ProjectListResponse = serde_json::from_str("{}").unwrap();
        assert!(body.projects.is_empty());
    }
}
