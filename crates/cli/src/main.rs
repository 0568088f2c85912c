//! Command-line driver for the generation pipeline.
//!
//! Submits a prompt, then watches the project with genuine status
//! polling until a terminal outcome. The process exit code reflects
//! the outcome, so the binary composes with shell scripting.

use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appforge_pipeline::config::PipelineConfig;
use appforge_pipeline::poll::{PollConfig, PollOutcome};
use appforge_pipeline::tracker::ProjectTracker;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appforge=info,appforge_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if prompt.trim().is_empty() {
        eprintln!("usage: appforge <prompt describing the app to generate>");
        return ExitCode::from(2);
    }

    let config = PipelineConfig::from_env();
    let tracker = ProjectTracker::new(&config);

    // The pipeline scopes projects per user; until real authentication
    // exists the identifier comes from the environment.
    let user_id = std::env::var("PIPELINE_USER_ID").unwrap_or_else(|_| "local-dev".into());

    let handle = match tracker.submit(&prompt).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "Submission failed");
            return ExitCode::FAILURE;
        }
    };

    println!("project {} submitted", handle.project_id);
    if let Some(ref arn) = handle.execution_arn {
        println!("execution: {arn}");
    }

    // Ctrl-C abandons the watch; the pipeline keeps running server-side.
    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_on_signal.cancel();
        }
    });

    match tracker
        .watch(&user_id, &handle.project_id, &PollConfig::default(), &cancel)
        .await
    {
        Some(PollOutcome::PreviewReady { preview_url }) => {
            println!("preview ready: {preview_url}");
            ExitCode::SUCCESS
        }
        Some(PollOutcome::Failed) => {
            eprintln!("build failed for project {}", handle.project_id);
            ExitCode::FAILURE
        }
        Some(PollOutcome::TimedOut) => {
            eprintln!(
                "gave up waiting for project {}; status unknown, check again later",
                handle.project_id
            );
            ExitCode::FAILURE
        }
        None => {
            eprintln!("watch cancelled");
            ExitCode::FAILURE
        }
    }
}
