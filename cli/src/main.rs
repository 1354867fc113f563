//! CLI entrypoint for manual-approval
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use approval_application::{
    GateReport, ResolveApproversUseCase, RunGateError, RunGateInput, RunGateUseCase, TicketDraft,
};
use approval_infrastructure::{
    ConfigLoader, GateSettings, GitHubConfig, GitHubTicketService, WorkflowOutput,
};
use approval_presentation::{Cli, ConsoleFormatter};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting manual approval");

    let cancel = CancellationToken::new();
    spawn_signal_listener(cancel.clone());

    let output = WorkflowOutput::from_env();
    match run(cli, cancel).await {
        Ok(report) => {
            println!("{}", ConsoleFormatter::outcome(&report));
            write_duration(&output, report.elapsed);
            if report.outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                println!(
                    "{}",
                    ConsoleFormatter::error_command(&format!("approval {}", report.outcome))
                );
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{:#}", e);
            println!("{}", ConsoleFormatter::error_command(&format!("{:#}", e)));
            if let Some(elapsed) = e.downcast_ref::<RunGateError>().and_then(RunGateError::elapsed) {
                write_duration(&output, elapsed);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<GateReport> {
    let inputs = ConfigLoader::load_with_overrides(cli.config.as_deref(), &cli.inputs)
        .context("failed to load inputs")?;
    let context = ConfigLoader::load_run_context().context("failed to load run context")?;
    let settings = GateSettings::resolve(&inputs, &context)?;

    let matcher = settings.word_matcher()?;
    for word in matcher.overlapping_words() {
        warn!("'{}' is both an approve and a deny word; it counts as approval", word);
    }

    // === Dependency Injection ===
    let service = Arc::new(GitHubTicketService::new(GitHubConfig::new(
        &settings.api_url,
        &settings.run.owner,
        &settings.run.repo,
        &settings.token,
    ))?);

    let voters = ResolveApproversUseCase::new(Arc::clone(&service))
        .execute(&settings.resolve_approvers_input())
        .await?;
    println!("{}", ConsoleFormatter::voters(&voters));

    let mut draft = TicketDraft::new(settings.run.clone(), voters.identities().to_vec())
        .with_labels(settings.labels.clone());
    if let Some(title) = &settings.issue_title {
        draft = draft.with_title(title);
    }
    if let Some(preface) = &settings.issue_body {
        draft = draft.with_preface(preface);
    }

    let report = RunGateUseCase::new(service)
        .with_config(settings.gate.clone())
        .execute(
            RunGateInput {
                draft,
                voters,
                matcher,
            },
            cancel,
        )
        .await?;

    Ok(report)
}

fn init_tracing(verbose: u8) {
    let step_debug = std::env::var("ACTIONS_STEP_DEBUG")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, step_debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Log level from `-v` count; runner step debugging raises it to debug.
fn default_level(verbose: u8, step_debug: bool) -> &'static str {
    match verbose {
        0 | 1 if step_debug => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// Cancel the gate on SIGINT or SIGTERM.
fn spawn_signal_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = sigterm.recv() => info!("Received SIGTERM"),
                        result = tokio::signal::ctrl_c() => {
                            if let Err(e) = result {
                                warn!("Failed to listen for SIGINT: {}", e);
                                return;
                            }
                            info!("Received SIGINT");
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to register SIGTERM handler: {}", e);
                    if tokio::signal::ctrl_c().await.is_err() {
                        return;
                    }
                    info!("Received SIGINT");
                }
            }
        }
        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            info!("Received Ctrl-C");
        }

        cancel.cancel();
    });
}

fn write_duration(output: &WorkflowOutput, elapsed: std::time::Duration) {
    if let Err(e) = output.set_duration(elapsed) {
        error!("{}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0, false), "warn");
        assert_eq!(default_level(1, false), "info");
        assert_eq!(default_level(2, false), "debug");
        assert_eq!(default_level(5, false), "trace");
        assert_eq!(default_level(0, true), "debug");
        assert_eq!(default_level(3, true), "trace");
    }
}
