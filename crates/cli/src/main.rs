//! Command-line entry point: resolve the next meeting for a group and
//! publish its artifacts.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use quorum_core::{load_group_config, MeetingPipeline, RunOutcome};
use quorum_domain::{AppConfig, QuorumError, Result, RunOptions};
use quorum_infra::{FileTemplateStore, GithubClient, HackmdClient, IcalFeedSource};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Generate and publish recurring meeting artifacts.
#[derive(Parser)]
#[command(name = "quorum", version, about, long_about = None)]
struct Cli {
    /// Meeting group to generate artifacts for
    #[arg(default_value = "tsc")]
    group: String,

    /// Compose the artifacts and print them without publishing anything
    #[arg(long)]
    dry_run: bool,

    /// Always create fresh artifacts, skipping existing-artifact lookups
    #[arg(long)]
    force: bool,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = quorum_infra::config::load_from_env()?;

    let templates = Arc::new(FileTemplateStore::new(&config.templates_dir));
    let group = load_group_config(templates.as_ref(), &cli.group).await?;

    // A group-level team setting overrides the environment-wide one.
    let team = group.notes_team_context.clone().or_else(|| config.hackmd_team.clone());

    let pipeline = MeetingPipeline::new(
        Arc::new(IcalFeedSource::new()?),
        Arc::new(GithubClient::new(&config.github_token)?),
        Arc::new(HackmdClient::new(&config.hackmd_token, team)?),
        templates,
    );

    let options = RunOptions { dry_run: cli.dry_run, force: cli.force };
    let outcome = pipeline.run(&group, options, Utc::now()).await?;

    match outcome {
        RunOutcome::NoMeetingThisCycle => {
            println!("No {} meeting within the next week; nothing to do.", cli.group);
        }
        RunOutcome::DryRun { title, issue_body, notes_body } => {
            println!("{title}\n");
            println!("--- issue ---\n{issue_body}\n");
            println!("--- notes ---\n{notes_body}");
        }
        RunOutcome::Completed { title, issue, notes, issue_body, notes_body } => {
            println!("{title}");
            println!("issue: {}", issue.url);
            println!("notes: {}", notes.url);
            mirror_artifacts(&config, &cli.group, &issue_body, &notes_body).await?;
        }
    }

    Ok(())
}

/// Mirror the composed bodies to local files when an output directory is
/// configured.
async fn mirror_artifacts(
    config: &AppConfig,
    group: &str,
    issue_body: &str,
    notes_body: &str,
) -> Result<()> {
    let Some(dir) = &config.output_dir else {
        return Ok(());
    };

    tokio::fs::create_dir_all(dir).await.map_err(|err| {
        QuorumError::Internal(format!("failed to create {}: {err}", dir.display()))
    })?;

    let issue_path = dir.join(format!("{group}_meeting_issue.md"));
    let notes_path = dir.join(format!("{group}_meeting_notes.md"));
    tokio::fs::write(&issue_path, issue_body).await.map_err(|err| {
        QuorumError::Internal(format!("failed to write {}: {err}", issue_path.display()))
    })?;
    tokio::fs::write(&notes_path, notes_body).await.map_err(|err| {
        QuorumError::Internal(format!("failed to write {}: {err}", notes_path.display()))
    })?;

    Ok(())
}
