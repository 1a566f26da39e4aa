//! CLI for github-to-launchpad.
//!
//! Copies issue threads from a GitHub repository into bug reports on a
//! Launchpad distribution.

use clap::Parser;
use github_to_launchpad::{
    prompt_for_credentials, IssueState, LaunchpadEnvironment, RepositoryRef, RunSummary, Runner,
    RunnerConfig, RunnerError, Settings, DEFAULT_CONSUMER_NAME,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Copy GitHub issues into Launchpad bugs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repository on GitHub to transfer issues from. Example: rcbops/ansible-lxc-rpc
    from_repository: String,

    /// The distribution name on Launchpad. Example: openstack-ansible
    to_distribution: String,

    /// State in which issues should be in to be moved. Accepted values: open, closed, all
    #[arg(long, default_value = "open")]
    state: IssueState,

    /// Skip every issue numbered at or above this value.
    #[arg(long)]
    skip_until: Option<u64>,

    /// Render bug descriptions without creating bugs.
    #[arg(long)]
    dry_run: bool,

    /// Launchpad instance: production, staging or qastaging.
    #[arg(long, env = "LAUNCHPAD_ENV", default_value = "production")]
    launchpad_env: LaunchpadEnvironment,

    /// OAuth consumer name presented to Launchpad.
    #[arg(long, default_value = DEFAULT_CONSUMER_NAME)]
    consumer_name: String,

    /// Path to a settings file with template overrides.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Both ring and aws-lc-rs end up in the dependency graph; pick one
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let repository: RepositoryRef = args.from_repository.parse()?;
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let config = RunnerConfig::new(repository, args.to_distribution)
        .with_state(args.state)
        .with_skip_until(args.skip_until)
        .with_dry_run(args.dry_run)
        .with_environment(args.launchpad_env)
        .with_consumer_name(args.consumer_name)
        .with_settings(settings);

    let credentials = prompt_for_credentials()?;
    let runner = Runner::connect(config, credentials).await?;

    let mut stdout = std::io::stdout();
    runner.run(&mut stdout).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues found: {}", summary.issues_seen);
    println!("  Issues skipped: {}", summary.issues_skipped);

    if summary.dry_run {
        println!("  Issues previewed: {}", summary.issues_previewed);
    } else {
        println!("  Bugs created: {}", summary.bugs_created);
        println!("  Bugs failed: {}", summary.bugs_failed);
    }
}
