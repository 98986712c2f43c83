//! Command-line entry point for the reference data sync job.

use anyhow::Context;
use clap::Parser;
use devicemodel_core::AppConfig;
use devicemodel_sync::{run_sync, GithubClient, RefSelector, SyncOptions};
use std::path::PathBuf;
use tracing::info;

/// Sync apple-device-identifiers data into the devicemodel catalog.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Upstream ref (branch, tag or SHA)
    #[arg(long = "ref")]
    reference: Option<String>,

    /// Upstream release tag
    #[arg(long)]
    tag: Option<String>,

    /// Upstream commit SHA
    #[arg(long)]
    sha: Option<String>,

    /// Directory to write documents to (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path of the Markdown report (overrides config)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub token for API requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

/// Initialize tracing subscriber for logging
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;

    init_tracing(&config.logging.filter);
    info!("Starting devicemodel-sync v{}", env!("CARGO_PKG_VERSION"));

    let selector = RefSelector::from_flags(
        args.sha.as_deref(),
        args.tag.as_deref(),
        args.reference.as_deref(),
    )?;
    let options = SyncOptions {
        selector,
        output_dir: args.output_dir.unwrap_or(config.sync.output_dir.clone()),
        report_path: args.report.unwrap_or(config.sync.report_path.clone()),
    };

    let client = GithubClient::from_config(&config.sync, args.github_token)?;
    let summary = run_sync(&client, &options)
        .await
        .context("sync failed")?;

    println!("sync complete:");
    println!("- upstream={}", summary.repo);
    println!("- ref={}", summary.resolved.label());
    println!("- sha={}", summary.resolved.sha);
    println!("- counts={:?}", summary.counts);

    Ok(())
}
