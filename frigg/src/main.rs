//! Main entry point for the frigg healthcheck daemon

use anyhow::{Context, Result};
use clap::Parser;
use frigg_core::{build_http_client, load_config, DaemonSettings, LogFormat, Scheduler};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Polls HTTP endpoints on fixed intervals and logs pass/fail outcomes
#[derive(Parser, Debug)]
#[command(name = "frigg")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    FRIGG_LOG_FORMAT                 pretty, compact or json (default: compact)
    FRIGG_LOG_LEVEL                  Default filter when RUST_LOG is unset (default: info)
    FRIGG_REQUEST_TIMEOUT_SECONDS    Per-request timeout, 0 disables (default: 0)
"#)]
struct Args {
    /// Path to the healthcheck configuration file
    config: PathBuf,

    /// Validate the configuration and exit without polling
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = DaemonSettings::load().context("Failed to load daemon settings")?;
    init_tracing(&settings);

    let checks = load_config(&args.config).with_context(|| {
        format!(
            "Failed to load healthcheck configuration from {}",
            args.config.display()
        )
    })?;

    for check in &checks {
        info!("{}", check.startup_line());
    }

    if args.check {
        info!("Configuration is valid: {} healthchecks", checks.len());
        return Ok(());
    }

    let client = build_http_client(&settings).context("Failed to build HTTP client")?;

    Scheduler::new(checks, client).run().await;

    Ok(())
}

fn init_tracing(settings: &DaemonSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let fmt_layer = fmt::layer().with_target(true);

    match settings.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.compact())
            .init(),
    }
}
