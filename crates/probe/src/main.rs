//! Multitx Probe - Main Entry Point
//! Verifies that all configured resources can be opened, used and committed
//! together through the coordinator.

mod probe;

use anyhow::{Context, Result};
use clap::Parser;
use multitx_core::{MultiTransactionCoordinator, ResourceName};
use multitx_infra_sqlite::{build_registry, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "multitx-probe")]
#[command(about = "Run one coordinated transaction across configured resources", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, env = "MULTITX_CONFIG")]
    config: Option<PathBuf>,

    /// Resource to include, in begin order (repeatable; default: all configured)
    #[arg(short, long = "resource")]
    resources: Vec<String>,
}

fn init_logging() {
    let log_format = std::env::var("MULTITX_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("multitx=info"));

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    info!("Multitx probe v{} starting...", VERSION);

    // 1. Load configuration
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if settings.resources.is_empty() {
        anyhow::bail!("No resources configured");
    }

    let names: Vec<ResourceName> = if cli.resources.is_empty() {
        settings.resources.iter().map(|r| r.name.clone()).collect()
    } else {
        cli.resources
            .iter()
            .map(ResourceName::new)
            .collect::<std::result::Result<_, _>>()
            .context("Invalid resource name")?
    };

    // 2. Setup dependencies (DI wiring)
    let selected = settings.select(&names)?;
    let registry = build_registry(selected)
        .await
        .context("Failed to open resource pools")?;
    let coordinator =
        MultiTransactionCoordinator::new(Arc::new(registry)).with_config(settings.coordinator.clone());

    // 3. Run
    let outcome = probe::run_probe(&coordinator, &names)
        .await
        .context("Probe failed")?;

    info!(
        resources = outcome.into_option().unwrap_or(0),
        "Probe committed on all resources"
    );
    Ok(())
}
