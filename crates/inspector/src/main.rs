use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{signal, time};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civil_inspector::{create_example_config, CivilClient, Inspector, InspectorConfig};

#[derive(Parser, Debug)]
#[command(name = "civil-inspector")]
#[command(about = "Reports listing phases and voter eligibility from registry snapshots")]
struct Args {
    /// Path to inspector configuration file
    #[arg(short, long, default_value = "inspector.toml")]
    config: String,

    /// Write an example configuration to the config path and exit
    #[arg(long)]
    init: bool,

    /// Run a single pass and print the report as JSON
    #[arg(long)]
    once: bool,

    /// Override the poll interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_level.as_deref(), args.json_logs);

    if args.init {
        create_example_config(&args.config)
            .with_context(|| format!("writing example config to {}", args.config))?;
        info!("Wrote example configuration to {}", args.config);
        return Ok(());
    }

    let mut config = InspectorConfig::load(&args.config)
        .with_context(|| format!("loading config {}", args.config))?;
    if let Some(interval) = args.interval {
        config.poll_interval_secs = interval;
        config.validate()?;
    }

    info!("Starting Civil registry inspector");
    info!("Snapshot: {}", config.client.snapshot_path);
    info!("Watching {} listings", config.enabled_listings().len());
    if let Some(now) = config.client.evaluation_time {
        warn!("Evaluating deadlines at fixed time {}", now);
    }

    let client = CivilClient::connect(&config.client)?;
    let mut inspector = Inspector::new(client, &config);

    if args.once {
        let report = inspector.inspect_all()?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        inspector.shutdown();
        return Ok(());
    }

    let mut interval_timer = time::interval(Duration::from_secs(config.poll_interval_secs));
    let mut iteration = 0u64;

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
            _ = interval_timer.tick() => {
                iteration += 1;
                debug!("Starting inspection pass {}", iteration);

                match inspector.inspect_all() {
                    Ok(report) => {
                        let loaded = report.listings.iter().filter(|l| l.loaded).count();
                        debug!("Pass {}: {} of {} listings loaded", iteration, loaded, report.listings.len());
                    }
                    Err(e) => {
                        // Keep polling; the sync layer may be mid-write
                        error!("Error in inspection pass {}: {}", iteration, e);
                    }
                }
            }
        }
    }

    inspector.shutdown();
    Ok(())
}

fn init_logging(log_level: Option<&str>, json: bool) {
    let level = log_level
        .and_then(|l| l.parse().ok())
        .unwrap_or(tracing::Level::INFO);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("civil_inspector={},civil_selectors={}", level, level).into()
    });

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
