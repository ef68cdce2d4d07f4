mod config;
mod gnss;
mod ingest;
mod snapshot;
mod watchdog;
mod web;

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::config::Config;
use crate::ingest::{GpsdSource, IngestExit, Ingestor};
use crate::snapshot::{Query, SnapshotCache};
use crate::watchdog::{AlarmActuator, FileActuator, LogActuator, Watchdog};

#[derive(Parser)]
#[command(name = "gnss-dash")]
#[command(about = "GNSS receiver telemetry dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check { config: String },
    /// Ingest gpsd telemetry and serve it over HTTP
    Serve { config: String },
    /// Classify satellite identifiers with the built-in numbering plan
    Classify { ids: Vec<u32> },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => check(&config),
        Commands::Serve { config } => serve(&config),
        Commands::Classify { ids } => {
            for id in ids {
                println!("{}\t{}", id, gnss::classify(id));
            }
            ExitCode::SUCCESS
        }
    }
}

fn check(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = watchdog::resolve_path(&config.watchdog.log_file, &chrono::Local::now()) {
        eprintln!("Config error: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Configuration is valid");
    println!("  gpsd:     {}", config.gpsd.address());
    println!("  http:     {}", config.web.bind);
    println!(
        "  log file: {} (every {:?}, stale after {:?})",
        config.watchdog.log_file, config.watchdog.interval, config.watchdog.threshold
    );
    println!("  numbering plan:");
    for (i, range) in config.constellations.ranges().iter().enumerate() {
        println!(
            "    {:>2}: {:<8} {}-{}",
            i + 1,
            range.name,
            range.first,
            range.last
        );
    }
    ExitCode::SUCCESS
}

fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Cannot start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> std::io::Result<()> {
    let cache = Arc::new(SnapshotCache::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (tx, rx) = mpsc::channel(config.gpsd.channel_capacity);

    let source = GpsdSource::new(config.gpsd.address(), tx, shutdown_rx.clone());
    let source_task = tokio::spawn(async move {
        if let Err(e) = source.run().await {
            error!("{}", e);
        }
    });

    let ingestor = Ingestor::new(
        cache.clone(),
        config.constellations.clone(),
        rx,
        shutdown_rx.clone(),
    );
    let ingest_task = tokio::spawn(async move {
        if ingestor.run().await == IngestExit::SourceClosed {
            warn!("Serving last known telemetry until shutdown");
        }
    });

    let actuator: Box<dyn AlarmActuator> = match &config.watchdog.alarm.output {
        Some(path) => Box::new(FileActuator::new(
            path.clone(),
            config.watchdog.alarm.active_low,
        )),
        None => Box::new(LogActuator),
    };
    let watchdog = Watchdog::new(
        config.watchdog.clone(),
        cache.clone(),
        actuator,
        shutdown_rx,
    );
    let watchdog_task = tokio::spawn(watchdog.run());

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutting down");
    };

    let result = web::run_server(&config.web, Query::new(cache), ctrl_c).await;

    let _ = shutdown_tx.send(true);
    let (source, ingest, watchdog) = tokio::join!(source_task, ingest_task, watchdog_task);
    for (name, joined) in [("gpsd source", source), ("ingestion", ingest), ("watchdog", watchdog)] {
        if let Err(e) = joined {
            error!("{} task failed: {}", name, e);
        }
    }

    result
}
