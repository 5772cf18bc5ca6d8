//! Startup diagnostics (v1)
//!
//! Brings up a local HTTP server, runs a fixed diagnostics sequence against a
//! demo record, and exits.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                     STARTUP DIAGNOSTICS                      │
//!   │                                                              │
//!   │  ┌────────┐   ┌───────────┐   ┌───────────────────────────┐  │
//!   │  │ config │──▶│ lifecycle │──▶│ diagnostics runner        │  │
//!   │  │ (TOML) │   │ startup   │   │ invariant → introspect →  │  │
//!   │  └────────┘   └─────┬─────┘   │ placeholders → construct →│  │
//!   │       │             │         │ file_read → loopback ─────┼──┼──┐
//!   │       ▼             ▼         │ → proxy → members         │  │  │
//!   │  ┌────────┐   ┌───────────┐   └───────────────────────────┘  │  │
//!   │  │  env   │◀──│ http      │◀─────────────────────────────────┼──┘
//!   │  │ ${..}  │   │ GET /hi   │       GET http://localhost/hi    │
//!   │  └────────┘   └───────────┘                                  │
//!   │                                                              │
//!   │  Cross-cutting: observability (LogSink, tracing, metrics)    │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use startup_diagnostics::config::{self, DiagnosticsConfig};
use startup_diagnostics::observability::{logging, metrics, TracingSink};
use startup_diagnostics::{Application, Result};

#[derive(Parser, Debug)]
#[command(name = "startup-diagnostics")]
#[command(about = "Run the startup diagnostics sequence against a local server", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`
    #[arg(short, long)]
    bind: Option<String>,

    /// Keep serving /hi after the sequence until Ctrl+C
    #[arg(long)]
    keep_alive: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON log lines
    #[arg(long)]
    json: bool,
}

fn load(cli: &Cli) -> Result<DiagnosticsConfig> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => DiagnosticsConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
        config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(cli.verbose, cli.json);
            tracing::error!(error = %e, "Configuration rejected");
            std::process::exit(e.exit_code());
        }
    };

    logging::init_logging(cli.verbose, cli.json || config.observability.json_logs);
    tracing::info!("startup-diagnostics v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        content_path = %config.diagnostics.content_path,
        advise_begin = config.diagnostics.advise_begin,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let mut app = Application::new(config, Arc::new(TracingSink)).keep_alive(cli.keep_alive);
    if let Some(path) = &cli.config {
        app = app.with_config_path(path);
    }

    match app.run().await {
        Ok(report) => {
            for failure in report.failures() {
                tracing::warn!(step = failure.step, outcome = ?failure.outcome, "Step failed");
            }
            tracing::info!("Shutdown complete");
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup diagnostics failed");
            std::process::exit(e.exit_code());
        }
    }
}
