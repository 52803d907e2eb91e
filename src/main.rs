//! Credential Intake Service
//!
//! A small HTTP service built with Tokio and Axum that accepts
//! login-style credential submissions and records them durably.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │              CREDENTIAL INTAKE                 │
//!                    │                                                │
//!   GET /csrf-token  │  ┌──────────┐                                  │
//!   ─────────────────┼─▶│  http    │──▶ security::csrf (issue)        │
//!                    │  │ handlers │                                  │
//!   POST /submit     │  └────┬─────┘                                  │
//!   ─────────────────┼──────▶│                                        │
//!                    │       ▼                                        │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │               pipeline                    │ │
//!                    │  │  rate_limit → csrf verify → validate      │ │
//!                    │  │      → bcrypt hash → storage append       │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    │                                                │
//!                    │  ┌────────────────────────────────────────┐   │
//!                    │  │          Cross-Cutting Concerns          │  │
//!                    │  │  config │ observability │ lifecycle      │  │
//!                    │  └────────────────────────────────────────┘   │
//!                    └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use credential_intake::config::{loader::load_config, IntakeConfig};
use credential_intake::http::HttpServer;
use credential_intake::lifecycle::{signals, Shutdown};
use credential_intake::observability;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "credential-intake", version, about = "Credential submission intake service")]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    observability::logging::init();

    tracing::info!("credential-intake v0.1.0 starting");

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => IntakeConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_window_secs = config.rate_limit.window_secs,
        rate_limit_max_requests = config.rate_limit.max_requests,
        bcrypt_cost = config.hashing.cost,
        data_file = %config.storage.data_file,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Graceful shutdown on Ctrl+C / SIGTERM
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::wait_for_signal(shutdown));

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
