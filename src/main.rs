//! Follow-graph service.
//!
//! ```text
//!   POST /follow/{username}
//!        │
//!        ▼
//!  ┌───────────┐   ┌────────────┐   ┌───────────────┐
//!  │   http    │──▶│    auth    │──▶│ relationship  │
//!  │  server   │   │ token gate │   │ FollowService │
//!  └───────────┘   └────────────┘   └──────┬────────┘
//!                                          │
//!                         ┌────────────────┴───────────────┐
//!                         ▼                                ▼
//!                  ┌─────────────┐                  ┌─────────────┐
//!                  │  directory  │                  │    graph    │
//!                  │UserDirectory│                  │  EdgeStore  │
//!                  └─────────────┘                  └─────────────┘
//!                         └──────────── storage ───────────┘
//!                                   (JSON snapshot)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use follow_graph::config::loader::load_config;
use follow_graph::lifecycle::{signals, Shutdown, Stores};
use follow_graph::observability::{logging, metrics};
use follow_graph::{HttpServer, ServiceConfig};

#[derive(Parser)]
#[command(name = "follow-graph")]
#[command(about = "Follow/unfollow relationship service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);
    tracing::info!("follow-graph v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        snapshot = ?config.storage.snapshot_path,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let stores = Stores::load(&config)?;
    let server = HttpServer::new(config.clone(), stores.app_state());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    server.run(listener, shutdown.subscribe()).await?;

    if let Err(e) = stores.persist() {
        tracing::error!(error = %e, "Failed to save snapshot");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
