//! Endpoint handler demo host.
//!
//! Loads configuration, installs logging and metrics, registers the demo
//! handlers and serves them until SIGINT/SIGTERM.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use endpoint_handler::config::{load_config, ServerConfig};
use endpoint_handler::demo::{self, ItemStore};
use endpoint_handler::lifecycle::{signals, Shutdown};
use endpoint_handler::observability::{logging, metrics};
use endpoint_handler::HttpServer;

#[derive(Parser)]
#[command(name = "endpoint-handler")]
#[command(about = "Serve typed endpoint handlers over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("endpoint-handler v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
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

    let registry = demo::registry(ItemStore::new())?;
    for (pattern, method) in registry.routes() {
        tracing::info!(%method, pattern, "Route registered");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, registry, shutdown.cancellation())?;
    signals::spawn_signal_listener(shutdown.clone());

    let stop = shutdown.cancellation();
    server
        .run(listener, async move { stop.cancelled().await })
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
