use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rsvp_core::config::ServerConfig;
use rsvp_core::{Catalog, InMemoryLedger};
use rsvp_server::singleton;
use rsvp_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rsvp-server")]
#[command(about = "Serve the event catalog and record RSVPs over HTTP")]
struct Args {
    /// Config file (defaults to ~/.config/rsvp/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();

    let args = Args::parse();
    let config = ServerConfig::load(args.config.as_deref())?;

    let addr = config.bind_addr()?;

    // Ensure only one instance is running
    let _lock = singleton::acquire_lock(addr)?;

    let catalog = match config.catalog_path() {
        Some(path) => Catalog::load(&path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };
    info!(events = catalog.len(), "catalog loaded");

    let state = AppState::new(catalog, InMemoryLedger::new());

    if let Some(period) = config.resync_interval() {
        tokio::spawn(rsvp_server::resync::run(state.clone(), period));
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("rsvp-server listening on http://{}", addr);

    axum::serve(listener, rsvp_server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("rsvp-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
