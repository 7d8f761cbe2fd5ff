//! simcheck-gw - Similarity Check Gateway
//!
//! Accepts document submissions (file upload or pasted text), relays them to
//! the external analysis engine, and serves the match report UI. The engine
//! performs the actual similarity computation; this service only normalizes,
//! relays, and renders.

use anyhow::Result;
use clap::Parser;
use simcheck_common::config::{SettingsResolver, UploadsDirInitializer};
use simcheck_gw::engine::EngineClient;
use simcheck_gw::{build_router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

/// Command-line options (highest-priority configuration tier)
#[derive(Debug, Parser)]
#[command(name = "simcheck-gw", about = "Similarity check gateway")]
struct Args {
    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// Base URL of the analysis engine
    #[arg(long)]
    engine_url: Option<String>,

    /// Directory for transient upload spooling
    #[arg(long)]
    uploads_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Similarity Check Gateway (simcheck-gw) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let settings = SettingsResolver::new("gateway")
        .with_port(args.port)
        .with_engine_url(args.engine_url)
        .with_uploads_dir(args.uploads_dir)
        .resolve();

    let initializer = UploadsDirInitializer::new(settings.uploads_dir.clone());
    initializer.ensure_directory_exists()?;
    info!("Uploads directory: {}", settings.uploads_dir.display());
    info!("Analysis engine: {}", settings.engine_url);

    let engine = EngineClient::new(&settings.engine_url);
    let state = AppState::new(engine, settings.uploads_dir);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("simcheck-gw listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
