//! signcast-ui - Fleet dashboard entry point
//!
//! Single-binary web dashboard for the Signcast digital signage network:
//! terminal fleet, screen configurations, per-screen playlists, media
//! library, media groups, and the partnership pipeline. All state lives in
//! an in-memory store seeded with demo data.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signcast_common::config::{
    ConfigOverrides, RootFolderInitializer, RootFolderResolver, TomlConfig,
};
use signcast_ui::geocode::GeocodeClient;
use signcast_ui::store::Store;
use signcast_ui::{build_router, AppState};

/// Command-line arguments for signcast-ui
#[derive(Parser, Debug)]
#[command(name = "signcast-ui")]
#[command(about = "Fleet dashboard for the Signcast digital signage network")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "SIGNCAST_UI_PORT")]
    port: Option<u16>,

    /// Root folder holding signcast.toml
    #[arg(short, long, env = "SIGNCAST_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Configuration file (overrides the root folder's signcast.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Resolve the root folder: CLI argument outranks the resolver chain
    let root_folder = match &args.root_folder {
        Some(path) => path.clone(),
        None => RootFolderResolver::new("ui").resolve(),
    };

    let initializer = RootFolderInitializer::new(root_folder.clone());
    initializer.ensure_directory_exists()?;

    // Configuration must load before tracing starts: the file's log level
    // seeds the filter when RUST_LOG is absent.
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => initializer.config_file_path(),
    };
    let mut config = TomlConfig::load_or_default(&config_path);
    config.apply_overrides(&ConfigOverrides { port: args.port });

    init_tracing(&config, &root_folder)?;

    // Log build identification immediately after tracing init
    info!(
        "Starting Signcast UI (signcast-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", root_folder.display());
    info!("Configuration file: {}", config_path.display());

    // Seed the in-memory fleet store with the demo dataset
    let store = Store::with_fixtures();
    info!("Fleet store seeded with demo data");

    // Forward-geocoding client (disabled until an access token is configured)
    let geocoder = GeocodeClient::new(&config.geocoding)?;
    if geocoder.has_token() {
        info!("Geocoding enabled ({})", config.geocoding.base_url);
    } else {
        info!("Geocoding disabled (no access token configured)");
    }

    // Create application state and router
    let state = AppState::new(store, geocoder);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port))
        .await
        .context("Failed to bind to address")?;
    info!("signcast-ui listening on http://127.0.0.1:{}", config.port);
    info!(
        "Health check: http://127.0.0.1:{}/api/health",
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Install the tracing subscriber
///
/// `RUST_LOG` outranks the configured level. When `[logging] file` is set,
/// output goes to that file instead of stderr; relative paths resolve
/// against the root folder.
fn init_tracing(config: &TomlConfig, root_folder: &std::path::Path) -> Result<()> {
    let default_directives = format!(
        "signcast_ui={level},signcast_common={level},tower_http=info",
        level = config.logging.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_directives));

    match &config.logging.file {
        Some(file) => {
            let path = if file.is_absolute() {
                file.clone()
            } else {
                root_folder.join(file)
            };
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(log_file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
