//! skinsight-web - skin lesion classification web service
//!
//! Serves the five-page browser UI, keeps per-client sessions in memory,
//! stores accounts in `users.db` under the root folder and forwards
//! classification requests to a TensorFlow Serving endpoint.

use anyhow::{Context, Result};
use clap::Parser;
use skinsight_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use skinsight_common::credentials::SqliteCredentialStore;
use skinsight_web::accounts::AccountService;
use skinsight_web::classify::{ClassificationPipeline, TfServingAdapter, UploadStaging};
use skinsight_web::session::SessionRegistry;
use skinsight_web::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How often idle sessions are swept when no requests arrive
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Command-line arguments for skinsight-web
#[derive(Parser, Debug)]
#[command(name = "skinsight-web")]
#[command(about = "Skin lesion classification web service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the configuration file)
    #[arg(short, long, env = "SKINSIGHT_PORT")]
    port: Option<u16>,

    /// Root folder holding users.db and staged uploads
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Configuration file (default: platform config dir, then /etc/skinsight)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides the configuration file)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration decides the log level, so it is read before tracing starts
    let config_path = TomlConfig::locate(args.config.as_deref());
    let config = match &config_path {
        Some(path) => TomlConfig::load(path)?,
        None => TomlConfig::default(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Skinsight web service (skinsight-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_path {
        Some(path) => info!("Configuration: {}", path.display()),
        None => warn!("No configuration file found, using built-in defaults"),
    }

    let root_folder = RootFolderResolver::new()
        .with_cli_override(args.root_folder)
        .with_toml_value(config.root_folder.clone())
        .resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directories()
        .context("Failed to prepare root folder")?;
    info!("Root folder: {}", initializer.root().display());

    let uploads = UploadStaging::new(initializer.uploads_dir());
    if let Err(e) = uploads.purge_stale() {
        warn!("Could not purge stale uploads in {}: {}", uploads.dir().display(), e);
    }

    let store = SqliteCredentialStore::new(initializer.users_db_path());
    info!("Credential store: {}", store.path().display());
    let accounts = AccountService::new(Arc::new(store));

    let adapter = TfServingAdapter::new(config.classifier.endpoint.clone(), config.classifier.timeout())
        .context("Failed to create classifier client")?;
    info!(
        "Classifier endpoint: {} (timeout {} ms, confidence threshold {})",
        adapter.endpoint(),
        config.classifier.timeout_ms,
        config.classifier.confidence_threshold
    );
    let pipeline = ClassificationPipeline::new(Arc::new(adapter), config.classifier.confidence_threshold);

    let sessions = SessionRegistry::new(config.session.idle_timeout());
    spawn_session_sweeper(sessions.clone());

    let state = AppState::new(
        sessions,
        accounts,
        pipeline,
        uploads,
        config.session.max_upload_bytes,
    );
    let app = build_router(state);

    let bind_address = args.bind.unwrap_or(config.bind_address);
    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", bind_address, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("skinsight-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Periodically drop idle sessions so their staged uploads are released
fn spawn_session_sweeper(sessions: SessionRegistry) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.sweep().await;
        }
    });
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
