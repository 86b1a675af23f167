mod config;
mod db;
mod error;
mod routes;
mod state;
mod store;

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};
use crate::store::PgTaskStore;

#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("could not connect to the database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("could not prepare the tasks table: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let db = db::connect(config.connect_options()?, config.pool_size)
        .await
        .map_err(StartupError::Connect)?;
    db::ensure_schema(&db).await.map_err(StartupError::Schema)?;

    let state = state::AppState {
        store: Arc::new(PgTaskStore::new(db.clone())),
    };

    let static_dir = config.static_dir.is_dir().then_some(config.static_dir.as_path());
    match static_dir {
        Some(dir) => info!("serving browser client from {}", dir.display()),
        None => warn!(
            "static directory {} not found, serving the API only",
            config.static_dir.display()
        ),
    }

    let app = routes::app(state, static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;

    info!("server is listening at http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
