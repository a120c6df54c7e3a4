//! # Bazaar API server
//!
//! ```text
//! .env / environment ──► ApiConfig
//!                            │
//!                            ▼
//!            Database (migrate, optional seed) ──► AppState::load
//!                                                       │
//!                                                       ▼
//!                                   axum::serve on BAZAAR_HOST:BAZAAR_PORT
//! ```

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bazaar_api::{build_router, ApiConfig, AppState};
use bazaar_db::{seed_default_catalog, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bazaar_api=info,bazaar_db=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    info!("Starting Bazaar API server...");
    info!(
        addr = %config.socket_addr(),
        database = %config.database_path,
        seed_catalog = config.seed_catalog,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()).await?;

    if config.seed_catalog {
        seed_default_catalog(&db).await?;
    }

    let state = AppState::load(db.clone()).await?;
    let app = build_router(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// A handler that fails to install never fires; the other one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
