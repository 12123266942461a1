use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use invite_core::{AppConfig, CommentService, SheetForwarder};

/// Main entry point for the wedding invitation backend
///
/// Resolves configuration once, opens the document store, and serves the REST API until
/// Ctrl+C or SIGTERM.
///
/// # Environment Variables
/// - `PORT`: listening port (default: 8000)
/// - `INVITE_STORE`: `file` or `memory` (default: `file`)
/// - `INVITE_DATA_DIR`: root directory for the file store (default: "invite_data")
/// - `DATABASE_NAME`: database name (default: "wedding")
/// - `GOOGLE_APPS_SCRIPT_URL`: spreadsheet webhook; forwarding is skipped when unset
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration is invalid or the store cannot be opened,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("invite_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("invite_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(AppConfig::from_env()?);
    let store = cfg.open_store()?;
    let forwarder = SheetForwarder::new(cfg.sheet_url().map(str::to_string))?;

    tracing::info!(
        "++ Store: {:?} backend, database '{}'",
        cfg.store_backend(),
        store.database_name()
    );
    if !forwarder.is_configured() {
        tracing::warn!("GOOGLE_APPS_SCRIPT_URL not set, submissions will not be forwarded");
    }

    let app = router(AppState::new(cfg.clone(), CommentService::new(store, forwarder)));

    let addr = cfg.listen_addr();
    tracing::info!("++ Starting wedding invitation backend on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {}", e);
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
}
