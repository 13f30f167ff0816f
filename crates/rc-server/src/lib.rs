//! rc-server: HTTP byte delivery for media, caption and preview assets.
//!
//! - Range-aware media streaming (`200`/`206`/`404`/`416`)
//! - Caption and contact-sheet delivery
//! - Catalog listing for clients
//! - Graceful shutdown via signal handling or a cancellation token

pub mod catalog;
pub mod context;
pub mod delivery;
pub mod error;
pub mod middleware;
pub mod range;
pub mod router;
pub mod routes;

use std::net::SocketAddr;

use rc_core::config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use crate::context::AppContext;

/// Start the reelcast server and run until a shutdown signal arrives.
pub async fn start(config: Config) -> rc_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| rc_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| rc_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    let ctx = AppContext::from_config(config);
    tracing::info!("Starting server on {addr}");

    serve(listener, ctx, CancellationToken::new()).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Serve the application on an already bound listener until `cancel` fires
/// or the process receives SIGINT/SIGTERM. In-flight responses are drained
/// before returning.
pub async fn serve(
    listener: TcpListener,
    ctx: AppContext,
    cancel: CancellationToken,
) -> rc_core::Result<()> {
    let app = router::build_router(ctx);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM) or cancellation.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
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
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
