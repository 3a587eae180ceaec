use crate::{create_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use textcraft_core::{Result, TextCraftConfig, TextCraftError};
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(addr: SocketAddr, config: Arc<TextCraftConfig>) -> Result<Self> {
        crate::metrics::register_metrics();
        let state = AppState::new(config)?;
        Ok(Self { state, addr })
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        info!("Starting TextCraft API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(TextCraftError::Io)?;

        info!("Server listening on http://{}", self.addr);
        info!("API documentation:");
        info!("  POST   /api/transform/text - Transform text");
        info!("  GET    /api/transform/history - Transformation history");
        info!("  GET    /api/transform/stats - Transformation statistics");
        info!("  GET    /api/transform/{{id}} - Get single transformation");
        info!("  PUT    /api/transform/{{id}}/save - Toggle saved flag");
        info!("  DELETE /api/transform/{{id}} - Delete transformation");
        info!("  GET    /api/dashboard/stats - Dashboard summary");
        info!("  GET    /health - Liveness probe");
        info!("  GET    /metrics - Prometheus metrics");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TextCraftError::Io(e.into()))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
