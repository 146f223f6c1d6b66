//! Gateway service: owns the HTTP server lifecycle.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::router::{build_router, AppState};
use tokio::sync::oneshot;
use tracing::info;

/// The HTTP gateway.
pub struct GatewayService {
    config: GatewayConfig,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl GatewayService {
    /// Creates the service after validating the configuration.
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self {
            config,
            state,
            shutdown_tx: None,
        })
    }

    /// Binds and serves until [`Self::shutdown`] fires or the server errors.
    pub async fn start(&mut self) -> Result<(), GatewayError> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let router = build_router(self.state.clone(), &self.config);
        let addr = self.config.http_addr();

        info!(addr = %addr, "starting HTTP gateway");
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        info!("HTTP gateway stopped");
        Ok(())
    }

    /// Triggers graceful shutdown.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
