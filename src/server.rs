//! HTTP server lifecycle: storage setup, router assembly, graceful shutdown.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings, StorageBackend};
use crate::db::establish_async_connection_pool;
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs until Ctrl+C or SIGTERM. The database pool is dropped once the
    /// last in-flight request has finished.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = self.settings.server.port,
            backend = ?self.settings.database.backend,
            log_level = %self.settings.logger.level,
            "Configuration loaded"
        );

        let state = self.build_state().await?;
        let router = create_router(state);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn build_state(&self) -> anyhow::Result<AppState> {
        match self.settings.database.backend {
            StorageBackend::Postgres => {
                tracing::info!(
                    max_connections = self.settings.database.max_connections,
                    min_connections = self.settings.database.min_connections,
                    connection_timeout = self.settings.database.connection_timeout,
                    "Initializing database connection pool"
                );
                let pool = establish_async_connection_pool(&self.settings.database)
                    .await
                    .context("Failed to open database connection pool")?;
                let state = AppState::postgres(pool)
                    .await
                    .context("Failed to prepare database tables")?;
                tracing::info!("Database ready");
                Ok(state)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, data is lost on shutdown");
                Ok(AppState::in_memory())
            }
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
