use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trek_planner::config::database::{mask_database_url, run_migrations, DatabaseConfig};
use trek_planner::config::environment::{EnvironmentConfig, StorageBackend};
use trek_planner::create_app;
use trek_planner::repositories::MemoryStore;
use trek_planner::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    info!("🥾 Trek Planner API");

    let config = EnvironmentConfig::from_env()?;
    info!(environment = %config.environment, backend = ?config.storage_backend, "configuration loaded");

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            info!(url = %mask_database_url(&db_config.url), "connecting to database");
            let pool = db_config.create_pool().await?;
            run_migrations(&pool).await?;
            AppState::postgres(pool, config.clone())
        }
        StorageBackend::Memory => {
            info!("using in-memory storage, data is lost on shutdown");
            AppState::in_memory(Arc::new(MemoryStore::new()), config.clone())
        }
    };

    if state.plan_policy.trip_params_mutable {
        info!("plan trip parameters may be edited after creation");
    }

    let app = create_app(state);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_url()))?;

    info!("🌐 Listening on http://{}", addr);
    info!("🔍 Endpoints:");
    info!("   GET    /health");
    info!("   GET    /api/routes/suggested?location=&difficulty=&interests=");
    info!("   GET    /api/routes/:id");
    info!("   GET    /api/plans");
    info!("   POST   /api/plans");
    info!("   GET    /api/plans/:id");
    info!("   PUT    /api/plans/:id");
    info!("   PATCH  /api/plans/:id");
    info!("   DELETE /api/plans/:id");
    info!("   GET    /api/history-inputs");
    info!("   POST   /api/history-inputs");
    info!("   DELETE /api/history-inputs/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("server error: {}", e);
            e
        })?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C received, shutting down"),
        _ = terminate => info!("🛑 SIGTERM received, shutting down"),
    }
}
