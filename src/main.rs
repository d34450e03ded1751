//! JuryBox - Application Entry Point
//!
//! This is the main entry point for the JuryBox server.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{ServiceExt, extract::Request};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jurybox::{
    config::CONFIG,
    create_router,
    db::{self, create_pool, repositories::TokenRepository},
    services::AuthService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!(e.clone()))
        .context("Failed to load configuration")?
        .clone();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting JuryBox server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = create_pool(&config.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    let purged = TokenRepository::purge_expired(&db_pool).await?;
    tracing::info!(purged, "Expired refresh tokens removed");

    if let Some(admin) = &config.bootstrap.admin {
        let user = AuthService::ensure_admin(&db_pool, admin).await?;
        tracing::info!(username = %user.username, "Staff account ready");
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state and router
    let state = AppState::new(db_pool, config);
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
