//! Product CRUD server.
//!
//! Run from repo root: `cargo run -p crud-server`
//! Settings come from the environment or a `.env` file (see `Config::from_env`).

use crud_service::{app, apply_migration, connect, AppState, Config, Product, SqlStore};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crud_service=info,crud_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = connect(&config.database).await?;
    apply_migration::<Product>(&pool).await?;

    let store = Arc::new(SqlStore::new(pool));
    let port = config.port;
    let router = app(AppState::new(config, store));

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("service running on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
