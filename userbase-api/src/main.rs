//! # Userbase API Server
//!
//! Account registration backed by PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/userbase cargo run -p userbase-api
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userbase_api::{
    app::{build_router, AppState},
    config::Config,
};
use userbase_shared::db::{migrations, pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first so RUST_LOG from a .env file is visible to the filter
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userbase_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Userbase API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    if config.security.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; using the development placeholder");
    }

    let db = pool::create_pool(config.pool_config()).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "Database pool ready"
    );

    migrations::run_migrations(&db).await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(db.clone(), config));

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, closing database pool...");
    pool::close_pool(db).await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
