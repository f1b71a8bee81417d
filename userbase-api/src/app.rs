/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use userbase_api::{app::{build_router, AppState}, config::Config};
/// use userbase_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned into each handler through Axum's `State` extractor. The pool is
/// itself reference-counted, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /               # Liveness message
/// ├── GET  /health         # Health check with database status
/// └── /api/
///     └── POST /register   # Create an account
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let status_routes = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check));

    let api_routes = Router::new().route("/register", post(routes::auth::register));

    Router::new()
        .merge(status_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
