//! HTTP surface: router assembly and the serve loop

pub mod response;

use axum::{
    extract::State,
    http::{Method, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::error::{AppError, ServerError, ServerResult};
use crate::features;
use crate::middleware;

/// Connect, migrate and serve until a shutdown signal arrives
pub async fn serve(config: Config) -> ServerResult<()> {
    let pool = db::create_pool(&config.database).await?;
    db::migrate(&pool).await?;

    let app = create_router(pool, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| ServerError::Config(format!("invalid listen address: {}", e)))?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Build the application router with all routes and middleware
pub fn create_router(pool: PgPool, config: &Config) -> Router {
    let service_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(pool.clone());

    Router::new()
        .merge(service_routes)
        .merge(features::router(pool, config.server.max_load_body_bytes))
        .fallback(fallback)
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Company Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    db::health_check(&pool).await?;

    Ok(Json(json!({
        "status": "healthy",
        "database": "connected"
    })))
}

async fn fallback(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("Received terminate signal, starting graceful shutdown"),
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
