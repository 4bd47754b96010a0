//! Test helpers for company server integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use company_server::{api, config::Config, db};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Router backed by the given pool
pub fn app(pool: PgPool) -> Router {
    api::create_router(pool, &Config::default())
}

/// Router whose pool points at an address nothing listens on
///
/// Requests that never reach storage behave normally; anything that needs a
/// connection fails quickly.
pub fn app_without_database() -> Router {
    app_without_database_with(Config::default())
}

/// Same as [`app_without_database`], starting from the given config
pub fn app_without_database_with(mut config: Config) -> Router {
    config.database.url = "postgresql://nobody@127.0.0.1:1/nowhere".to_string();
    config.database.min_connections = 0;
    config.database.connect_timeout_secs = 1;

    let pool = db::create_lazy_pool(&config.database).expect("lazy pool");
    api::create_router(pool, &config)
}

/// Send one request and decode the JSON body (`Value::Null` when empty)
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Send a raw, non-JSON-encoded body
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    app.oneshot(request).await.expect("response").status()
}

/// Send a raw body with an optional content type and decode the JSON reply
pub async fn send_body(
    app: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let request = request.body(Body::from(body)).expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
