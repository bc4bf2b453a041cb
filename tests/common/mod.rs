//! Shared fixtures: every call builds a fresh in-memory database.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use crud_service::{app, apply_migration, connect, AppState, Config, DatabaseConfig, Product, SqlStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub async fn store(migrated: bool) -> SqlStore {
    let db = DatabaseConfig::in_memory();
    let pool = connect(&db).await.unwrap();
    if migrated {
        apply_migration::<Product>(&pool).await.unwrap();
    }
    SqlStore::new(pool)
}

pub async fn test_app(migrated: bool) -> Router {
    let config = Config::from_lookup(|_| None).unwrap();
    app(AppState::new(config, Arc::new(store(migrated).await)))
}

/// Send one request; the body is parsed as JSON when present.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// POST a product and return its id.
pub async fn create_product(app: &Router, name: &str) -> String {
    let body = format!(r#"{{"name":"{}"}}"#, name);
    let (status, json) = send(app, Method::POST, "/product", Some(&body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json["result"]["id"].as_str().unwrap().to_string()
}
