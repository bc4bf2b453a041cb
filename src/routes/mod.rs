//! Router assembly.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::entities::Product;
use crate::error::AppError;
use crate::handlers::ResourceHandler;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Full service: common routes plus every exposed resource, with request
/// tracing, the configured request timeout and a body size cap. CORS headers
/// are stamped on every response; preflight itself is answered by the
/// resource's OPTIONS route.
pub fn app(state: AppState) -> Router {
    let products = Arc::new(ResourceHandler::<Product>::new(Arc::clone(&state.store)));
    let timeout = state.config.timeout;
    Router::new()
        .merge(common_routes(state))
        .merge(resource_routes(products))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn_with_state(timeout, request_deadline))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Whole-request deadline. Expiry drops the handler future and answers 408
/// with the error envelope.
async fn request_deadline(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => AppError::RequestTimeout(limit).into_response(),
    }
}
