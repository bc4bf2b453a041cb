//! Standard response envelope helpers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `{"status": <code>, "result": <payload>}`
#[derive(Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub result: T,
}

#[derive(Serialize)]
pub struct CreatedId {
    pub id: uuid::Uuid,
}

pub fn success_ok<T: Serialize>(result: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            status: StatusCode::OK.as_u16(),
            result,
        }),
    )
}

pub fn created(id: uuid::Uuid) -> (StatusCode, Json<Envelope<CreatedId>>) {
    success_ok(CreatedId { id })
}

/// 204 with an empty body; used for preflight, replace and delete.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
