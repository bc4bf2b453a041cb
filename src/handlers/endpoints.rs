//! axum entry points. Each one extracts the raw request pieces and defers to
//! [`ResourceHandler`]; bodies arrive as bytes so malformed JSON is a 400
//! decided by the handler, not an extractor rejection.
//!
//! Extractor failures are taken as `Result` and turned into [`AppError`], so
//! an undecodable path segment or an oversized body still answers with the
//! error envelope.

use crate::entities::Entity;
use crate::error::AppError;
use crate::handlers::ResourceHandler;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    response::Response,
};
use std::sync::Arc;

pub type HandlerState<E> = State<Arc<ResourceHandler<E>>>;
type PathId = Result<Path<String>, PathRejection>;
type Body = Result<Bytes, BytesRejection>;

fn path_id(id: PathId) -> Result<String, AppError> {
    let Path(raw) = id?;
    Ok(raw)
}

pub async fn options<E: Entity>(State(handler): HandlerState<E>) -> Response {
    handler.options()
}

/// `GET /{resource}` and `GET /{resource}/`.
pub async fn list<E: Entity>(State(handler): HandlerState<E>) -> Result<Response, AppError> {
    handler.list().await
}

/// `GET /{resource}/:id`.
pub async fn fetch<E: Entity>(State(handler): HandlerState<E>, id: PathId) -> Result<Response, AppError> {
    handler.fetch(&path_id(id)?).await
}

pub async fn post<E: Entity>(State(handler): HandlerState<E>, body: Body) -> Result<Response, AppError> {
    handler.create(&body?).await
}

pub async fn put<E: Entity>(State(handler): HandlerState<E>, id: PathId, body: Body) -> Result<Response, AppError> {
    let id = path_id(id)?;
    handler.replace(&id, &body?).await
}

pub async fn delete<E: Entity>(State(handler): HandlerState<E>, id: PathId) -> Result<Response, AppError> {
    handler.remove(&path_id(id)?).await
}

/// `PUT /{resource}/`: always a missing id.
pub async fn put_without_id<E: Entity>(State(handler): HandlerState<E>, body: Body) -> Result<Response, AppError> {
    handler.replace("", &body?).await
}

/// `DELETE /{resource}/`: always a missing id.
pub async fn delete_without_id<E: Entity>(State(handler): HandlerState<E>) -> Result<Response, AppError> {
    handler.remove("").await
}
