//! Per-resource CRUD decision paths: list, fetch, create, replace, remove, preflight.
//!
//! Every request follows one linear path with a fixed order: identifier format
//! first, then body, then existence, then the mutation. A failed step returns
//! before the next one runs, so malformed input never reaches the store.

use crate::case::to_api_case;
use crate::entities::{Entity, Record};
use crate::error::AppError;
use crate::response::{created, no_content, success_ok};
use crate::store::Store;
use crate::validation::{parse_entity, parse_id};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

pub struct ResourceHandler<E> {
    store: Arc<dyn Store>,
    table: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceHandler<E> {
    fn clone(&self) -> Self {
        ResourceHandler {
            store: Arc::clone(&self.store),
            table: self.table,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> ResourceHandler<E> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        ResourceHandler {
            store,
            table: E::TABLE,
            _entity: PhantomData,
        }
    }

    /// Preflight: accepted, no content, no store access.
    pub fn options(&self) -> Response {
        no_content()
    }

    pub async fn list(&self) -> Result<Response, AppError> {
        let rows = self.store.get_all(self.table).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(render(E::decode(row)?)?);
        }
        tracing::debug!(table = self.table, count = items.len(), "listed");
        Ok(success_ok(items).into_response())
    }

    pub async fn fetch(&self, raw_id: &str) -> Result<Response, AppError> {
        let id = parse_id(raw_id)?;
        let row = self.find(id).await?;
        Ok(success_ok(render(E::decode(row)?)?).into_response())
    }

    pub async fn create(&self, body: &[u8]) -> Result<Response, AppError> {
        let mut entity: E = parse_entity(body)?;
        if entity.id().is_nil() {
            entity.assign_id(Uuid::new_v4());
        }
        let id = entity.id();
        self.store.create(&entity.encode()?, self.table).await?;
        tracing::debug!(table = self.table, %id, "created");
        Ok(created(id).into_response())
    }

    pub async fn replace(&self, raw_id: &str, body: &[u8]) -> Result<Response, AppError> {
        let id = parse_id(raw_id)?;
        let mut entity: E = parse_entity(body)?;
        entity.assign_id(id);
        self.find(id).await?;
        self.store.update(id, &entity.encode()?, self.table).await?;
        tracing::debug!(table = self.table, %id, "replaced");
        Ok(no_content())
    }

    pub async fn remove(&self, raw_id: &str) -> Result<Response, AppError> {
        let id = parse_id(raw_id)?;
        self.find(id).await?;
        self.store.delete(id, self.table).await?;
        tracing::debug!(table = self.table, %id, "deleted");
        Ok(no_content())
    }

    /// Existence check; absent becomes 404, a broken store stays a store error.
    async fn find(&self, id: Uuid) -> Result<Record, AppError> {
        self.store
            .get_one(id, self.table)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", E::RESOURCE, id)))
    }
}

fn render<E: Entity>(entity: E) -> Result<Value, AppError> {
    let mut value = Value::Object(entity.encode()?);
    to_api_case(&mut value);
    Ok(value)
}
