//! Routes for one resource, mounted under its singular name.
//! `/{resource}/` (trailing slash, no id) is routed too: it lists and creates
//! like the bare path, and PUT and DELETE there answer 400 instead of falling
//! through to 404. `/{resource}/:id` never falls back to the list.

use crate::entities::Entity;
use crate::handlers::{endpoints, ResourceHandler};
use axum::{routing, Router};
use std::sync::Arc;

pub fn resource_routes<E: Entity>(handler: Arc<ResourceHandler<E>>) -> Router {
    let base = format!("/{}", E::RESOURCE);
    Router::new()
        .route(
            &base,
            routing::get(endpoints::list::<E>)
                .post(endpoints::post::<E>)
                .options(endpoints::options::<E>),
        )
        .route(
            &format!("{}/", base),
            routing::get(endpoints::list::<E>)
                .post(endpoints::post::<E>)
                .put(endpoints::put_without_id::<E>)
                .delete(endpoints::delete_without_id::<E>)
                .options(endpoints::options::<E>),
        )
        .route(
            &format!("{}/:id", base),
            routing::get(endpoints::fetch::<E>)
                .put(endpoints::put::<E>)
                .delete(endpoints::delete::<E>)
                .options(endpoints::options::<E>),
        )
        .with_state(handler)
}
