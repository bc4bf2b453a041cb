//! CRUD REST resources over a relational store: a generic store adapter and a
//! per-resource handler with a fixed validation, existence and mutation order.

pub mod case;
pub mod config;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod validation;

pub use config::{Config, DatabaseConfig, Dialect};
pub use entities::{Entity, Product, Record};
pub use error::{AppError, ConfigError, StoreError};
pub use handlers::ResourceHandler;
pub use migration::apply_migration;
pub use routes::{app, common_routes, resource_routes};
pub use state::AppState;
pub use store::{connect, SqlStore, Store, TimedStore};
