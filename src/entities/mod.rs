//! Entity contract shared by every exposed resource.
//!
//! An entity names its table, describes its business columns for migration and
//! converts itself to and from a [`Record`], the column-keyed form the store
//! adapter understands. The codec is derived by serde, so there is no runtime
//! type inspection.

pub mod product;

pub use product::Product;

use crate::error::{AppError, StoreError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One row, keyed by snake_case column name.
pub type Record = Map<String, Value>;

pub const ID_COLUMN: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Uuid,
    Text,
}

impl ColumnKind {
    /// Portable SQL type accepted by both sqlite and PostgreSQL. Uuids are
    /// stored in their hyphenated text form.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Uuid | ColumnKind::Text => "TEXT",
        }
    }
}

/// A business column. Every column is `NOT NULL`.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnDef {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        ColumnDef { name, kind }
    }
}

pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Backing table.
    const TABLE: &'static str;
    /// Singular resource name, used in messages and as the route segment.
    const RESOURCE: &'static str;

    /// Columns other than `created_at` / `updated_at`; must include `id`.
    fn columns() -> &'static [ColumnDef];

    fn id(&self) -> Uuid;

    fn assign_id(&mut self, id: Uuid);

    /// Field-level rules checked before any store access.
    fn validate(&self) -> Result<(), AppError>;

    fn encode(&self) -> Result<Record, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(record) => Ok(record),
            _ => Err(StoreError::NotAnObject),
        }
    }

    fn decode(record: Record) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(Value::Object(record))?)
    }
}
