use crate::entities::{ColumnDef, ColumnKind, Entity, ID_COLUMN};
use crate::error::AppError;
use crate::validation::require_non_empty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Nil until assigned by the handler.
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            ..Default::default()
        }
    }
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::required(ID_COLUMN, ColumnKind::Uuid),
    ColumnDef::required("name", ColumnKind::Text),
];

impl Entity for Product {
    const TABLE: &'static str = "products";
    const RESOURCE: &'static str = "product";

    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("name", &self.name)
    }
}
