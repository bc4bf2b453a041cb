//! Create entity tables. `created_at` and `updated_at` are appended to every
//! table unless the entity declares them itself.

use crate::entities::{Entity, CREATED_AT, ID_COLUMN, UPDATED_AT};
use crate::error::StoreError;
use crate::sql::quoted;
use sqlx::AnyPool;

/// DDL for `E`, idempotent (`IF NOT EXISTS`).
pub fn create_table_sql<E: Entity>() -> String {
    let mut col_defs: Vec<String> = Vec::new();
    for c in E::columns() {
        let mut def = format!("{} {} NOT NULL", quoted(c.name), c.kind.sql_type());
        if c.name == ID_COLUMN {
            def.push_str(" PRIMARY KEY");
        }
        col_defs.push(def);
    }
    for name in [CREATED_AT, UPDATED_AT] {
        if !E::columns().iter().any(|c| c.name == name) {
            col_defs.push(format!("{} TEXT NOT NULL", quoted(name)));
        }
    }
    format!("CREATE TABLE IF NOT EXISTS {} ({})", quoted(E::TABLE), col_defs.join(", "))
}

pub async fn apply_migration<E: Entity>(pool: &AnyPool) -> Result<(), StoreError> {
    let ddl = create_table_sql::<E>();
    tracing::debug!(sql = %ddl, "migrate");
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(table = E::TABLE, "table ready");
    Ok(())
}
