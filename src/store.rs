//! Store adapter: generic create/read/update/delete keyed by table name.
//!
//! The adapter sees rows only as [`Record`]s and never validates their
//! contents or identifier formats; callers hand it well-formed input. It holds
//! nothing but a shared pool, so one instance serves every request.

use crate::config::DatabaseConfig;
use crate::entities::{Record, CREATED_AT, UPDATED_AT};
use crate::error::StoreError;
use crate::sql::{self, BindValue, QueryBuf};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use sqlx::any::{Any, AnyArguments, AnyPoolOptions, AnyRow};
use sqlx::AnyPool;
use sqlx::query::Query;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert one row. Duplicate ids, a missing table or a lost connection fail.
    async fn create(&self, record: &Record, table: &str) -> Result<(), StoreError>;

    /// Every row; an empty table is `Ok(vec![])`.
    async fn get_all(&self, table: &str) -> Result<Vec<Record>, StoreError>;

    /// `Ok(None)` means absent, which is not an error.
    async fn get_one(&self, id: Uuid, table: &str) -> Result<Option<Record>, StoreError>;

    /// Replace the row's mutable columns. Existence is the caller's concern.
    async fn update(&self, id: Uuid, record: &Record, table: &str) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid, table: &str) -> Result<(), StoreError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Open the shared pool. In-memory sqlite is pinned to one connection that is
/// never recycled, since the database dies with it.
pub async fn connect(config: &DatabaseConfig) -> Result<AnyPool, StoreError> {
    sqlx::any::install_default_drivers();
    let mut opts = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout);
    if config.dialect.is_in_memory(&config.uri) {
        opts = opts
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    let pool = opts.connect(&config.url()).await?;
    tracing::info!(dialect = %config.dialect, "store connected");
    Ok(pool)
}

#[derive(Clone)]
pub struct SqlStore {
    pool: AnyPool,
}

impl SqlStore {
    pub fn new(pool: AnyPool) -> Self {
        SqlStore { pool }
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = q.params.len(), "execute");
        let done = build(q).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(sql = %q.sql, params = q.params.len(), "query");
        let rows = build(q).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn query_one(&self, q: &QueryBuf) -> Result<Option<Record>, StoreError> {
        tracing::debug!(sql = %q.sql, params = q.params.len(), "query");
        let row = build(q).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(row_to_record))
    }
}

#[async_trait]
impl Store for SqlStore {
    async fn create(&self, record: &Record, table: &str) -> Result<(), StoreError> {
        let mut record = record.clone();
        let now = timestamp();
        for col in [CREATED_AT, UPDATED_AT] {
            if record.get(col).map_or(true, Value::is_null) {
                record.insert(col.to_string(), now.clone());
            }
        }
        self.execute(&sql::insert(table, &record)).await?;
        Ok(())
    }

    async fn get_all(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        self.query_many(&sql::select_all(table)).await
    }

    async fn get_one(&self, id: Uuid, table: &str) -> Result<Option<Record>, StoreError> {
        self.query_one(&sql::select_by_id(table, &id.to_string())).await
    }

    async fn update(&self, id: Uuid, record: &Record, table: &str) -> Result<(), StoreError> {
        let mut record = record.clone();
        record.insert(UPDATED_AT.to_string(), timestamp());
        let affected = self.execute(&sql::update(table, &id.to_string(), &record)).await?;
        ensure_affected(affected, table, id)
    }

    async fn delete(&self, id: Uuid, table: &str) -> Result<(), StoreError> {
        let affected = self.execute(&sql::delete(table, &id.to_string())).await?;
        ensure_affected(affected, table, id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Wraps any store so that each call is bounded by `limit`. Expiry drops the
/// in-flight call and reports [`StoreError::Timeout`].
pub struct TimedStore {
    inner: Arc<dyn Store>,
    limit: Duration,
}

impl TimedStore {
    pub fn new(inner: Arc<dyn Store>, limit: Duration) -> Self {
        TimedStore { inner, limit }
    }
}

#[async_trait]
impl Store for TimedStore {
    async fn create(&self, record: &Record, table: &str) -> Result<(), StoreError> {
        bounded(self.limit, self.inner.create(record, table)).await
    }

    async fn get_all(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        bounded(self.limit, self.inner.get_all(table)).await
    }

    async fn get_one(&self, id: Uuid, table: &str) -> Result<Option<Record>, StoreError> {
        bounded(self.limit, self.inner.get_one(id, table)).await
    }

    async fn update(&self, id: Uuid, record: &Record, table: &str) -> Result<(), StoreError> {
        bounded(self.limit, self.inner.update(id, record, table)).await
    }

    async fn delete(&self, id: Uuid, table: &str) -> Result<(), StoreError> {
        bounded(self.limit, self.inner.delete(id, table)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        bounded(self.limit, self.inner.ping()).await
    }
}

async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}

/// A row that disappeared between the handler's existence check and the
/// mutation surfaces here.
fn ensure_affected(affected: u64, table: &str, id: Uuid) -> Result<(), StoreError> {
    if affected == 0 {
        return Err(StoreError::NoRowsAffected {
            table: table.to_string(),
            id,
        });
    }
    Ok(())
}

fn timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

fn build(q: &QueryBuf) -> Query<'_, Any, AnyArguments<'_>> {
    q.params
        .iter()
        .fold(sqlx::query(&q.sql), |query, p| BindValue::from_json(p).bind(query))
}

fn row_to_record(row: &AnyRow) -> Record {
    use sqlx::{Column, Row};
    let mut map = Record::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

fn cell_to_value(row: &AnyRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
