//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for a table and record.
//! Identifiers come from entity definitions only; values are always parameters.

use crate::entities::{Record, CREATED_AT, ID_COLUMN};
use serde_json::Value;

/// Quote identifier (safe: only from entity definitions).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// INSERT every column present in `record`.
pub fn insert(table: &str, record: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(record.len());
    let mut placeholders = Vec::with_capacity(record.len());
    for (col, val) in record {
        cols.push(quoted(col));
        let n = q.push_param(val.clone());
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(table),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// SELECT * with no ordering clause; rows come back in store order.
pub fn select_all(table: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT * FROM {}", quoted(table));
    q
}

/// SELECT by id. Caller supplies the id as the sole param.
pub fn select_by_id(table: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::String(id.to_string()));
    q.sql = format!("SELECT * FROM {} WHERE {} = ${}", quoted(table), quoted(ID_COLUMN), n);
    q
}

/// UPDATE every column in `record` except `id` and `created_at`.
pub fn update(table: &str, id: &str, record: &Record) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(record.len());
    for (col, val) in record {
        if col == ID_COLUMN || col == CREATED_AT {
            continue;
        }
        let n = q.push_param(val.clone());
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let id_n = q.push_param(Value::String(id.to_string()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(table),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_n
    );
    q
}

pub fn delete(table: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::String(id.to_string()));
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", quoted(table), quoted(ID_COLUMN), n);
    q
}
