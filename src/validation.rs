//! Request validation: identifiers, bodies and required fields.
//! Everything here runs before the store is consulted.

use crate::case::object_keys_to_snake_case;
use crate::entities::{Entity, Record, CREATED_AT, UPDATED_AT};
use crate::error::AppError;
use serde_json::Value;
use uuid::Uuid;

/// Parse a path identifier. Empty and malformed values are both rejected.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("id is required".into()));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("invalid uuid: {}", raw)))
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// JSON object body with camelCase keys folded to column names. Client-sent
/// timestamps are dropped; the store owns them.
pub fn body_to_record(body: &[u8]) -> Result<Record, AppError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("malformed body: {}", e)))?;
    let Value::Object(mut record) = value else {
        return Err(AppError::Validation("body must be a JSON object".into()));
    };
    object_keys_to_snake_case(&mut record);
    record.remove(CREATED_AT);
    record.remove(UPDATED_AT);
    Ok(record)
}

/// Decode and validate a request body into `E`.
pub fn parse_entity<E: Entity>(body: &[u8]) -> Result<E, AppError> {
    let record = body_to_record(body)?;
    let entity: E = serde_json::from_value(Value::Object(record))
        .map_err(|e| AppError::Validation(format!("invalid {}: {}", E::RESOURCE, e)))?;
    entity.validate()?;
    Ok(entity)
}
