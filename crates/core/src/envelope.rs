//! Normalizes Moonraker database responses into a flat filename -> metadata index.
//!
//! A `server/database/item` response typically looks like
//! `{"result": {"namespace": "gcode_metadata", "key": null, "value": {...files...}}}`,
//! but a bare `{"value": {...}}` or the file mapping itself are accepted too.

use crate::models::FileRecord;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unexpected payload format: expected mapping of filename to metadata, got {found}")]
    NotAMapping { found: &'static str },
}

/// Strips one `result` envelope if present.
pub fn unwrap_result(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) if map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Returns the inner `value` object if present, else the content itself.
pub fn extract_index(content: Value) -> Result<Map<String, Value>, SchemaError> {
    match content {
        Value::Object(mut map) => {
            if matches!(map.get("value"), Some(Value::Object(_))) {
                if let Some(Value::Object(inner)) = map.remove("value") {
                    return Ok(inner);
                }
            }
            Ok(map)
        }
        other => Err(SchemaError::NotAMapping {
            found: kind_of(&other),
        }),
    }
}

/// Full unwrap: envelope removal, index extraction and record decoding, in server order.
pub fn records_from_payload(payload: Value) -> Result<Vec<FileRecord>, SchemaError> {
    let index = extract_index(unwrap_result(payload))?;
    Ok(index
        .iter()
        .map(|(filename, metadata)| record_from_metadata(filename, metadata))
        .collect())
}

/// Non-object metadata is treated as empty; only JSON numbers count as timestamps.
pub fn record_from_metadata(filename: &str, metadata: &Value) -> FileRecord {
    FileRecord {
        filename: filename.to_string(),
        modified: numeric_field(metadata, "modified"),
        print_start_time: numeric_field(metadata, "print_start_time"),
    }
}

fn numeric_field(metadata: &Value, key: &str) -> Option<f64> {
    metadata.as_object()?.get(key).and_then(Value::as_f64)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
