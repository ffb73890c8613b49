//! Flat entity records as returned by the backend.

use serde_json::Value;

/// A single entity record: a flat JSON object of scalar fields.
///
/// Key order is whatever the backend sent; nothing client-side depends on it.
pub type Record = serde_json::Map<String, Value>;

/// Read a record field as display text.
///
/// - Strings are returned as-is.
/// - Numbers and booleans use their JSON text form.
/// - `null`, missing fields, arrays and objects read as the empty string.
pub fn field_text(record: &Record, key: &str) -> String {
    match record.get(key) {
        Some(value) => value_text(value),
        None => String::new(),
    }
}

/// Text form of a single JSON scalar (see [`field_text`]).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Identifier of a record, read from `id_field`.
///
/// Returns `None` when the field is absent or reads as empty text.
pub fn record_id(record: &Record, id_field: &str) -> Option<String> {
    let id = field_text(record, id_field);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
