//! Tolerant field reads over raw JSON payloads
//!
//! Client payloads arrive as `serde_json::Value` in several historical
//! shapes. These helpers read one field at a time and return `None` on any
//! type mismatch so normalization can fall back to the existing or default
//! value instead of rejecting the payload.

use serde_json::Value;

/// Non-null string field, as-is
pub fn str_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str)
}

/// Non-null, non-empty string field, trimmed
pub fn trimmed_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    str_field(raw, key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Boolean field; any non-boolean value reads as `None`
pub fn bool_field(raw: &Value, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}

/// Numeric field as f64
pub fn f64_field(raw: &Value, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

/// Numeric field rounded to the nearest integer
pub fn rounded_field(raw: &Value, key: &str) -> Option<i32> {
    f64_field(raw, key).map(|v| v.round() as i32)
}

/// True when the key is present with an explicit JSON null
pub fn is_null(raw: &Value, key: &str) -> bool {
    matches!(raw.get(key), Some(Value::Null))
}

/// Object field
pub fn object_field<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| v.is_object())
}

/// Member list field: `Some` only when the key holds an array.
/// Elements that are neither strings nor records are skipped.
pub fn member_list(raw: &Value, key: &str) -> Option<Vec<crate::model::MemberRef>> {
    let items = raw.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(crate::model::MemberRef::from_value)
            .collect(),
    )
}
