//! Deserialization helpers for the backend's loosely typed fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` or a missing field becomes the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A recorded answer; negative indices mean "not answered".
pub fn answer_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|index| usize::try_from(index).ok()))
}

/// Mongo identifiers arrive either as plain strings or as `{"$oid": "..."}`.
pub fn object_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Object(map)) => map.get("$oid").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    })
}

/// A person reference, either a bare name or an object carrying `name`.
pub fn display_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => name,
        Some(Value::Object(map)) => map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        _ => String::new(),
    })
}
