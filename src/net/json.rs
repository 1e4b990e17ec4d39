//! Lenient field decoders for Comick JSON responses.
//!
//! The API is loose about types: chapter numbers arrive as strings or numbers,
//! counters occasionally as strings, and optional lists as `null`. These helpers
//! are meant for `#[serde(default, deserialize_with = "...")]` so that missing
//! fields, `null` and mistyped scalars all degrade to the field default instead of
//! failing the whole response.
//!
//! # Examples
//!
//! ```rust
//! use hondana::net::json;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Chapter {
//!     #[serde(default, deserialize_with = "json::loose_string")]
//!     chap: String,
//!     #[serde(default, deserialize_with = "json::null_default")]
//!     group_name: Vec<String>,
//! }
//!
//! let chapter: Chapter = serde_json::from_str(r#"{"chap": 12.5, "group_name": null}"#).unwrap();
//! assert_eq!(chapter.chap, "12.5");
//! assert!(chapter.group_name.is_empty());
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes `T`, mapping `null` to `T::default()`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts strings, numbers and booleans as text; anything else becomes empty.
pub fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Accepts integers, floats (truncated) and numeric strings; anything else is `None`.
pub fn loose_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_i64(&Value::deserialize(deserializer)?))
}

/// Like [`loose_i64`] for non-negative counters; missing or invalid values become 0.
pub fn loose_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_i64(&Value::deserialize(deserializer)?)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or_default())
}

/// Accepts booleans, `0`/`1` and `"true"`/`"false"`; anything else is `None`.
pub fn loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => s.trim().parse::<bool>().ok(),
        _ => None,
    })
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}
