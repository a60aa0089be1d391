//! Lenient readers for backend fields.
//!
//! The list endpoints return whole collections, so a single record with a
//! `null` or unfamiliar value must not fail the decode of all the others.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// A string field that may arrive as `null`.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A field with a default that may arrive as `null` or with a value outside
/// the known set; both read as the default.
pub fn unknown_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned + Default,
{
  Ok(unknown_as_none(deserializer)?.unwrap_or_default())
}

/// An optional field whose unrecognised values read as `None`.
pub fn unknown_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  match Value::deserialize(deserializer)? {
    Value::Null => Ok(None),
    other => Ok(serde_json::from_value(other).ok()),
  }
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;
  use serde_json::json;

  use super::*;

  #[derive(Debug, Default, PartialEq, Deserialize)]
  enum Shade {
    #[default]
    Light,
    Dark,
  }

  #[derive(Debug, Deserialize)]
  struct Record {
    #[serde(default, deserialize_with = "null_as_empty")]
    label: String,
    #[serde(default, deserialize_with = "unknown_as_default")]
    shade: Shade,
    #[serde(default, deserialize_with = "unknown_as_none")]
    tint:  Option<Shade>,
  }

  #[test]
  fn nulls_and_strangers_fall_back() {
    let record: Record = serde_json::from_value(json!({
      "label": null,
      "shade": "Purple",
      "tint": 4,
    }))
    .unwrap();
    assert_eq!(record.label, "");
    assert_eq!(record.shade, Shade::Light);
    assert_eq!(record.tint, None);
  }

  #[test]
  fn known_values_pass_through() {
    let record: Record = serde_json::from_value(json!({
      "label": "x",
      "shade": "Dark",
      "tint": "Dark",
    }))
    .unwrap();
    assert_eq!(record.label, "x");
    assert_eq!(record.shade, Shade::Dark);
    assert_eq!(record.tint, Some(Shade::Dark));
  }
}
