//! Pet records as served by `GET /mascotas`.
//!
//! Rust field names are English; the backend's Spanish wire names are
//! mapped with serde renames so there is exactly one naming scheme in code.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter};

use crate::wire::{null_as_empty, unknown_as_default, unknown_as_none};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Where a pet is in the adoption process.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdoptionStatus {
  Pendiente,
  Adoptado,
  Disponible,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PetSex {
  Macho,
  Hembra,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PetSize {
  #[serde(rename = "Pequeño")]
  #[strum(serialize = "Pequeño")]
  Pequeno,
  Mediano,
  Grande,
}

// ─── Age ─────────────────────────────────────────────────────────────────────

/// A pet's age exactly as the backend sent it: either a JSON number or a
/// string that is expected (but not guaranteed) to hold one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PetAge {
  Number(serde_json::Number),
  Text(String),
}

impl PetAge {
  /// The integer age, read the way the catalog has always read it: skip
  /// leading whitespace, accept an optional sign, then take the leading run
  /// of digits. `None` when there are no digits to take.
  pub fn parsed(&self) -> Option<i64> {
    match self {
      Self::Number(n) => parse_int_prefix(&n.to_string()),
      Self::Text(s) => parse_int_prefix(s),
    }
  }
}

impl Default for PetAge {
  fn default() -> Self { Self::Text(String::new()) }
}

impl From<u32> for PetAge {
  fn from(age: u32) -> Self { Self::Number(age.into()) }
}

impl fmt::Display for PetAge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Number(n) => write!(f, "{n}"),
      Self::Text(s) => f.write_str(s),
    }
  }
}

fn parse_int_prefix(raw: &str) -> Option<i64> {
  let s = raw.trim_start();
  let (negative, rest) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };
  let end = rest
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(rest.len());
  let digits = &rest[..end];
  if digits.is_empty() {
    return None;
  }
  // Out-of-range digit runs saturate so they stay outside any age bound.
  Some(match digits.parse::<i64>() {
    Ok(value) if negative => -value,
    Ok(value) => value,
    Err(_) if negative => i64::MIN,
    Err(_) => i64::MAX,
  })
}

// ─── Pet ─────────────────────────────────────────────────────────────────────

/// A pet as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
  pub id:               i64,
  #[serde(rename = "numIdentificacion", default, deserialize_with = "null_as_empty")]
  pub identification:   String,
  #[serde(rename = "nombre", deserialize_with = "null_as_empty")]
  pub name:             String,
  #[serde(rename = "raza", default, deserialize_with = "null_as_empty")]
  pub breed:            String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub color:            String,
  /// Species, e.g. "perro" or "gato".
  #[serde(rename = "tipo", default, deserialize_with = "null_as_empty")]
  pub kind:             String,
  #[serde(rename = "edad", default)]
  pub age:              PetAge,
  #[serde(rename = "tamano", default, deserialize_with = "unknown_as_none")]
  pub size:             Option<PetSize>,
  #[serde(rename = "sexo", default, deserialize_with = "unknown_as_none")]
  pub sex:              Option<PetSex>,
  #[serde(rename = "estadoSalud", default, deserialize_with = "null_as_empty")]
  pub health:           String,
  #[serde(rename = "ubicacion", default, deserialize_with = "null_as_empty")]
  pub location:         String,
  /// Unset means the pet is still looking for a home.
  #[serde(
    rename = "estadoAdopcion",
    default,
    deserialize_with = "lenient_adoption_status"
  )]
  pub adoption_status:  Option<AdoptionStatus>,
  #[serde(rename = "fundacionId", default)]
  pub foundation_id:    Option<i64>,
  #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
  pub image_url:        Option<String>,
  /// Document number of the adopter, once there is one.
  #[serde(rename = "docAdoptante", default)]
  pub adopter_document: Option<String>,
  #[serde(rename = "requisitos", default, deserialize_with = "unknown_as_default")]
  pub requirements:     Vec<String>,
  #[serde(rename = "estadosDeSalud", default, deserialize_with = "unknown_as_default")]
  pub health_statuses:  Vec<String>,
  #[serde(rename = "personalidad", default, deserialize_with = "unknown_as_default")]
  pub personality:      Vec<String>,
}

impl Pet {
  /// Whether the pet should appear in the adopter-facing catalog.
  pub fn is_available(&self) -> bool { self.adoption_status.is_none() }

  /// A record is complete when each of its three tag collections has at
  /// least one entry.
  pub fn is_complete(&self) -> bool {
    !self.requirements.is_empty()
      && !self.health_statuses.is_empty()
      && !self.personality.is_empty()
  }
}

/// The backend has been seen to send `null`, `false`, `""` or `true` here as
/// well as the three status names. Any other non-empty value still means the
/// pet is spoken for, so it reads as adopted.
fn lenient_adoption_status<'de, D>(
  deserializer: D,
) -> Result<Option<AdoptionStatus>, D::Error>
where
  D: Deserializer<'de>,
{
  use serde_json::Value;

  Ok(match Value::deserialize(deserializer)? {
    Value::Null | Value::Bool(false) => None,
    Value::String(s) if s.is_empty() => None,
    Value::Number(n) if n.as_f64() == Some(0.0) => None,
    Value::String(s) => Some(
      serde_json::from_value(Value::String(s)).unwrap_or(AdoptionStatus::Adoptado),
    ),
    _ => Some(AdoptionStatus::Adoptado),
  })
}

#[cfg(test)]
mod tests {
  use rstest::rstest;
  use serde_json::json;

  use super::*;

  #[rstest]
  #[case(json!(3), Some(3))]
  #[case(json!(2.7), Some(2))]
  #[case(json!("5"), Some(5))]
  #[case(json!("  12 años"), Some(12))]
  #[case(json!("-4"), Some(-4))]
  #[case(json!("cachorro"), None)]
  #[case(json!(""), None)]
  #[case(json!("99999999999999999999"), Some(i64::MAX))]
  #[case(json!("-99999999999999999999"), Some(i64::MIN))]
  fn age_parses_leading_integer(
    #[case] raw: serde_json::Value,
    #[case] expected: Option<i64>,
  ) {
    let age: PetAge = serde_json::from_value(raw).unwrap();
    assert_eq!(age.parsed(), expected);
  }

  #[rstest]
  #[case(json!(null), None)]
  #[case(json!(false), None)]
  #[case(json!(""), None)]
  #[case(json!(true), Some(AdoptionStatus::Adoptado))]
  #[case(json!("pendiente"), Some(AdoptionStatus::Pendiente))]
  #[case(json!("disponible"), Some(AdoptionStatus::Disponible))]
  fn adoption_status_is_read_leniently(
    #[case] raw: serde_json::Value,
    #[case] expected: Option<AdoptionStatus>,
  ) {
    let pet: Pet = serde_json::from_value(json!({
      "id": 1,
      "nombre": "Luna",
      "estadoAdopcion": raw,
    }))
    .unwrap();
    assert_eq!(pet.adoption_status, expected);
  }

  #[rstest]
  #[case(json!("ADOPTADO"))]
  #[case(json!("perdido"))]
  #[case(json!(1))]
  #[case(json!({ "estado": "x" }))]
  fn unfamiliar_adoption_status_counts_as_set(#[case] raw: serde_json::Value) {
    let pet: Pet = serde_json::from_value(json!({
      "id": 1,
      "nombre": "Luna",
      "estadoAdopcion": raw,
    }))
    .unwrap();
    assert_eq!(pet.adoption_status, Some(AdoptionStatus::Adoptado));
    assert!(!pet.is_available());
  }

  #[test]
  fn one_odd_record_does_not_sink_the_list() {
    let pets: Vec<Pet> = serde_json::from_value(json!([
      { "id": 1, "nombre": "Luna", "estadoAdopcion": null },
      { "id": 2, "nombre": "Toby", "estadoAdopcion": "ADOPTADO" },
      {
        "id": 3,
        "nombre": "Kira",
        "raza": null,
        "color": null,
        "tamano": "enorme",
        "sexo": null,
        "requisitos": null
      },
    ]))
    .unwrap();

    assert_eq!(pets.len(), 3);
    assert!(pets[0].is_available());
    assert!(!pets[1].is_available());
    assert_eq!(pets[2].breed, "");
    assert_eq!(pets[2].size, None);
    assert!(pets[2].requirements.is_empty());
  }

  #[test]
  fn full_record_reads_wire_names() {
    let pet: Pet = serde_json::from_value(json!({
      "id": 7,
      "numIdentificacion": "A-77",
      "nombre": "Toby",
      "raza": "Beagle",
      "color": "tricolor",
      "tipo": "perro",
      "edad": "4",
      "ubicacion": "Medellín",
      "sexo": "Macho",
      "tamano": "Pequeño",
      "estadoSalud": "bueno",
      "estadoAdopcion": null,
      "fundacionId": 3,
      "imagenUrl": "/img/toby.jpg",
      "docAdoptante": null,
      "requisitos": ["patio"],
      "estadosDeSalud": ["vacunado"],
      "personalidad": ["curioso"]
    }))
    .unwrap();

    assert_eq!(pet.name, "Toby");
    assert_eq!(pet.size, Some(PetSize::Pequeno));
    assert_eq!(pet.sex, Some(PetSex::Macho));
    assert_eq!(pet.age.parsed(), Some(4));
    assert!(pet.is_available());
    assert!(pet.is_complete());
  }

  #[test]
  fn size_label_keeps_accent() {
    assert_eq!(PetSize::Pequeno.to_string(), "Pequeño");
    assert_eq!(
      serde_json::to_value(PetSize::Pequeno).unwrap(),
      json!("Pequeño")
    );
  }
}
