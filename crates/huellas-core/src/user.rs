//! User accounts as served by `GET /usuarios`.
//!
//! The password is write-only: it exists on [`UserPayload`] but never on
//! [`User`], so nothing read from the backend can carry it back out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::wire::{null_as_empty, unknown_as_default, unknown_as_none};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Identity document kinds recognised by the backend. `Unset` is the empty
/// string on the wire.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DocumentType {
  #[default]
  #[serde(rename = "")]
  #[strum(serialize = "(sin documento)")]
  Unset,
  #[serde(rename = "CEDULA DE CIUDADANIA")]
  #[strum(serialize = "CEDULA DE CIUDADANIA")]
  CedulaCiudadania,
  #[serde(rename = "PASAPORTE")]
  #[strum(serialize = "PASAPORTE")]
  Pasaporte,
  #[serde(rename = "CEDULA DE EXTRANJERIA")]
  #[strum(serialize = "CEDULA DE EXTRANJERIA")]
  CedulaExtranjeria,
  #[serde(rename = "TARJETA DE IDENTIDAD")]
  #[strum(serialize = "TARJETA DE IDENTIDAD")]
  TarjetaIdentidad,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Gender {
  #[default]
  M,
  F,
  O,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Role {
  #[default]
  User,
  Admin,
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// A user as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id:              i64,
  #[serde(rename = "tipoDocumento", default, deserialize_with = "unknown_as_default")]
  pub document_type:   DocumentType,
  #[serde(rename = "numeroDocumento", default, deserialize_with = "null_as_empty")]
  pub document_number: String,
  #[serde(rename = "nombres", default, deserialize_with = "null_as_empty")]
  pub given_names:     String,
  #[serde(rename = "apellidos", default, deserialize_with = "null_as_empty")]
  pub surnames:        String,
  #[serde(rename = "genero", default, deserialize_with = "unknown_as_default")]
  pub gender:          Gender,
  #[serde(rename = "fechaNacimiento", default, with = "iso_date")]
  pub birth_date:      Option<NaiveDate>,
  #[serde(rename = "telefono", default, deserialize_with = "null_as_empty")]
  pub phone:           String,
  #[serde(rename = "direccion", default, deserialize_with = "null_as_empty")]
  pub address:         String,
  #[serde(rename = "ciudad", default, deserialize_with = "null_as_empty")]
  pub city:            String,
  #[serde(rename = "ocupacion", default)]
  pub occupation:      Option<String>,
  #[serde(rename = "correo", default, deserialize_with = "null_as_empty")]
  pub email:           String,
  #[serde(rename = "rolNombre", default, deserialize_with = "unknown_as_default")]
  pub role:            Role,
  #[serde(rename = "createdAt", default, deserialize_with = "unknown_as_none")]
  pub created_at:      Option<DateTime<Utc>>,
  #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
  pub image_url:       Option<String>,
}

impl User {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.given_names, self.surnames)
      .trim()
      .to_string()
  }
}

// ─── Write model ─────────────────────────────────────────────────────────────

/// JSON body for `POST /usuarios` and `PUT /usuarios/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
  #[serde(rename = "tipoDocumento")]
  pub document_type:   DocumentType,
  #[serde(rename = "numeroDocumento")]
  pub document_number: String,
  #[serde(rename = "nombres")]
  pub given_names:     String,
  #[serde(rename = "apellidos")]
  pub surnames:        String,
  #[serde(rename = "genero")]
  pub gender:          Gender,
  #[serde(rename = "fechaNacimiento", with = "iso_date")]
  pub birth_date:      Option<NaiveDate>,
  #[serde(rename = "telefono")]
  pub phone:           String,
  #[serde(rename = "direccion")]
  pub address:         String,
  #[serde(rename = "ciudad")]
  pub city:            String,
  #[serde(rename = "ocupacion", skip_serializing_if = "Option::is_none")]
  pub occupation:      Option<String>,
  #[serde(rename = "correo")]
  pub email:           String,
  /// Omitted on update when the password is left unchanged.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub password:        Option<String>,
  #[serde(rename = "rolNombre")]
  pub role:            Role,
}

// ─── Date encoding ───────────────────────────────────────────────────────────

/// Birth dates go out as an RFC 3339 timestamp at UTC midnight and come back
/// as either that or a bare `YYYY-MM-DD`.
mod iso_date {
  use chrono::{DateTime, NaiveDate};
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match date {
      Some(d) => serializer.serialize_str(&format!("{}T00:00:00.000Z", d.format("%Y-%m-%d"))),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
  where
    D: Deserializer<'de>,
  {
    use serde::de::Error as _;

    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
      return Ok(None);
    };
    if raw.is_empty() {
      return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
      return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
      .map(|dt| Some(dt.naive_utc().date()))
      .map_err(|e| D::Error::custom(format!("invalid date {raw:?}: {e}")))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn password_is_ignored_on_read() {
    let user: User = serde_json::from_value(json!({
      "id": 3,
      "tipoDocumento": "PASAPORTE",
      "numeroDocumento": "AB12345",
      "nombres": "Ana",
      "apellidos": "Ríos",
      "genero": "F",
      "fechaNacimiento": "1990-04-02T00:00:00.000Z",
      "correo": "ana@example.com",
      "password": "hunter22",
      "rolNombre": "ADMIN"
    }))
    .unwrap();

    assert_eq!(user.document_type, DocumentType::Pasaporte);
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(1990, 4, 2));
    let back = serde_json::to_value(&user).unwrap();
    assert!(back.get("password").is_none());
  }

  #[test]
  fn defaults_for_missing_fields() {
    let user: User = serde_json::from_value(json!({ "id": 1, "tipoDocumento": "" })).unwrap();
    assert_eq!(user.document_type, DocumentType::Unset);
    assert_eq!(user.role, Role::User);
    assert_eq!(user.gender, Gender::M);
    assert_eq!(user.birth_date, None);
  }

  #[test]
  fn nulls_and_unknown_choices_read_as_defaults() {
    let users: Vec<User> = serde_json::from_value(json!([
      { "id": 1, "nombres": null, "correo": null, "tipoDocumento": null },
      { "id": 2, "nombres": "Eva", "genero": "X", "rolNombre": "SUPERUSER" },
    ]))
    .unwrap();
    assert_eq!(users[0].given_names, "");
    assert_eq!(users[0].email, "");
    assert_eq!(users[0].document_type, DocumentType::Unset);
    assert_eq!(users[1].gender, Gender::M);
    assert_eq!(users[1].role, Role::User);
  }

  #[test]
  fn plain_date_is_accepted() {
    let user: User =
      serde_json::from_value(json!({ "id": 1, "fechaNacimiento": "2001-12-31" })).unwrap();
    assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(2001, 12, 31));
  }

  #[test]
  fn payload_encodes_birth_date_as_timestamp() {
    let payload = UserPayload {
      document_type:   DocumentType::CedulaCiudadania,
      document_number: "1020304050".into(),
      given_names:     "Juan".into(),
      surnames:        "Pérez".into(),
      gender:          Gender::M,
      birth_date:      NaiveDate::from_ymd_opt(1985, 7, 9),
      phone:           "3001234567".into(),
      address:         "Calle 10 # 20-30".into(),
      city:            "Cali".into(),
      occupation:      None,
      email:           "juan@example.com".into(),
      password:        None,
      role:            Role::User,
    };
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["fechaNacimiento"], json!("1985-07-09T00:00:00.000Z"));
    assert_eq!(value["tipoDocumento"], json!("CEDULA DE CIUDADANIA"));
    assert_eq!(value["rolNombre"], json!("USER"));
    assert!(value.get("password").is_none());
    assert!(value.get("ocupacion").is_none());
  }
}
