//! The `AdoptionBackend` trait and the outbound payload types.
//!
//! The trait is implemented by the HTTP client in `huellas-cli` and by
//! [`crate::memory::MemoryBackend`]. Mutation executors and the cache depend
//! on this abstraction, never on a concrete transport.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET`    | `/mascotas`     | - |
//! | `POST`   | `/mascotas`     | multipart ([`PetSubmission`]) |
//! | `PUT`    | `/mascotas/:id` | multipart ([`PetSubmission`]) |
//! | `DELETE` | `/mascotas/:id` | - |
//! | `GET`    | `/usuarios`     | - |
//! | `POST`   | `/usuarios`     | JSON ([`UserPayload`]) |
//! | `PUT`    | `/usuarios/:id` | JSON ([`UserPayload`]) |
//! | `DELETE` | `/usuarios/:id` | - |

use std::future::Future;

use bytes::Bytes;

use crate::{
  Result,
  pet::Pet,
  user::{User, UserPayload},
};

// ─── Pet submission ──────────────────────────────────────────────────────────

/// A binary image part attached to a pet submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
  pub file_name:    String,
  pub content_type: String,
  pub data:         Bytes,
}

/// The fields sent as a multipart form for pet create/update.
#[derive(Debug, Clone, PartialEq)]
pub struct PetSubmission {
  pub name:            String,
  pub age:             u32,
  pub breed:           String,
  pub location:        String,
  pub requirements:    Vec<String>,
  pub health_statuses: Vec<String>,
  pub personality:     Vec<String>,
  pub image:           Option<ImageAttachment>,
}

impl PetSubmission {
  /// The text parts of the form, in send order. Tag collections are sent as
  /// one JSON-encoded string each rather than as repeated keys.
  pub fn text_fields(&self) -> Result<Vec<(&'static str, String)>> {
    Ok(vec![
      ("nombre", self.name.clone()),
      ("edad", self.age.to_string()),
      ("raza", self.breed.clone()),
      ("ubicacion", self.location.clone()),
      ("requisitos", serde_json::to_string(&self.requirements)?),
      ("estadosDeSalud", serde_json::to_string(&self.health_statuses)?),
      ("personalidad", serde_json::to_string(&self.personality)?),
    ])
  }
}

/// Name of the multipart part carrying the image.
pub const IMAGE_FIELD: &str = "image";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the pet-adoption REST backend.
///
/// Implementations send credentials (the session cookie) with every request.
/// A non-success response must surface as [`crate::Error::Http`] carrying the
/// response body text, so executors can show it.
pub trait AdoptionBackend: Send + Sync {
  // ── Pets ──────────────────────────────────────────────────────────────

  fn list_pets(&self) -> impl Future<Output = Result<Vec<Pet>>> + Send + '_;

  fn create_pet<'a>(
    &'a self,
    submission: &'a PetSubmission,
  ) -> impl Future<Output = Result<Pet>> + Send + 'a;

  fn update_pet<'a>(
    &'a self,
    id: i64,
    submission: &'a PetSubmission,
  ) -> impl Future<Output = Result<Pet>> + Send + 'a;

  fn delete_pet(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  fn list_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send + '_;

  fn create_user<'a>(
    &'a self,
    payload: &'a UserPayload,
  ) -> impl Future<Output = Result<User>> + Send + 'a;

  fn update_user<'a>(
    &'a self,
    id: i64,
    payload: &'a UserPayload,
  ) -> impl Future<Output = Result<User>> + Send + 'a;

  fn delete_user(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_;
}
