//! Async HTTP client for the adoption backend's REST API.

use std::time::Duration;

use anyhow::Context;
use huellas_core::{
  Error, Result,
  backend::{AdoptionBackend, IMAGE_FIELD, PetSubmission},
  pet::Pet,
  user::{User, UserPayload},
};
use reqwest::{
  Client, Response,
  multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

/// HTTP implementation of [`AdoptionBackend`].
///
/// The inner client keeps a cookie store, so the backend's session cookie is
/// sent with every request. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

fn transport(e: reqwest::Error) -> Error { Error::Transport(e.to_string()) }

/// Pass successful responses through; turn anything else into
/// [`Error::Http`] carrying the response text.
async fn check(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  Err(Error::Http {
    status: status.as_u16(),
    body,
  })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
  let text = check(resp).await?.text().await.map_err(transport)?;
  Ok(serde_json::from_str(&text)?)
}

fn pet_form(submission: &PetSubmission) -> Result<Form> {
  let mut form = Form::new();
  for (name, value) in submission.text_fields()? {
    form = form.text(name, value);
  }
  if let Some(image) = &submission.image {
    let part = Part::bytes(image.data.to_vec())
      .file_name(image.file_name.clone())
      .mime_str(&image.content_type)
      .map_err(transport)?;
    form = form.part(IMAGE_FIELD, part);
  }
  Ok(form)
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
    let client = Client::builder()
      .cookie_store(true)
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }
}

impl AdoptionBackend for ApiClient {
  // ── Pets ──────────────────────────────────────────────────────────────

  /// `GET /mascotas`
  async fn list_pets(&self) -> Result<Vec<Pet>> {
    debug!("GET /mascotas");
    let resp = self
      .client
      .get(self.url("/mascotas"))
      .send()
      .await
      .map_err(transport)?;
    decode(resp).await
  }

  /// `POST /mascotas` (multipart)
  async fn create_pet(&self, submission: &PetSubmission) -> Result<Pet> {
    debug!("POST /mascotas");
    let resp = self
      .client
      .post(self.url("/mascotas"))
      .multipart(pet_form(submission)?)
      .send()
      .await
      .map_err(transport)?;
    decode(resp).await
  }

  /// `PUT /mascotas/:id` (multipart)
  async fn update_pet(&self, id: i64, submission: &PetSubmission) -> Result<Pet> {
    debug!(id, "PUT /mascotas/:id");
    let resp = self
      .client
      .put(self.url(&format!("/mascotas/{id}")))
      .multipart(pet_form(submission)?)
      .send()
      .await
      .map_err(transport)?;
    decode(resp).await
  }

  /// `DELETE /mascotas/:id`
  async fn delete_pet(&self, id: i64) -> Result<()> {
    debug!(id, "DELETE /mascotas/:id");
    let resp = self
      .client
      .delete(self.url(&format!("/mascotas/{id}")))
      .send()
      .await
      .map_err(transport)?;
    check(resp).await?;
    Ok(())
  }

  // ── Users ─────────────────────────────────────────────────────────────

  /// `GET /usuarios`
  async fn list_users(&self) -> Result<Vec<User>> {
    debug!("GET /usuarios");
    let resp = self
      .client
      .get(self.url("/usuarios"))
      .send()
      .await
      .map_err(transport)?;
    decode(resp).await
  }

  /// `POST /usuarios` (JSON)
  async fn create_user(&self, payload: &UserPayload) -> Result<User> {
    debug!("POST /usuarios");
    let resp = self
      .client
      .post(self.url("/usuarios"))
      .json(payload)
      .send()
      .await
      .map_err(transport)?;
    decode(resp).await
  }

  /// `PUT /usuarios/:id` (JSON)
  async fn update_user(&self, id: i64, payload: &UserPayload) -> Result<User> {
    debug!(id, "PUT /usuarios/:id");
    let resp = self
      .client
      .put(self.url(&format!("/usuarios/{id}")))
      .json(payload)
      .send()
      .await
      .map_err(transport)?;
    decode(resp).await
  }

  /// `DELETE /usuarios/:id`
  async fn delete_user(&self, id: i64) -> Result<()> {
    debug!(id, "DELETE /usuarios/:id");
    let resp = self
      .client
      .delete(self.url(&format!("/usuarios/{id}")))
      .send()
      .await
      .map_err(transport)?;
    check(resp).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(base: &str) -> ApiClient {
    ApiClient::new(ApiConfig {
      base_url: base.into(),
      timeout:  Duration::from_secs(1),
    })
    .unwrap()
  }

  #[test]
  fn url_joins_without_double_slash() {
    assert_eq!(
      client("http://localhost:8080/").url("/mascotas/3"),
      "http://localhost:8080/mascotas/3"
    );
    assert_eq!(
      client("http://api.local/v1").url("/usuarios"),
      "http://api.local/v1/usuarios"
    );
  }

  #[test]
  fn pet_form_accepts_image_part() {
    let submission = PetSubmission {
      name:            "Luna".into(),
      age:             2,
      breed:           "Labrador".into(),
      location:        "Bogotá".into(),
      requirements:    vec!["patio".into()],
      health_statuses: vec!["sana".into()],
      personality:     vec!["jugetona".into()],
      image:           Some(huellas_core::backend::ImageAttachment {
        file_name:    "luna.jpg".into(),
        content_type: "image/jpeg".into(),
        data:         bytes::Bytes::from_static(b"\xff\xd8"),
      }),
    };
    assert!(pet_form(&submission).is_ok());
  }

  #[tokio::test]
  async fn unreachable_backend_is_a_transport_error() {
    let err = client("http://127.0.0.1:9").list_pets().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
  }
}
