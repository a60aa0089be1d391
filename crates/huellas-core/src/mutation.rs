//! Mutation executors: one per resource and verb.
//!
//! Every executor follows the same shape: call the backend, then either
//! invalidate the affected cache key and emit a success notification, or
//! emit an error notification and leave the cache alone. No retries.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
  Error, Result,
  backend::{AdoptionBackend, PetSubmission},
  cache::{QueryCache, QueryKey},
  notify::{Notification, Notifier},
  pet::Pet,
  user::{User, UserPayload},
};

/// How a failed mutation is described to the user.
#[derive(Debug, Clone, Copy)]
enum Failure {
  /// Show the backend's response text, or the fallback when it sent none.
  Verbatim(&'static str),
  /// Always show this message.
  Generic(&'static str),
}

impl Failure {
  fn message(self, error: &Error) -> String {
    match self {
      Self::Verbatim(fallback) => match error {
        Error::Http { .. } => error
          .backend_message()
          .unwrap_or(fallback)
          .to_string(),
        other => other.to_string(),
      },
      Self::Generic(message) => message.to_string(),
    }
  }
}

/// The set of executors, sharing one backend, cache and notifier.
pub struct Mutations<B, N> {
  backend:  Arc<B>,
  cache:    Arc<QueryCache>,
  notifier: Arc<N>,
}

impl<B, N> Clone for Mutations<B, N> {
  fn clone(&self) -> Self {
    Self {
      backend:  self.backend.clone(),
      cache:    self.cache.clone(),
      notifier: self.notifier.clone(),
    }
  }
}

impl<B, N> Mutations<B, N>
where
  B: AdoptionBackend,
  N: Notifier,
{
  pub fn new(backend: Arc<B>, cache: Arc<QueryCache>, notifier: Arc<N>) -> Self {
    Self {
      backend,
      cache,
      notifier,
    }
  }

  pub fn backend(&self) -> &Arc<B> { &self.backend }

  pub fn cache(&self) -> &Arc<QueryCache> { &self.cache }

  pub fn notifier(&self) -> &Arc<N> { &self.notifier }

  fn settle<T>(
    &self,
    key: QueryKey,
    outcome: Result<T>,
    success: &str,
    failure: Failure,
  ) -> Result<T> {
    match outcome {
      Ok(value) => {
        info!(%key, "{success}");
        self.cache.invalidate(key);
        self.notifier.notify(Notification::success(success));
        Ok(value)
      }
      Err(error) => {
        let message = failure.message(&error);
        warn!(%key, %error, "mutation failed");
        self.notifier.notify(Notification::error(message.clone()));
        Err(Error::Mutation(message))
      }
    }
  }

  // ── Pets ──────────────────────────────────────────────────────────────

  /// `POST /mascotas`
  pub async fn create_pet(&self, submission: &PetSubmission) -> Result<Pet> {
    let outcome = self.backend.create_pet(submission).await;
    self.settle(
      QueryKey::Pets,
      outcome,
      "Pet created",
      Failure::Verbatim("Error creating the pet"),
    )
  }

  /// `PUT /mascotas/:id`
  pub async fn update_pet(&self, id: i64, submission: &PetSubmission) -> Result<Pet> {
    let outcome = self.backend.update_pet(id, submission).await;
    self.settle(
      QueryKey::Pets,
      outcome,
      "Pet updated",
      Failure::Verbatim("Error updating the pet"),
    )
  }

  /// `DELETE /mascotas/:id`
  pub async fn delete_pet(&self, id: i64) -> Result<()> {
    let outcome = self.backend.delete_pet(id).await;
    self.settle(
      QueryKey::Pets,
      outcome,
      "Pet deleted",
      Failure::Generic("Could not delete the pet"),
    )
  }

  // ── Users ─────────────────────────────────────────────────────────────

  /// `POST /usuarios`
  pub async fn create_user(&self, payload: &UserPayload) -> Result<User> {
    let outcome = self.backend.create_user(payload).await;
    self.settle(
      QueryKey::Users,
      outcome,
      "User created",
      Failure::Generic("Could not create the user"),
    )
  }

  /// `PUT /usuarios/:id`
  pub async fn update_user(&self, id: i64, payload: &UserPayload) -> Result<User> {
    let outcome = self.backend.update_user(id, payload).await;
    self.settle(
      QueryKey::Users,
      outcome,
      "User updated",
      Failure::Generic("Could not update the user"),
    )
  }

  /// `DELETE /usuarios/:id`
  pub async fn delete_user(&self, id: i64) -> Result<()> {
    let outcome = self.backend.delete_user(id).await;
    self.settle(
      QueryKey::Users,
      outcome,
      "User deleted",
      Failure::Generic("Could not delete the user"),
    )
  }
}
