//! Error types for `huellas-core`.

use thiserror::Error;

use crate::validate::FieldErrors;

#[derive(Debug, Error)]
pub enum Error {
  /// The draft failed its schema; nothing was sent to the backend.
  #[error("validation failed: {0}")]
  Validation(FieldErrors),

  /// The backend answered with a non-success status. `body` is the raw
  /// response text, possibly empty.
  #[error("backend returned {status}: {body}")]
  Http { status: u16, body: String },

  /// The request never produced a response (connection, timeout, ...).
  #[error("transport error: {0}")]
  Transport(String),

  /// A mutation failed; the message is the one shown to the user.
  #[error("{0}")]
  Mutation(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("could not read {path}: {source}")]
  Attachment {
    path:   String,
    #[source]
    source: std::io::Error,
  },
}

impl Error {
  /// The backend-provided body text, if this is an HTTP error with a
  /// non-blank body.
  pub fn backend_message(&self) -> Option<&str> {
    match self {
      Self::Http { body, .. } if !body.trim().is_empty() => Some(body.as_str()),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
