//! Success/failure notifications emitted by mutation executors.

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub kind:        NotificationKind,
  pub title:       String,
  pub description: String,
}

impl Notification {
  pub fn success(description: impl Into<String>) -> Self {
    Self {
      kind:        NotificationKind::Success,
      title:       "Success".into(),
      description: description.into(),
    }
  }

  pub fn error(description: impl Into<String>) -> Self {
    Self {
      kind:        NotificationKind::Error,
      title:       "Error".into(),
      description: description.into(),
    }
  }

  pub fn is_error(&self) -> bool { self.kind == NotificationKind::Error }
}

/// Receiver of notifications. Implementations must be cheap; they are called
/// inline after each mutation settles.
pub trait Notifier: Send + Sync {
  fn notify(&self, notification: Notification);
}

/// Keeps every notification in arrival order until drained.
#[derive(Debug, Default)]
pub struct NotificationLog {
  entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
  pub fn new() -> Self { Self::default() }

  /// Remove and return everything received so far.
  pub fn drain(&self) -> Vec<Notification> {
    std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
  }

  pub fn snapshot(&self) -> Vec<Notification> {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

impl Notifier for NotificationLog {
  fn notify(&self, notification: Notification) {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(notification);
  }
}
