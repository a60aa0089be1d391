//! Form controllers for the pet and user dialogs.
//!
//! A controller owns a draft, validates it against its schema, and turns it
//! into a request. Submission is split in three steps so the terminal client
//! can run the network part as an abortable task:
//!
//! 1. `prepare` validates the whole draft and yields a request (or records
//!    field errors and yields nothing);
//! 2. the request's `send` runs the mutation executor;
//! 3. `settle` applies the outcome back to the form.
//!
//! `submit` chains the three for callers that can simply await.

mod pet;
mod tags;
mod user;

pub use pet::{PetField, PetForm, PetRequest};
pub use tags::TagList;
pub use user::{UserField, UserForm, UserRequest};

use strum::IntoEnumIterator;

/// Whether a dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Edit(i64),
}

impl FormMode {
  pub fn is_edit(self) -> bool { matches!(self, Self::Edit(_)) }
}

/// Result of a full submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// The draft failed validation; no request was made.
  Invalid,
  /// The backend accepted the request; the dialog is closed.
  Saved,
  /// The backend (or transport) refused; the dialog stays open with this
  /// message.
  Failed(String),
}

/// The variant after (or before, when `forward` is false) `current`,
/// wrapping around.
pub fn cycle<T>(current: T, forward: bool) -> T
where
  T: IntoEnumIterator + PartialEq + Copy,
{
  let all: Vec<T> = T::iter().collect();
  let Some(i) = all.iter().position(|v| *v == current) else {
    return current;
  };
  let n = all.len();
  let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
  all[next]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::user::Role;

  #[test]
  fn cycle_wraps_both_ways() {
    assert_eq!(cycle(Role::User, true), Role::Admin);
    assert_eq!(cycle(Role::Admin, true), Role::User);
    assert_eq!(cycle(Role::User, false), Role::Admin);
  }
}
