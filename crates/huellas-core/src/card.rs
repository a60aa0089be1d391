//! The two-sided catalog card.
//!
//! The card shows a pet's photo and summary on its front and its
//! personality, health and requirements on its back. Hovering flips it; the
//! back carries an "adopt" action guarded by a confirmation step.

use crate::pet::Pet;

// ─── Adopt capability ────────────────────────────────────────────────────────

/// What happens when an adoption is confirmed on a card.
///
/// The default implementation does nothing, so a card can be shown where
/// adopting is not offered.
pub trait AdoptHandler {
  fn on_adopt(&mut self, _pet: &Pet) {}
}

/// An [`AdoptHandler`] that ignores confirmations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdopt;

impl AdoptHandler for NoAdopt {}

impl<F: FnMut(&Pet)> AdoptHandler for F {
  fn on_adopt(&mut self, pet: &Pet) { self(pet) }
}

// ─── Card state ──────────────────────────────────────────────────────────────

/// Interaction state of one card. Nothing outlives the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipCard {
  flipped:      bool,
  confirm_open: bool,
}

impl FlipCard {
  pub fn new() -> Self { Self::default() }

  pub fn is_flipped(&self) -> bool { self.flipped }

  pub fn is_confirming(&self) -> bool { self.confirm_open }

  pub fn pointer_enter(&mut self) { self.flipped = true; }

  pub fn pointer_leave(&mut self) { self.flipped = false; }

  /// The back's adopt action: opens the confirmation dialog.
  pub fn request_adopt(&mut self) { self.confirm_open = true; }

  /// Confirm: run the handler once, then close the dialog. Does nothing if
  /// the dialog is not open.
  pub fn confirm(&mut self, pet: &Pet, handler: &mut impl AdoptHandler) {
    if !self.confirm_open {
      return;
    }
    handler.on_adopt(pet);
    self.confirm_open = false;
  }

  /// Close the dialog without side effects.
  pub fn cancel(&mut self) { self.confirm_open = false; }
}

// ─── Faces ───────────────────────────────────────────────────────────────────

/// What the front of the card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontFace<'a> {
  pub image_url: &'a str,
  pub name:      &'a str,
  pub age:       String,
  pub breed:     &'a str,
  pub location:  &'a str,
}

/// One titled list on the back of the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackSection<'a> {
  pub title: &'static str,
  pub items: &'a [String],
}

pub fn front(pet: &Pet) -> FrontFace<'_> {
  FrontFace {
    image_url: pet.image_url.as_deref().unwrap_or(""),
    name:      &pet.name,
    age:       pet.age.to_string(),
    breed:     &pet.breed,
    location:  &pet.location,
  }
}

/// Personality, health and requirements, skipping empty lists.
pub fn back(pet: &Pet) -> Vec<BackSection<'_>> {
  [
    ("Personality", pet.personality.as_slice()),
    ("Health", pet.health_statuses.as_slice()),
    ("Requirements", pet.requirements.as_slice()),
  ]
  .into_iter()
  .filter(|(_, items)| !items.is_empty())
  .map(|(title, items)| BackSection { title, items })
  .collect()
}
