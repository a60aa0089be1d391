//! The pet create/edit dialog controller.

use strum::{Display, EnumIter};

use super::{FormMode, SubmitOutcome, TagList};
use crate::{
  Result,
  backend::{AdoptionBackend, ImageAttachment, PetSubmission},
  mutation::Mutations,
  notify::Notifier,
  pet::Pet,
  validate::{FieldErrors, Rule, min_chars, non_empty_list},
};

/// Editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PetField {
  #[strum(serialize = "Name")]
  Name,
  #[strum(serialize = "Age")]
  Age,
  #[strum(serialize = "Breed")]
  Breed,
  #[strum(serialize = "Location")]
  Location,
  #[strum(serialize = "Adoption requirements")]
  Requirements,
  #[strum(serialize = "Health status")]
  HealthStatuses,
  #[strum(serialize = "Personality")]
  Personality,
  #[strum(serialize = "Image")]
  Image,
}

impl PetField {
  /// Wire name, also used as the error key.
  pub fn key(self) -> &'static str {
    match self {
      Self::Name => "nombre",
      Self::Age => "edad",
      Self::Breed => "raza",
      Self::Location => "ubicacion",
      Self::Requirements => "requisitos",
      Self::HealthStatuses => "estadosDeSalud",
      Self::Personality => "personalidad",
      Self::Image => "image",
    }
  }

  pub fn is_tags(self) -> bool {
    matches!(
      self,
      Self::Requirements | Self::HealthStatuses | Self::Personality
    )
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PetDraft {
  name:            String,
  /// Raw text; parsed on validation.
  age:             String,
  breed:           String,
  location:        String,
  requirements:    TagList,
  health_statuses: TagList,
  personality:     TagList,
  image:           Option<ImageAttachment>,
}

impl PetDraft {
  fn from_pet(pet: &Pet) -> Self {
    Self {
      name:            pet.name.clone(),
      age:             pet.age.parsed().map(|a| a.to_string()).unwrap_or_default(),
      breed:           pet.breed.clone(),
      location:        pet.location.clone(),
      requirements:    TagList::new(pet.requirements.clone()),
      health_statuses: TagList::new(pet.health_statuses.clone()),
      personality:     TagList::new(pet.personality.clone()),
      image:           None,
    }
  }

  fn parsed_age(&self) -> Option<u32> { self.age.trim().parse().ok() }

  fn rules(&self, field: PetField) -> Vec<Rule> {
    match field {
      PetField::Name => vec![min_chars(&self.name, 1, "Name is required")],
      PetField::Age => vec![match self.parsed_age() {
        Some(age) if age >= 1 => Ok(()),
        _ => Err("Age is required".to_string()),
      }],
      PetField::Breed => vec![min_chars(&self.breed, 1, "Breed is required")],
      PetField::Location => vec![min_chars(&self.location, 1, "Location is required")],
      PetField::Requirements => vec![non_empty_list(
        self.requirements.items(),
        "Specify at least one requirement",
      )],
      PetField::HealthStatuses => vec![non_empty_list(
        self.health_statuses.items(),
        "Specify at least one health status",
      )],
      PetField::Personality => vec![non_empty_list(
        self.personality.items(),
        "Specify at least one personality trait",
      )],
      PetField::Image => Vec::new(),
    }
  }
}

/// A validated pet request, detached from the form so it can be sent from
/// another task.
#[derive(Debug, Clone, PartialEq)]
pub struct PetRequest {
  pub mode:       FormMode,
  pub submission: PetSubmission,
}

impl PetRequest {
  pub async fn send<B, N>(&self, mutations: &Mutations<B, N>) -> Result<Pet>
  where
    B: AdoptionBackend,
    N: Notifier,
  {
    match self.mode {
      FormMode::Create => mutations.create_pet(&self.submission).await,
      FormMode::Edit(id) => mutations.update_pet(id, &self.submission).await,
    }
  }
}

/// Controller for the pet dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct PetForm {
  mode:         FormMode,
  draft:        PetDraft,
  errors:       FieldErrors,
  /// Set by the first submit attempt; from then on edits re-validate.
  submitted:    bool,
  submit_error: Option<String>,
  open:         bool,
}

impl PetForm {
  /// An empty dialog for a new pet.
  pub fn create() -> Self {
    Self {
      mode:         FormMode::Create,
      draft:        PetDraft::default(),
      errors:       FieldErrors::new(),
      submitted:    false,
      submit_error: None,
      open:         true,
    }
  }

  /// A dialog pre-filled from `pet`.
  pub fn edit(pet: &Pet) -> Self {
    Self {
      mode: FormMode::Edit(pet.id),
      draft: PetDraft::from_pet(pet),
      ..Self::create()
    }
  }

  pub fn mode(&self) -> FormMode { self.mode }

  pub fn is_open(&self) -> bool { self.open }

  pub fn errors(&self) -> &FieldErrors { &self.errors }

  pub fn error(&self, field: PetField) -> Option<&str> { self.errors.get(field.key()) }

  /// The message from the last failed request, if any.
  pub fn submit_error(&self) -> Option<&str> { self.submit_error.as_deref() }

  // ── Field access ──────────────────────────────────────────────────────

  /// Current text of a scalar field. Tag fields return their pending
  /// input; the image field returns the attached file name.
  pub fn text(&self, field: PetField) -> &str {
    match field {
      PetField::Name => &self.draft.name,
      PetField::Age => &self.draft.age,
      PetField::Breed => &self.draft.breed,
      PetField::Location => &self.draft.location,
      PetField::Image => self
        .draft
        .image
        .as_ref()
        .map(|i| i.file_name.as_str())
        .unwrap_or(""),
      tags => self.tags(tags).map(|t| t.input.as_str()).unwrap_or(""),
    }
  }

  /// Replace the text of a scalar field, or the pending input of a tag
  /// field.
  pub fn set_text(&mut self, field: PetField, value: impl Into<String>) {
    let value = value.into();
    match field {
      PetField::Name => self.draft.name = value,
      PetField::Age => self.draft.age = value,
      PetField::Breed => self.draft.breed = value,
      PetField::Location => self.draft.location = value,
      PetField::Image => return,
      tags => {
        if let Some(list) = self.tags_mut(tags) {
          list.input = value;
        }
        return;
      }
    }
    self.revalidate(field);
  }

  pub fn tags(&self, field: PetField) -> Option<&TagList> {
    match field {
      PetField::Requirements => Some(&self.draft.requirements),
      PetField::HealthStatuses => Some(&self.draft.health_statuses),
      PetField::Personality => Some(&self.draft.personality),
      _ => None,
    }
  }

  fn tags_mut(&mut self, field: PetField) -> Option<&mut TagList> {
    match field {
      PetField::Requirements => Some(&mut self.draft.requirements),
      PetField::HealthStatuses => Some(&mut self.draft.health_statuses),
      PetField::Personality => Some(&mut self.draft.personality),
      _ => None,
    }
  }

  /// Append `value` to a tag field. Blank values are ignored.
  pub fn add_tag(&mut self, field: PetField, value: &str) -> bool {
    let added = self.tags_mut(field).is_some_and(|t| t.push(value));
    if added {
      self.revalidate(field);
    }
    added
  }

  /// Add a tag field's pending input.
  pub fn commit_tag_input(&mut self, field: PetField) -> bool {
    let added = self.tags_mut(field).is_some_and(TagList::commit_input);
    if added {
      self.revalidate(field);
    }
    added
  }

  pub fn remove_tag(&mut self, field: PetField, index: usize) -> Option<String> {
    let removed = self.tags_mut(field)?.remove(index);
    self.revalidate(field);
    removed
  }

  pub fn attach_image(&mut self, image: ImageAttachment) { self.draft.image = Some(image); }

  pub fn clear_image(&mut self) { self.draft.image = None; }

  fn revalidate(&mut self, field: PetField) {
    if self.submitted {
      self.errors.recheck(field.key(), self.draft.rules(field));
    }
  }

  // ── Submission ────────────────────────────────────────────────────────

  /// Validate every field and record the errors.
  pub fn validate(&mut self) -> bool {
    let mut errors = FieldErrors::new();
    for field in <PetField as strum::IntoEnumIterator>::iter() {
      errors.check(field.key(), self.draft.rules(field));
    }
    self.errors = errors;
    self.errors.is_empty()
  }

  /// Step 1: validate and build the outbound request.
  pub fn prepare(&mut self) -> Option<PetRequest> {
    self.submitted = true;
    if !self.validate() {
      return None;
    }
    let draft = &self.draft;
    Some(PetRequest {
      mode:       self.mode,
      submission: PetSubmission {
        name:            draft.name.clone(),
        age:             draft.parsed_age().unwrap_or_default(),
        breed:           draft.breed.clone(),
        location:        draft.location.clone(),
        requirements:    draft.requirements.items().to_vec(),
        health_statuses: draft.health_statuses.items().to_vec(),
        personality:     draft.personality.items().to_vec(),
        image:           draft.image.clone(),
      },
    })
  }

  /// Step 3: apply the request outcome. Success closes the dialog and
  /// discards the draft in both modes; failure keeps both.
  pub fn settle(&mut self, outcome: &Result<Pet>) -> SubmitOutcome {
    match outcome {
      Ok(_) => {
        self.open = false;
        self.draft = PetDraft::default();
        self.errors.clear();
        self.submitted = false;
        self.submit_error = None;
        SubmitOutcome::Saved
      }
      Err(e) => {
        let message = e.to_string();
        self.submit_error = Some(message.clone());
        SubmitOutcome::Failed(message)
      }
    }
  }

  pub async fn submit<B, N>(&mut self, mutations: &Mutations<B, N>) -> SubmitOutcome
  where
    B: AdoptionBackend,
    N: Notifier,
  {
    let Some(request) = self.prepare() else {
      return SubmitOutcome::Invalid;
    };
    let outcome = request.send(mutations).await;
    self.settle(&outcome)
  }

  /// Close without submitting. The draft is discarded.
  pub fn cancel(&mut self) {
    self.open = false;
    self.draft = PetDraft::default();
  }
}
