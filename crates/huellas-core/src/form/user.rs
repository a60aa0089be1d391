//! The user create/edit dialog controller.

use chrono::{Local, NaiveDate};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::{FormMode, SubmitOutcome, cycle};
use crate::{
  Result,
  backend::AdoptionBackend,
  mutation::Mutations,
  notify::Notifier,
  user::{DocumentType, Gender, Role, User, UserPayload},
  validate::{FieldErrors, Rule, email, min_chars},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum UserField {
  #[strum(serialize = "Document type")]
  DocumentType,
  #[strum(serialize = "Document number")]
  DocumentNumber,
  #[strum(serialize = "Given names")]
  GivenNames,
  #[strum(serialize = "Surnames")]
  Surnames,
  #[strum(serialize = "Gender")]
  Gender,
  #[strum(serialize = "Birth date")]
  BirthDate,
  #[strum(serialize = "Phone")]
  Phone,
  #[strum(serialize = "Email")]
  Email,
  #[strum(serialize = "Address")]
  Address,
  #[strum(serialize = "City")]
  City,
  #[strum(serialize = "Occupation")]
  Occupation,
  #[strum(serialize = "Role")]
  Role,
  #[strum(serialize = "Password")]
  Password,
}

impl UserField {
  pub fn key(self) -> &'static str {
    match self {
      Self::DocumentType => "tipoDocumento",
      Self::DocumentNumber => "numeroDocumento",
      Self::GivenNames => "nombres",
      Self::Surnames => "apellidos",
      Self::Gender => "genero",
      Self::BirthDate => "fechaNacimiento",
      Self::Phone => "telefono",
      Self::Email => "correo",
      Self::Address => "direccion",
      Self::City => "ciudad",
      Self::Occupation => "ocupacion",
      Self::Role => "rolNombre",
      Self::Password => "password",
    }
  }

  /// Fields edited by stepping through a fixed set of values.
  pub fn is_choice(self) -> bool {
    matches!(self, Self::DocumentType | Self::Gender | Self::Role)
  }
}

#[derive(Debug, Clone, PartialEq)]
struct UserDraft {
  document_type:   DocumentType,
  document_number: String,
  given_names:     String,
  surnames:        String,
  gender:          Gender,
  /// `YYYY-MM-DD` text.
  birth_date:      String,
  phone:           String,
  email:           String,
  address:         String,
  city:            String,
  occupation:      String,
  role:            Role,
  password:        String,
}

impl UserDraft {
  fn empty(today: NaiveDate) -> Self {
    Self {
      document_type:   DocumentType::Unset,
      document_number: String::new(),
      given_names:     String::new(),
      surnames:        String::new(),
      gender:          Gender::M,
      birth_date:      today.format(DATE_FORMAT).to_string(),
      phone:           String::new(),
      email:           String::new(),
      address:         String::new(),
      city:            String::new(),
      occupation:      String::new(),
      role:            Role::User,
      password:        String::new(),
    }
  }

  fn from_user(user: &User, today: NaiveDate) -> Self {
    Self {
      document_type:   user.document_type,
      document_number: user.document_number.clone(),
      given_names:     user.given_names.clone(),
      surnames:        user.surnames.clone(),
      gender:          user.gender,
      birth_date:      user
        .birth_date
        .unwrap_or(today)
        .format(DATE_FORMAT)
        .to_string(),
      phone:           user.phone.clone(),
      email:           user.email.clone(),
      address:         user.address.clone(),
      city:            user.city.clone(),
      occupation:      user.occupation.clone().unwrap_or_default(),
      role:            user.role,
      password:        String::new(),
    }
  }

  fn parsed_birth_date(&self) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(self.birth_date.trim(), DATE_FORMAT).ok()
  }

  fn rules(&self, field: UserField, mode: FormMode) -> Vec<Rule> {
    match field {
      UserField::DocumentNumber => vec![min_chars(
        &self.document_number,
        5,
        "Document number must be at least 5 characters",
      )],
      UserField::GivenNames => vec![min_chars(
        &self.given_names,
        2,
        "Given names must be at least 2 characters",
      )],
      UserField::Surnames => vec![min_chars(
        &self.surnames,
        2,
        "Surnames must be at least 2 characters",
      )],
      UserField::BirthDate => vec![match self.parsed_birth_date() {
        Some(_) => Ok(()),
        None => Err("Birth date must be a valid YYYY-MM-DD date".to_string()),
      }],
      UserField::Phone => vec![min_chars(
        &self.phone,
        7,
        "Phone must be at least 7 characters",
      )],
      UserField::Email => vec![email(&self.email, "Invalid email address")],
      UserField::Address => vec![min_chars(
        &self.address,
        5,
        "Address must be at least 5 characters",
      )],
      UserField::City => vec![min_chars(&self.city, 3, "City must be at least 3 characters")],
      // An empty password on edit leaves the stored one untouched.
      UserField::Password if mode.is_edit() && self.password.is_empty() => Vec::new(),
      UserField::Password => vec![min_chars(
        &self.password,
        6,
        "Password must be at least 6 characters",
      )],
      // Choice fields can only hold valid values; occupation is optional.
      UserField::DocumentType | UserField::Gender | UserField::Role | UserField::Occupation => {
        Vec::new()
      }
    }
  }

  fn payload(&self) -> UserPayload {
    let occupation = self.occupation.trim();
    UserPayload {
      document_type:   self.document_type,
      document_number: self.document_number.clone(),
      given_names:     self.given_names.clone(),
      surnames:        self.surnames.clone(),
      gender:          self.gender,
      birth_date:      self.parsed_birth_date(),
      phone:           self.phone.clone(),
      address:         self.address.clone(),
      city:            self.city.clone(),
      occupation:      (!occupation.is_empty()).then(|| occupation.to_string()),
      email:           self.email.clone(),
      password:        (!self.password.is_empty()).then(|| self.password.clone()),
      role:            self.role,
    }
  }
}

/// A validated user request, detached from the form.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRequest {
  pub mode:    FormMode,
  pub payload: UserPayload,
}

impl UserRequest {
  pub async fn send<B, N>(&self, mutations: &Mutations<B, N>) -> Result<User>
  where
    B: AdoptionBackend,
    N: Notifier,
  {
    match self.mode {
      FormMode::Create => mutations.create_user(&self.payload).await,
      FormMode::Edit(id) => mutations.update_user(id, &self.payload).await,
    }
  }
}

/// Controller for the user dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
  mode:         FormMode,
  today:        NaiveDate,
  draft:        UserDraft,
  errors:       FieldErrors,
  submitted:    bool,
  submit_error: Option<String>,
  open:         bool,
}

impl UserForm {
  pub fn create() -> Self { Self::create_on(Local::now().date_naive()) }

  /// An empty dialog whose birth date defaults to `today`.
  pub fn create_on(today: NaiveDate) -> Self {
    Self {
      mode: FormMode::Create,
      today,
      draft: UserDraft::empty(today),
      errors: FieldErrors::new(),
      submitted: false,
      submit_error: None,
      open: true,
    }
  }

  /// A dialog pre-filled from `user`, with the password left blank.
  pub fn edit(user: &User) -> Self { Self::edit_on(user, Local::now().date_naive()) }

  pub fn edit_on(user: &User, today: NaiveDate) -> Self {
    Self {
      mode: FormMode::Edit(user.id),
      draft: UserDraft::from_user(user, today),
      ..Self::create_on(today)
    }
  }

  pub fn mode(&self) -> FormMode { self.mode }

  pub fn is_open(&self) -> bool { self.open }

  pub fn errors(&self) -> &FieldErrors { &self.errors }

  pub fn error(&self, field: UserField) -> Option<&str> { self.errors.get(field.key()) }

  pub fn submit_error(&self) -> Option<&str> { self.submit_error.as_deref() }

  /// Fields the dialog shows; the password is only asked for on create.
  pub fn visible_fields(&self) -> Vec<UserField> {
    UserField::iter()
      .filter(|f| *f != UserField::Password || !self.mode.is_edit())
      .collect()
  }

  // ── Field access ──────────────────────────────────────────────────────

  /// Display text of any field, including choice fields.
  pub fn text(&self, field: UserField) -> String {
    let d = &self.draft;
    match field {
      UserField::DocumentType => d.document_type.to_string(),
      UserField::DocumentNumber => d.document_number.clone(),
      UserField::GivenNames => d.given_names.clone(),
      UserField::Surnames => d.surnames.clone(),
      UserField::Gender => d.gender.to_string(),
      UserField::BirthDate => d.birth_date.clone(),
      UserField::Phone => d.phone.clone(),
      UserField::Email => d.email.clone(),
      UserField::Address => d.address.clone(),
      UserField::City => d.city.clone(),
      UserField::Occupation => d.occupation.clone(),
      UserField::Role => d.role.to_string(),
      UserField::Password => d.password.clone(),
    }
  }

  /// Replace a text field. Choice fields ignore this; use
  /// [`UserForm::cycle_choice`].
  pub fn set_text(&mut self, field: UserField, value: impl Into<String>) {
    let value = value.into();
    let d = &mut self.draft;
    match field {
      UserField::DocumentNumber => d.document_number = value,
      UserField::GivenNames => d.given_names = value,
      UserField::Surnames => d.surnames = value,
      UserField::BirthDate => d.birth_date = value,
      UserField::Phone => d.phone = value,
      UserField::Email => d.email = value,
      UserField::Address => d.address = value,
      UserField::City => d.city = value,
      UserField::Occupation => d.occupation = value,
      UserField::Password => d.password = value,
      UserField::DocumentType | UserField::Gender | UserField::Role => return,
    }
    self.revalidate(field);
  }

  /// Step a choice field to its next (or previous) value.
  pub fn cycle_choice(&mut self, field: UserField, forward: bool) {
    let d = &mut self.draft;
    match field {
      UserField::DocumentType => d.document_type = cycle(d.document_type, forward),
      UserField::Gender => d.gender = cycle(d.gender, forward),
      UserField::Role => d.role = cycle(d.role, forward),
      _ => return,
    }
    self.revalidate(field);
  }

  fn revalidate(&mut self, field: UserField) {
    if self.submitted {
      self
        .errors
        .recheck(field.key(), self.draft.rules(field, self.mode));
    }
  }

  // ── Submission ────────────────────────────────────────────────────────

  pub fn validate(&mut self) -> bool {
    let mut errors = FieldErrors::new();
    for field in self.visible_fields() {
      errors.check(field.key(), self.draft.rules(field, self.mode));
    }
    self.errors = errors;
    self.errors.is_empty()
  }

  pub fn prepare(&mut self) -> Option<UserRequest> {
    self.submitted = true;
    if !self.validate() {
      return None;
    }
    Some(UserRequest {
      mode:    self.mode,
      payload: self.draft.payload(),
    })
  }

  /// Success closes the dialog and discards the draft in both modes.
  pub fn settle(&mut self, outcome: &Result<User>) -> SubmitOutcome {
    match outcome {
      Ok(_) => {
        self.open = false;
        self.draft = UserDraft::empty(self.today);
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

  pub fn cancel(&mut self) {
    self.open = false;
    self.draft = UserDraft::empty(self.today);
  }
}
