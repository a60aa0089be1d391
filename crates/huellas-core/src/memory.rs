//! An in-process [`AdoptionBackend`] holding pets and users in memory.
//!
//! Records every call it receives and can be told to fail the next request
//! with a given status and body, which makes it the test double for the
//! cache, executors, forms and the terminal app.

use std::{
  fmt,
  sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;

use crate::{
  Error, Result,
  backend::{AdoptionBackend, PetSubmission},
  pet::{Pet, PetAge},
  user::{User, UserPayload},
};

/// One request as the backend saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  ListPets,
  CreatePet,
  UpdatePet(i64),
  DeletePet(i64),
  ListUsers,
  CreateUser,
  UpdateUser(i64),
  DeleteUser(i64),
}

impl fmt::Display for Call {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ListPets => f.write_str("GET /mascotas"),
      Self::CreatePet => f.write_str("POST /mascotas"),
      Self::UpdatePet(id) => write!(f, "PUT /mascotas/{id}"),
      Self::DeletePet(id) => write!(f, "DELETE /mascotas/{id}"),
      Self::ListUsers => f.write_str("GET /usuarios"),
      Self::CreateUser => f.write_str("POST /usuarios"),
      Self::UpdateUser(id) => write!(f, "PUT /usuarios/{id}"),
      Self::DeleteUser(id) => write!(f, "DELETE /usuarios/{id}"),
    }
  }
}

#[derive(Debug, Default)]
struct State {
  pets:      Vec<Pet>,
  users:     Vec<User>,
  next_id:   i64,
  calls:     Vec<Call>,
  fail_next: Option<(u16, String)>,
}

impl State {
  /// Log `call` and consume a pending injected failure, if any.
  fn begin(&mut self, call: Call) -> Result<()> {
    self.calls.push(call);
    match self.fail_next.take() {
      Some((status, body)) => Err(Error::Http { status, body }),
      None => Ok(()),
    }
  }

  fn allocate_id(&mut self) -> i64 {
    let existing = self
      .pets
      .iter()
      .map(|p| p.id)
      .chain(self.users.iter().map(|u| u.id))
      .max()
      .unwrap_or(0);
    self.next_id = self.next_id.max(existing) + 1;
    self.next_id
  }
}

fn not_found(what: &str, id: i64) -> Error {
  Error::Http {
    status: 404,
    body:   format!("{what} {id} not found"),
  }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
  state: Mutex<State>,
}

impl MemoryBackend {
  pub fn new() -> Self { Self::default() }

  pub fn with_pets(self, pets: Vec<Pet>) -> Self {
    self.lock().pets = pets;
    self
  }

  pub fn with_users(self, users: Vec<User>) -> Self {
    self.lock().users = users;
    self
  }

  fn lock(&self) -> MutexGuard<'_, State> { self.state.lock().unwrap_or_else(PoisonError::into_inner) }

  /// Make the next request fail with `status` and response text `body`.
  pub fn fail_next(&self, status: u16, body: impl Into<String>) {
    self.lock().fail_next = Some((status, body.into()));
  }

  pub fn calls(&self) -> Vec<Call> { self.lock().calls.clone() }

  pub fn pets(&self) -> Vec<Pet> { self.lock().pets.clone() }

  pub fn users(&self) -> Vec<User> { self.lock().users.clone() }
}

fn apply_submission(pet: &mut Pet, submission: &PetSubmission) {
  pet.name = submission.name.clone();
  pet.age = PetAge::from(submission.age);
  pet.breed = submission.breed.clone();
  pet.location = submission.location.clone();
  pet.requirements = submission.requirements.clone();
  pet.health_statuses = submission.health_statuses.clone();
  pet.personality = submission.personality.clone();
  if let Some(image) = &submission.image {
    pet.image_url = Some(format!("/uploads/{}", image.file_name));
  }
}

fn apply_payload(user: &mut User, payload: &UserPayload) {
  user.document_type = payload.document_type;
  user.document_number = payload.document_number.clone();
  user.given_names = payload.given_names.clone();
  user.surnames = payload.surnames.clone();
  user.gender = payload.gender;
  user.birth_date = payload.birth_date;
  user.phone = payload.phone.clone();
  user.address = payload.address.clone();
  user.city = payload.city.clone();
  user.occupation = payload.occupation.clone();
  user.email = payload.email.clone();
  user.role = payload.role;
}

impl AdoptionBackend for MemoryBackend {
  // ── Pets ──────────────────────────────────────────────────────────────

  async fn list_pets(&self) -> Result<Vec<Pet>> {
    let mut state = self.lock();
    state.begin(Call::ListPets)?;
    Ok(state.pets.clone())
  }

  async fn create_pet(&self, submission: &PetSubmission) -> Result<Pet> {
    let mut state = self.lock();
    state.begin(Call::CreatePet)?;
    let mut pet = Pet {
      id:               state.allocate_id(),
      identification:   String::new(),
      name:             String::new(),
      breed:            String::new(),
      color:            String::new(),
      kind:             String::new(),
      age:              PetAge::default(),
      size:             None,
      sex:              None,
      health:           String::new(),
      location:         String::new(),
      adoption_status:  None,
      foundation_id:    None,
      image_url:        None,
      adopter_document: None,
      requirements:     Vec::new(),
      health_statuses:  Vec::new(),
      personality:      Vec::new(),
    };
    apply_submission(&mut pet, submission);
    state.pets.push(pet.clone());
    Ok(pet)
  }

  async fn update_pet(&self, id: i64, submission: &PetSubmission) -> Result<Pet> {
    let mut state = self.lock();
    state.begin(Call::UpdatePet(id))?;
    let pet = state
      .pets
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or_else(|| not_found("pet", id))?;
    apply_submission(pet, submission);
    Ok(pet.clone())
  }

  async fn delete_pet(&self, id: i64) -> Result<()> {
    let mut state = self.lock();
    state.begin(Call::DeletePet(id))?;
    let before = state.pets.len();
    state.pets.retain(|p| p.id != id);
    if state.pets.len() == before {
      return Err(not_found("pet", id));
    }
    Ok(())
  }

  // ── Users ─────────────────────────────────────────────────────────────

  async fn list_users(&self) -> Result<Vec<User>> {
    let mut state = self.lock();
    state.begin(Call::ListUsers)?;
    Ok(state.users.clone())
  }

  async fn create_user(&self, payload: &UserPayload) -> Result<User> {
    let mut state = self.lock();
    state.begin(Call::CreateUser)?;
    let mut user = User {
      id:              state.allocate_id(),
      document_type:   Default::default(),
      document_number: String::new(),
      given_names:     String::new(),
      surnames:        String::new(),
      gender:          Default::default(),
      birth_date:      None,
      phone:           String::new(),
      address:         String::new(),
      city:            String::new(),
      occupation:      None,
      email:           String::new(),
      role:            Default::default(),
      created_at:      Some(Utc::now()),
      image_url:       None,
    };
    apply_payload(&mut user, payload);
    state.users.push(user.clone());
    Ok(user)
  }

  async fn update_user(&self, id: i64, payload: &UserPayload) -> Result<User> {
    let mut state = self.lock();
    state.begin(Call::UpdateUser(id))?;
    let user = state
      .users
      .iter_mut()
      .find(|u| u.id == id)
      .ok_or_else(|| not_found("user", id))?;
    apply_payload(user, payload);
    Ok(user.clone())
  }

  async fn delete_user(&self, id: i64) -> Result<()> {
    let mut state = self.lock();
    state.begin(Call::DeleteUser(id))?;
    let before = state.users.len();
    state.users.retain(|u| u.id != id);
    if state.users.len() == before {
      return Err(not_found("user", id));
    }
    Ok(())
  }
}
