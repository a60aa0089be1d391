//! Cross-module tests: catalog filtering, the cache, mutation executors and
//! the form controllers, all against the in-memory backend.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use crate::{
  Error,
  backend::{AdoptionBackend, ImageAttachment, PetSubmission},
  cache::{QueryCache, QueryKey, QueryStatus},
  card::{self, FlipCard, NoAdopt},
  filter::{CatalogFilter, DashboardStats, available_breeds, recent_pets, search_pets},
  form::{FormMode, PetField, PetForm, SubmitOutcome, UserField, UserForm},
  memory::{Call, MemoryBackend},
  mutation::Mutations,
  notify::{NotificationKind, NotificationLog},
  pet::{AdoptionStatus, Pet, PetAge},
  user::{DocumentType, Gender, Role, User},
};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn pet(id: i64, name: &str, breed: &str, age: PetAge) -> Pet {
  Pet {
    id,
    identification: format!("ID-{id}"),
    name: name.into(),
    breed: breed.into(),
    color: String::new(),
    kind: "perro".into(),
    age,
    size: None,
    sex: None,
    health: String::new(),
    location: "Bogotá".into(),
    adoption_status: None,
    foundation_id: Some(1),
    image_url: None,
    adopter_document: None,
    requirements: vec!["patio".into()],
    health_statuses: vec!["sana".into()],
    personality: vec!["jugetona".into()],
  }
}

fn user(id: i64, given: &str, email: &str) -> User {
  User {
    id,
    document_type: DocumentType::CedulaCiudadania,
    document_number: "1020304050".into(),
    given_names: given.into(),
    surnames: "Gómez".into(),
    gender: Gender::F,
    birth_date: NaiveDate::from_ymd_opt(1992, 1, 15),
    phone: "3001234567".into(),
    address: "Carrera 7 # 12-34".into(),
    city: "Bogotá".into(),
    occupation: None,
    email: email.into(),
    role: Role::User,
    created_at: None,
    image_url: None,
  }
}

fn sample_pets() -> Vec<Pet> {
  let mut adopted = pet(4, "Max", "Labrador", 3u32.into());
  adopted.adoption_status = Some(AdoptionStatus::Adoptado);
  let mut pending = pet(6, "Coco", "Poodle", 1u32.into());
  pending.adoption_status = Some(AdoptionStatus::Pendiente);
  vec![
    pet(1, "Luna", "Labrador", 2u32.into()),
    pet(2, "Rocky", "Pastor", PetAge::Text("9".into())),
    pet(3, "Nube", "Criollo", PetAge::Text("desconocida".into())),
    adopted,
    pet(5, "Kira", "Pastor", 14u32.into()),
    pending,
  ]
}

struct Harness {
  backend:   Arc<MemoryBackend>,
  cache:     Arc<QueryCache>,
  log:       Arc<NotificationLog>,
  mutations: Mutations<MemoryBackend, NotificationLog>,
}

#[fixture]
fn harness() -> Harness {
  let backend = Arc::new(
    MemoryBackend::new()
      .with_pets(sample_pets())
      .with_users(vec![user(10, "Ana", "ana@example.com")]),
  );
  let cache = Arc::new(QueryCache::new());
  let log = Arc::new(NotificationLog::new());
  let mutations = Mutations::new(backend.clone(), cache.clone(), log.clone());
  Harness {
    backend,
    cache,
    log,
    mutations,
  }
}

fn ids(pets: &[&Pet]) -> Vec<i64> { pets.iter().map(|p| p.id).collect() }

// ─── Catalog filter ──────────────────────────────────────────────────────────

#[rstest]
#[case((0, 15), None, vec![1, 2, 3, 5])]
#[case((0, 5), None, vec![1, 3])]
#[case((9, 9), None, vec![2, 3])]
#[case((0, 15), Some("Pastor"), vec![2, 5])]
#[case((10, 15), Some("Pastor"), vec![5])]
#[case((0, 15), Some("Labrador"), vec![1])]
#[case((0, 15), Some("Husky"), vec![])]
fn catalog_filter_selects(
  #[case] age_range: (i64, i64),
  #[case] breed: Option<&str>,
  #[case] expected: Vec<i64>,
) {
  let pets = sample_pets();
  let filter = CatalogFilter {
    age_range,
    breed: breed.map(str::to_string),
  };
  assert_eq!(ids(&filter.apply(&pets)), expected);
}

#[test]
fn filter_matches_its_definition_for_every_pet() {
  let pets = sample_pets();
  for lo in 0..=15 {
    for hi in lo..=15 {
      for breed in [None, Some("Pastor".to_string()), Some("Criollo".to_string())] {
        let filter = CatalogFilter {
          age_range: (lo, hi),
          breed:     breed.clone(),
        };
        for p in &pets {
          let expected = p.age.parsed().is_none_or(|a| lo <= a && a <= hi)
            && breed.as_deref().is_none_or(|b| p.breed == b)
            && p.adoption_status.is_none();
          assert_eq!(filter.matches(p), expected, "pet {} in {lo}..={hi}", p.id);
        }
      }
    }
  }
}

#[test]
fn overflowing_age_is_outside_every_range() {
  let huge = pet(9, "Matusalén", "Criollo", PetAge::Text("99999999999999999999".into()));
  assert!(!CatalogFilter::default().matches(&huge));
}

#[test]
fn available_breeds_ignore_filters_and_status() {
  let pets = sample_pets();
  assert_eq!(available_breeds(&pets), [
    "Labrador", "Pastor", "Criollo", "Poodle"
  ]);
}

#[test]
fn range_adjusters_stay_ordered() {
  let mut filter = CatalogFilter::default();
  filter.shift_max(5);
  assert_eq!(filter.age_range, (0, 15));
  filter.shift_min(20);
  assert_eq!(filter.age_range, (15, 15));
  filter.shift_max(-3);
  assert_eq!(filter.age_range, (15, 15));
  filter.shift_min(-4);
  filter.shift_max(-3);
  assert_eq!(filter.age_range, (11, 12));
}

#[test]
fn breed_cycle_returns_to_all() {
  let breeds = vec!["Labrador".to_string(), "Pastor".to_string()];
  let mut filter = CatalogFilter::default();
  filter.cycle_breed(&breeds);
  assert_eq!(filter.breed.as_deref(), Some("Labrador"));
  filter.cycle_breed(&breeds);
  assert_eq!(filter.breed.as_deref(), Some("Pastor"));
  filter.cycle_breed(&breeds);
  assert_eq!(filter.breed, None);
}

#[test]
fn dashboard_counts() {
  let pets = sample_pets();
  let stats = DashboardStats::from_pets(&pets);
  assert_eq!(stats, DashboardStats {
    total:     6,
    available: 4,
    adopted:   2,
    locations: 1,
  });
  assert_eq!(recent_pets(&pets).len(), 5);
  assert_eq!(recent_pets(&pets[..2]).len(), 2);
}

#[test]
fn admin_search_is_fuzzy() {
  let pets = sample_pets();
  assert_eq!(ids(&search_pets(&pets, "lna")), [1]);
  assert_eq!(search_pets(&pets, "").len(), pets.len());
  assert_eq!(ids(&search_pets(&pets, "pastor")), [2, 5]);
}

// ─── Cache ───────────────────────────────────────────────────────────────────

#[rstest]
#[tokio::test]
async fn load_fetches_once_until_invalidated(harness: Harness) {
  let h = harness;
  assert_eq!(h.cache.status(QueryKey::Pets), QueryStatus::Empty);

  let first = h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  let second = h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  assert_eq!(first.len(), 6);
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(h.backend.calls(), [Call::ListPets]);

  h.cache.invalidate(QueryKey::Pets);
  assert_eq!(h.cache.status(QueryKey::Pets), QueryStatus::Stale);
  assert_eq!(h.cache.get::<Pet>().unwrap().len(), 6);

  h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  assert_eq!(h.backend.calls(), [Call::ListPets, Call::ListPets]);
  assert_eq!(h.cache.status(QueryKey::Pets), QueryStatus::Fresh);
}

#[rstest]
#[tokio::test]
async fn keys_are_independent(harness: Harness) {
  let h = harness;
  h.cache.load::<User, _>(&*h.backend).await.unwrap();
  h.cache.invalidate(QueryKey::Pets);
  assert_eq!(h.cache.status(QueryKey::Users), QueryStatus::Fresh);
  assert_eq!(h.cache.invalidation_count(QueryKey::Users), 0);
}

#[rstest]
#[tokio::test]
async fn failed_fetch_keeps_previous_data(harness: Harness) {
  let h = harness;
  h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  h.cache.invalidate(QueryKey::Pets);
  h.backend.fail_next(500, "boom");

  let err = h.cache.refetch::<Pet, _>(&*h.backend).await.unwrap_err();
  assert!(matches!(err, Error::Http { status: 500, .. }));
  assert_eq!(h.cache.get::<Pet>().unwrap().len(), 6);
  assert_eq!(h.cache.status(QueryKey::Pets), QueryStatus::Stale);
}

#[test]
fn seeding_after_invalidation_marks_fresh() {
  let cache = QueryCache::new();
  cache.set(sample_pets());
  cache.invalidate(QueryKey::Pets);
  assert_eq!(cache.status(QueryKey::Pets), QueryStatus::Stale);
  cache.set(Vec::<Pet>::new());
  assert_eq!(cache.status(QueryKey::Pets), QueryStatus::Fresh);
  assert!(cache.get::<Pet>().unwrap().is_empty());
}

// ─── Mutations ───────────────────────────────────────────────────────────────

fn luna_submission() -> PetSubmission {
  PetSubmission {
    name:            "Luna".into(),
    age:             2,
    breed:           "Labrador".into(),
    location:        "Bogotá".into(),
    requirements:    vec!["patio".into()],
    health_statuses: vec!["sana".into()],
    personality:     vec!["jugetona".into()],
    image:           None,
  }
}

#[test]
fn multipart_text_fields_encode_lists_as_json() {
  let fields = luna_submission().text_fields().unwrap();
  assert_eq!(fields, [
    ("nombre", "Luna".to_string()),
    ("edad", "2".to_string()),
    ("raza", "Labrador".to_string()),
    ("ubicacion", "Bogotá".to_string()),
    ("requisitos", r#"["patio"]"#.to_string()),
    ("estadosDeSalud", r#"["sana"]"#.to_string()),
    ("personalidad", r#"["jugetona"]"#.to_string()),
  ]);
}

#[rstest]
#[tokio::test]
async fn failed_pet_create_shows_backend_text(harness: Harness) {
  let h = harness;
  h.backend.fail_next(422, "numIdentificacion duplicado");

  let err = h.mutations.create_pet(&luna_submission()).await.unwrap_err();
  assert_eq!(err.to_string(), "numIdentificacion duplicado");
  assert_eq!(h.cache.invalidation_count(QueryKey::Pets), 0);

  let notes = h.log.drain();
  assert_eq!(notes.len(), 1);
  assert_eq!(notes[0].kind, NotificationKind::Error);
  assert_eq!(notes[0].description, "numIdentificacion duplicado");
}

#[rstest]
#[tokio::test]
async fn failed_pet_update_without_body_uses_fallback(harness: Harness) {
  let h = harness;
  h.backend.fail_next(500, "  ");
  let err = h
    .mutations
    .update_pet(1, &luna_submission())
    .await
    .unwrap_err();
  assert_eq!(err.to_string(), "Error updating the pet");
}

#[rstest]
#[tokio::test]
async fn failed_delete_leaves_cache_untouched(harness: Harness) {
  let h = harness;
  let before = h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  h.backend.fail_next(500, "constraint violation");

  let err = h.mutations.delete_pet(1).await.unwrap_err();
  assert_eq!(err.to_string(), "Could not delete the pet");
  assert_eq!(h.cache.status(QueryKey::Pets), QueryStatus::Fresh);

  let after = h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  assert!(Arc::ptr_eq(&before, &after));
  assert!(after.iter().any(|p| p.id == 1));
  assert!(h.log.snapshot()[0].is_error());
}

#[rstest]
#[tokio::test]
async fn successful_delete_invalidates_and_refetch_drops_row(harness: Harness) {
  let h = harness;
  h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  h.mutations.delete_pet(1).await.unwrap();

  assert_eq!(h.cache.invalidation_count(QueryKey::Pets), 1);
  let after = h.cache.load::<Pet, _>(&*h.backend).await.unwrap();
  assert!(after.iter().all(|p| p.id != 1));
  assert_eq!(h.log.snapshot()[0].kind, NotificationKind::Success);
}

#[rstest]
#[tokio::test]
async fn user_errors_are_generic(harness: Harness) {
  let h = harness;
  h.backend.fail_next(409, "correo ya registrado");
  let err = h.mutations.delete_user(10).await.unwrap_err();
  assert_eq!(err.to_string(), "Could not delete the user");
  assert_eq!(h.log.snapshot()[0].description, "Could not delete the user");
}

// ─── Pet form ────────────────────────────────────────────────────────────────

fn fill_luna(form: &mut PetForm) {
  form.set_text(PetField::Name, "Luna");
  form.set_text(PetField::Age, "2");
  form.set_text(PetField::Breed, "Labrador");
  form.set_text(PetField::Location, "Bogotá");
  form.add_tag(PetField::Requirements, "patio");
  form.add_tag(PetField::HealthStatuses, "sana");
  form.add_tag(PetField::Personality, "jugetona");
}

#[rstest]
#[tokio::test]
async fn pet_create_posts_once_and_clears(harness: Harness) {
  let h = harness;
  let mut form = PetForm::create();
  fill_luna(&mut form);

  let outcome = form.submit(&h.mutations).await;

  assert_eq!(outcome, SubmitOutcome::Saved);
  assert_eq!(h.backend.calls(), [Call::CreatePet]);
  assert_eq!(h.cache.invalidation_count(QueryKey::Pets), 1);
  assert!(!form.is_open());
  assert_eq!(form.text(PetField::Name), "");
  assert!(form.tags(PetField::Requirements).unwrap().is_empty());
  let created = h.backend.pets().into_iter().last().unwrap();
  assert_eq!(created.name, "Luna");
  assert_eq!(created.personality, ["jugetona"]);
}

#[rstest]
#[tokio::test]
async fn empty_requirements_block_submission(harness: Harness) {
  let h = harness;
  let mut form = PetForm::create();
  fill_luna(&mut form);
  form.remove_tag(PetField::Requirements, 0);

  let outcome = form.submit(&h.mutations).await;

  assert_eq!(outcome, SubmitOutcome::Invalid);
  assert!(h.backend.calls().is_empty());
  assert_eq!(
    form.error(PetField::Requirements),
    Some("Specify at least one requirement")
  );
  assert_eq!(form.errors().len(), 1);
  assert!(form.is_open());
}

#[test]
fn every_missing_field_gets_one_message() {
  let mut form = PetForm::create();
  assert!(form.prepare().is_none());
  assert_eq!(form.error(PetField::Name), Some("Name is required"));
  assert_eq!(form.error(PetField::Age), Some("Age is required"));
  assert_eq!(form.errors().len(), 7);
}

#[test]
fn edits_revalidate_only_after_first_submit() {
  let mut form = PetForm::create();
  form.set_text(PetField::Name, "");
  assert!(form.errors().is_empty());

  assert!(form.prepare().is_none());
  form.set_text(PetField::Name, "Luna");
  assert_eq!(form.error(PetField::Name), None);
  assert_eq!(form.error(PetField::Age), Some("Age is required"));

  form.set_text(PetField::Age, "0");
  assert_eq!(form.error(PetField::Age), Some("Age is required"));
  form.set_text(PetField::Age, "3");
  assert_eq!(form.error(PetField::Age), None);
}

#[test]
fn whitespace_tag_input_is_ignored() {
  let mut form = PetForm::create();
  form.set_text(PetField::Personality, "   ");
  assert!(!form.commit_tag_input(PetField::Personality));
  assert!(form.tags(PetField::Personality).unwrap().is_empty());

  assert!(!form.add_tag(PetField::HealthStatuses, "\t "));
  assert!(form.tags(PetField::HealthStatuses).unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn failed_submit_keeps_dialog_and_draft(harness: Harness) {
  let h = harness;
  let mut form = PetForm::create();
  fill_luna(&mut form);
  h.backend.fail_next(400, "imagen demasiado grande");

  let outcome = form.submit(&h.mutations).await;

  assert_eq!(
    outcome,
    SubmitOutcome::Failed("imagen demasiado grande".into())
  );
  assert!(form.is_open());
  assert_eq!(form.text(PetField::Name), "Luna");
  assert_eq!(form.submit_error(), Some("imagen demasiado grande"));
  assert_eq!(h.cache.invalidation_count(QueryKey::Pets), 0);
}

#[rstest]
#[tokio::test]
async fn pet_edit_puts_and_closes(harness: Harness) {
  let h = harness;
  let existing = sample_pets().remove(1);
  let mut form = PetForm::edit(&existing);
  assert_eq!(form.mode(), FormMode::Edit(2));
  assert_eq!(form.text(PetField::Age), "9");

  form.set_text(PetField::Location, "Pasto");
  form.attach_image(ImageAttachment {
    file_name:    "rocky.png".into(),
    content_type: "image/png".into(),
    data:         bytes::Bytes::from_static(b"\x89PNG"),
  });
  let outcome = form.submit(&h.mutations).await;

  assert_eq!(outcome, SubmitOutcome::Saved);
  assert_eq!(h.backend.calls(), [Call::UpdatePet(2)]);
  assert!(!form.is_open());
  let updated = h.backend.pets().into_iter().find(|p| p.id == 2).unwrap();
  assert_eq!(updated.location, "Pasto");
  assert_eq!(updated.image_url.as_deref(), Some("/uploads/rocky.png"));
}

// ─── User form ───────────────────────────────────────────────────────────────

fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

fn fill_user(form: &mut UserForm) {
  form.cycle_choice(UserField::DocumentType, true);
  form.set_text(UserField::DocumentNumber, "1020304050");
  form.set_text(UserField::GivenNames, "Juan");
  form.set_text(UserField::Surnames, "Pérez");
  form.set_text(UserField::Phone, "3001234567");
  form.set_text(UserField::Email, "juan@example.com");
  form.set_text(UserField::Address, "Calle 10 # 20-30");
  form.set_text(UserField::City, "Cali");
  form.set_text(UserField::Password, "secreto1");
}

#[rstest]
#[tokio::test]
async fn user_create_sends_json_and_invalidates(harness: Harness) {
  let h = harness;
  let mut form = UserForm::create_on(today());
  assert_eq!(form.text(UserField::BirthDate), "2024-06-01");
  fill_user(&mut form);

  let request = form.prepare().unwrap();
  assert_eq!(request.payload.document_type, DocumentType::CedulaCiudadania);
  assert_eq!(request.payload.password.as_deref(), Some("secreto1"));
  assert_eq!(request.payload.occupation, None);

  let outcome = request.send(&h.mutations).await;
  assert_eq!(form.settle(&outcome), SubmitOutcome::Saved);
  assert_eq!(h.backend.calls(), [Call::CreateUser]);
  assert_eq!(h.cache.invalidation_count(QueryKey::Users), 1);
  assert!(!form.is_open());
}

#[test]
fn user_rules_report_first_failure_per_field() {
  let mut form = UserForm::create_on(today());
  form.set_text(UserField::Email, "no-es-correo");
  form.set_text(UserField::BirthDate, "31/12/1990");
  assert!(form.prepare().is_none());

  assert_eq!(
    form.error(UserField::DocumentNumber),
    Some("Document number must be at least 5 characters")
  );
  assert_eq!(form.error(UserField::Email), Some("Invalid email address"));
  assert!(form.error(UserField::BirthDate).is_some());
  assert_eq!(
    form.error(UserField::Password),
    Some("Password must be at least 6 characters")
  );
  assert_eq!(form.error(UserField::Occupation), None);
}

#[rstest]
#[tokio::test]
async fn user_edit_hides_and_omits_blank_password(harness: Harness) {
  let h = harness;
  let existing = user(10, "Ana", "ana@example.com");
  let mut form = UserForm::edit_on(&existing, today());
  assert!(!form.visible_fields().contains(&UserField::Password));
  assert_eq!(form.text(UserField::BirthDate), "1992-01-15");

  form.cycle_choice(UserField::Role, true);
  let request = form.prepare().unwrap();
  assert_eq!(request.payload.password, None);
  assert_eq!(request.payload.role, Role::Admin);

  let outcome = request.send(&h.mutations).await;
  assert_eq!(form.settle(&outcome), SubmitOutcome::Saved);
  assert_eq!(h.backend.calls(), [Call::UpdateUser(10)]);
  assert_eq!(h.backend.users()[0].role, Role::Admin);
}

#[rstest]
#[tokio::test]
async fn user_backend_failure_is_generic(harness: Harness) {
  let h = harness;
  let mut form = UserForm::create_on(today());
  fill_user(&mut form);
  h.backend.fail_next(500, "duplicate key value");

  let outcome = form.submit(&h.mutations).await;
  assert_eq!(
    outcome,
    SubmitOutcome::Failed("Could not create the user".into())
  );
  assert!(form.is_open());
  assert_eq!(form.text(UserField::GivenNames), "Juan");
}

// ─── Flip card ───────────────────────────────────────────────────────────────

#[test]
fn hover_flips_card() {
  let mut c = FlipCard::new();
  assert!(!c.is_flipped());
  c.pointer_enter();
  assert!(c.is_flipped());
  c.pointer_leave();
  assert!(!c.is_flipped());
}

#[test]
fn confirm_invokes_handler_once() {
  let luna = pet(1, "Luna", "Labrador", 2u32.into());
  let mut adopted = Vec::new();
  let mut c = FlipCard::new();
  c.pointer_enter();
  c.request_adopt();
  assert!(c.is_confirming());

  c.confirm(&luna, &mut |p: &Pet| adopted.push(p.id));
  c.confirm(&luna, &mut |p: &Pet| adopted.push(p.id));

  assert_eq!(adopted, [1]);
  assert!(!c.is_confirming());
}

#[test]
fn cancel_invokes_nothing() {
  let luna = pet(1, "Luna", "Labrador", 2u32.into());
  let mut calls = 0;
  let mut c = FlipCard::new();
  c.request_adopt();
  c.cancel();
  c.confirm(&luna, &mut |_: &Pet| calls += 1);
  assert_eq!(calls, 0);
  assert!(!c.is_confirming());

  c.request_adopt();
  c.confirm(&luna, &mut NoAdopt);
  assert!(!c.is_confirming());
}

#[test]
fn back_face_skips_empty_sections() {
  let mut p = pet(1, "Luna", "Labrador", 2u32.into());
  p.health_statuses.clear();
  let sections = card::back(&p);
  let titles: Vec<_> = sections.iter().map(|s| s.title).collect();
  assert_eq!(titles, ["Personality", "Requirements"]);
  assert_eq!(card::front(&p).age, "2");
}

#[rstest]
#[tokio::test]
async fn backend_trait_is_usable_through_reference(harness: Harness) {
  async fn count<B: AdoptionBackend>(b: &B) -> usize { b.list_pets().await.unwrap().len() }
  assert_eq!(count(&*harness.backend).await, 6);
}
