//! Derived views over the cached collections: the adopter catalog filter,
//! dashboard statistics, and fuzzy search for the admin tables.
//!
//! Everything here is pure; callers recompute whenever the cache or the
//! criteria change.

use std::collections::HashSet;

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::{pet::Pet, user::User};

/// Upper bound of the age slider.
pub const MAX_AGE: i64 = 15;

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Criteria for the adopter-facing catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
  /// Inclusive `[lo, hi]`.
  pub age_range: (i64, i64),
  /// Exact breed match; `None` matches every breed.
  pub breed:     Option<String>,
}

impl Default for CatalogFilter {
  fn default() -> Self {
    Self {
      age_range: (0, MAX_AGE),
      breed:     None,
    }
  }
}

impl CatalogFilter {
  /// Whether `pet` belongs in the catalog under these criteria.
  ///
  /// A pet whose age cannot be parsed is never excluded by the age range.
  /// Pets with any adoption status set are never listed.
  pub fn matches(&self, pet: &Pet) -> bool {
    let (lo, hi) = self.age_range;
    let age_ok = pet.age.parsed().is_none_or(|age| lo <= age && age <= hi);
    let breed_ok = self
      .breed
      .as_deref()
      .is_none_or(|b| b.is_empty() || pet.breed == b);
    age_ok && breed_ok && pet.is_available()
  }

  pub fn apply<'a>(&self, pets: &'a [Pet]) -> Vec<&'a Pet> {
    pets.iter().filter(|p| self.matches(p)).collect()
  }

  /// Move the lower bound by `delta`, keeping `0 <= lo <= hi`.
  pub fn shift_min(&mut self, delta: i64) {
    let (lo, hi) = self.age_range;
    self.age_range.0 = (lo + delta).clamp(0, hi);
  }

  /// Move the upper bound by `delta`, keeping `lo <= hi <= MAX_AGE`.
  pub fn shift_max(&mut self, delta: i64) {
    let (lo, hi) = self.age_range;
    self.age_range.1 = (hi + delta).clamp(lo, MAX_AGE);
  }

  /// Step the breed selection through `None, breeds[0], .., breeds[n-1], None`.
  pub fn cycle_breed(&mut self, breeds: &[String]) {
    let next = match &self.breed {
      None => breeds.first(),
      Some(current) => breeds
        .iter()
        .position(|b| b == current)
        .and_then(|i| breeds.get(i + 1)),
    };
    self.breed = next.cloned();
  }
}

/// Distinct breeds across the whole, unfiltered collection, in first-seen
/// order.
pub fn available_breeds(pets: &[Pet]) -> Vec<String> {
  let mut seen = HashSet::new();
  pets
    .iter()
    .filter(|p| seen.insert(p.breed.as_str()))
    .map(|p| p.breed.clone())
    .collect()
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
  pub total:     usize,
  pub available: usize,
  pub adopted:   usize,
  /// Number of distinct locations.
  pub locations: usize,
}

/// How many pets the dashboard lists under "recent".
pub const RECENT_LIMIT: usize = 5;

impl DashboardStats {
  pub fn from_pets(pets: &[Pet]) -> Self {
    let available = pets.iter().filter(|p| p.is_available()).count();
    let locations = pets
      .iter()
      .map(|p| p.location.as_str())
      .collect::<HashSet<_>>()
      .len();
    Self {
      total: pets.len(),
      available,
      adopted: pets.len() - available,
      locations,
    }
  }
}

/// The first [`RECENT_LIMIT`] pets in collection order.
pub fn recent_pets(pets: &[Pet]) -> &[Pet] { &pets[..pets.len().min(RECENT_LIMIT)] }

// ─── Admin search ────────────────────────────────────────────────────────────

/// Pets whose name or breed fuzzily match `query`. An empty query keeps
/// everything.
pub fn search_pets<'a>(pets: &'a [Pet], query: &str) -> Vec<&'a Pet> {
  if query.is_empty() {
    return pets.iter().collect();
  }
  let matcher = SkimMatcherV2::default();
  pets
    .iter()
    .filter(|p| {
      matcher.fuzzy_match(&p.name, query).is_some()
        || matcher.fuzzy_match(&p.breed, query).is_some()
    })
    .collect()
}

/// Users whose full name or email fuzzily match `query`.
pub fn search_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
  if query.is_empty() {
    return users.iter().collect();
  }
  let matcher = SkimMatcherV2::default();
  users
    .iter()
    .filter(|u| {
      matcher.fuzzy_match(&u.full_name(), query).is_some()
        || matcher.fuzzy_match(&u.email, query).is_some()
    })
    .collect()
}
