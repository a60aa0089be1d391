//! Keyed cache of server collections.
//!
//! One [`QueryCache`] is created by the application and handed to every
//! component that reads or invalidates server data. Each key holds the last
//! collection fetched for it plus a stale flag; invalidation sets the flag
//! and the next read (or an explicit refetch) goes back to the backend.

use std::{
  future::Future,
  sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use strum::{Display, EnumIter};
use tracing::debug;

use crate::{Result, backend::AdoptionBackend, pet::Pet, user::User};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Cache keys; the display form is the backend collection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum QueryKey {
  #[strum(serialize = "/mascotas")]
  Pets,
  #[strum(serialize = "/usuarios")]
  Users,
}

/// Observable state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
  /// Never fetched.
  Empty,
  Fresh,
  /// Holds data, but a mutation has made it out of date.
  Stale,
}

// ─── Slot ────────────────────────────────────────────────────────────────────

/// Storage for one key. Opaque outside this module.
#[derive(Debug)]
pub struct Slot<T> {
  data:          Option<Arc<Vec<T>>>,
  stale:         bool,
  invalidations: u64,
}

impl<T> Default for Slot<T> {
  fn default() -> Self {
    Self {
      data:          None,
      stale:         false,
      invalidations: 0,
    }
  }
}

impl<T> Slot<T> {
  fn status(&self) -> QueryStatus {
    match (&self.data, self.stale) {
      (None, _) => QueryStatus::Empty,
      (Some(_), true) => QueryStatus::Stale,
      (Some(_), false) => QueryStatus::Fresh,
    }
  }
}

/// A record type that the cache stores as a collection under one key.
pub trait Resource: Sized + Send + Sync + 'static {
  const KEY: QueryKey;

  fn slot(cache: &QueryCache) -> &RwLock<Slot<Self>>;

  fn fetch<B: AdoptionBackend>(
    backend: &B,
  ) -> impl Future<Output = Result<Vec<Self>>> + Send + '_;
}

impl Resource for Pet {
  const KEY: QueryKey = QueryKey::Pets;

  fn slot(cache: &QueryCache) -> &RwLock<Slot<Self>> { &cache.pets }

  fn fetch<B: AdoptionBackend>(
    backend: &B,
  ) -> impl Future<Output = Result<Vec<Self>>> + Send + '_ {
    backend.list_pets()
  }
}

impl Resource for User {
  const KEY: QueryKey = QueryKey::Users;

  fn slot(cache: &QueryCache) -> &RwLock<Slot<Self>> { &cache.users }

  fn fetch<B: AdoptionBackend>(
    backend: &B,
  ) -> impl Future<Output = Result<Vec<Self>>> + Send + '_ {
    backend.list_users()
  }
}

// ─── Cache ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct QueryCache {
  pets:  RwLock<Slot<Pet>>,
  users: RwLock<Slot<User>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
  lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
  lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl QueryCache {
  pub fn new() -> Self { Self::default() }

  /// The cached collection for `R`, fresh or stale.
  pub fn get<R: Resource>(&self) -> Option<Arc<Vec<R>>> { read(R::slot(self)).data.clone() }

  pub fn status(&self, key: QueryKey) -> QueryStatus {
    match key {
      QueryKey::Pets => read(&self.pets).status(),
      QueryKey::Users => read(&self.users).status(),
    }
  }

  /// Whether the next read of `key` must go to the backend.
  pub fn needs_fetch(&self, key: QueryKey) -> bool { self.status(key) != QueryStatus::Fresh }

  /// How many times `key` has been invalidated since the cache was created.
  pub fn invalidation_count(&self, key: QueryKey) -> u64 {
    match key {
      QueryKey::Pets => read(&self.pets).invalidations,
      QueryKey::Users => read(&self.users).invalidations,
    }
  }

  /// Mark `key` stale. Cached data stays readable until the refetch lands.
  pub fn invalidate(&self, key: QueryKey) {
    debug!(%key, "invalidating query");
    match key {
      QueryKey::Pets => Self::mark_stale(&self.pets),
      QueryKey::Users => Self::mark_stale(&self.users),
    }
  }

  fn mark_stale<T>(lock: &RwLock<Slot<T>>) {
    let mut slot = write(lock);
    slot.stale = true;
    slot.invalidations += 1;
  }

  /// Store a collection for `R`. The last write wins; the key only becomes
  /// fresh again if it was not invalidated after `seen_invalidations`.
  fn store<R: Resource>(&self, data: Vec<R>, seen_invalidations: u64) -> Arc<Vec<R>> {
    let data = Arc::new(data);
    let mut slot = write(R::slot(self));
    slot.data = Some(data.clone());
    if slot.invalidations == seen_invalidations {
      slot.stale = false;
    }
    data
  }

  /// Seed `R` directly, marking it fresh.
  pub fn set<R: Resource>(&self, data: Vec<R>) -> Arc<Vec<R>> {
    let seen = read(R::slot(self)).invalidations;
    self.store(data, seen)
  }

  /// Fetch `R` from the backend unconditionally and store the result.
  pub async fn refetch<R, B>(&self, backend: &B) -> Result<Arc<Vec<R>>>
  where
    R: Resource,
    B: AdoptionBackend,
  {
    let seen = read(R::slot(self)).invalidations;
    debug!(key = %R::KEY, "fetching query");
    let data = R::fetch(backend).await?;
    Ok(self.store(data, seen))
  }

  /// The cached collection if it is fresh, otherwise a refetch.
  pub async fn load<R, B>(&self, backend: &B) -> Result<Arc<Vec<R>>>
  where
    R: Resource,
    B: AdoptionBackend,
  {
    if !self.needs_fetch(R::KEY)
      && let Some(data) = self.get::<R>()
    {
      return Ok(data);
    }
    self.refetch(backend).await
  }
}
