//! Application state machine and event dispatcher.
//!
//! Network work never blocks the loop: fetches, submissions, deletes and
//! image reads run as spawned tasks that report back over a channel as
//! [`TaskEvent`]s. A form dialog owns its in-flight submission through a
//! [`Pending`] guard, so closing the dialog aborts the request.

use std::{
  collections::{HashMap, HashSet},
  path::Path,
  sync::Arc,
};

use bytes::Bytes;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use huellas_core::{
  Error,
  adoption::Adoption,
  backend::{AdoptionBackend, ImageAttachment},
  cache::{QueryCache, QueryKey},
  card::{AdoptHandler, FlipCard},
  filter::{CatalogFilter, available_breeds, search_pets, search_users},
  form::{PetField, PetForm, UserField, UserForm, cycle},
  mutation::Mutations,
  notify::{Notification, NotificationLog},
  pet::Pet,
  user::User,
};
use strum::{Display, EnumIter, IntoEnumIterator};
use tokio::{sync::mpsc, task::AbortHandle};
use tracing::{info, warn};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Screen {
  /// Adopter-facing catalog with filters and flip cards.
  Catalog,
  /// Admin overview: counts and recently added pets.
  Dashboard,
  /// Admin pet table.
  Pets,
  /// Admin user table.
  Users,
}

impl Screen {
  /// The collection this screen reads.
  pub fn query(self) -> QueryKey {
    match self {
      Self::Catalog | Self::Dashboard | Self::Pets => QueryKey::Pets,
      Self::Users => QueryKey::Users,
    }
  }
}

// ─── Background tasks ─────────────────────────────────────────────────────────

/// Completion messages from spawned tasks.
#[derive(Debug)]
pub enum TaskEvent {
  Fetched {
    key:    QueryKey,
    result: Result<(), String>,
  },
  PetSaved {
    ticket:  u64,
    outcome: huellas_core::Result<Pet>,
  },
  UserSaved {
    ticket:  u64,
    outcome: huellas_core::Result<User>,
  },
  Deleted(huellas_core::Result<()>),
  ImageRead {
    ticket: u64,
    result: huellas_core::Result<ImageAttachment>,
  },
}

/// An in-flight submission. Dropping it aborts the task.
#[derive(Debug)]
pub struct Pending {
  ticket: u64,
  handle: AbortHandle,
}

impl Drop for Pending {
  fn drop(&mut self) { self.handle.abort(); }
}

// ─── Dialogs ──────────────────────────────────────────────────────────────────

pub struct PetDialog {
  pub form:       PetForm,
  pub focus:      usize,
  /// Selected entry within the focused tag field.
  pub tag_cursor: usize,
  /// Path typed into the image field, read on Enter.
  pub image_path: String,
  pub pending:    Option<Pending>,
  /// Image file being read for this dialog.
  pub image_read: Option<Pending>,
}

impl PetDialog {
  fn new(form: PetForm) -> Self {
    Self {
      form,
      focus: 0,
      tag_cursor: 0,
      image_path: String::new(),
      pending: None,
      image_read: None,
    }
  }

  pub fn field(&self) -> PetField { PetField::iter().nth(self.focus).unwrap_or(PetField::Name) }

  pub fn is_saving(&self) -> bool { self.pending.is_some() }
}

pub struct UserDialog {
  pub form:    UserForm,
  pub focus:   usize,
  pub pending: Option<Pending>,
}

impl UserDialog {
  fn new(form: UserForm) -> Self {
    Self {
      form,
      focus: 0,
      pending: None,
    }
  }

  pub fn field(&self) -> UserField {
    self
      .form
      .visible_fields()
      .get(self.focus)
      .copied()
      .unwrap_or(UserField::DocumentType)
  }

  pub fn is_saving(&self) -> bool { self.pending.is_some() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
  Pet { id: i64, name: String },
  User { id: i64, name: String },
}

pub enum Dialog {
  Pet(PetDialog),
  User(UserDialog),
  Delete(DeleteTarget),
}

// ─── Adoption applications ────────────────────────────────────────────────────

/// Applications confirmed from catalog cards during this session.
#[derive(Debug, Default)]
pub struct Applications {
  pub user_id: i64,
  pub entries: Vec<Adoption>,
}

impl AdoptHandler for Applications {
  fn on_adopt(&mut self, pet: &Pet) {
    let id = self.entries.len() as i64 + 1;
    let application = Adoption::apply(id, pet.id, self.user_id, Local::now().date_naive());
    info!(pet = pet.id, user = self.user_id, "adoption application recorded");
    self.entries.push(application);
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<B> {
  /// Current screen.
  pub screen: Screen,

  /// Modal dialog on top of the screen, if any.
  pub dialog: Option<Dialog>,

  /// Backend, cache and notification sink, shared with spawned tasks.
  pub mutations: Mutations<B, NotificationLog>,

  /// Catalog criteria.
  pub filter: CatalogFilter,

  /// Cursor within the filtered catalog.
  pub catalog_cursor: usize,

  /// Interaction state of the card under the catalog cursor.
  pub card: FlipCard,

  /// Fuzzy query for the admin tables (only edited while `search_active`).
  pub search: String,

  /// Whether the user is typing a search query.
  pub search_active: bool,

  /// Cursor within the searched admin table.
  pub table_cursor: usize,

  pub applications: Applications,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Latest mutation notification.
  pub notice: Option<Notification>,

  fetching:    HashSet<QueryKey>,
  /// Invalidation count at the time a fetch failed; the key is not retried
  /// until it changes or the user refreshes.
  failed:      HashMap<QueryKey, u64>,
  next_ticket: u64,
  tx:          mpsc::UnboundedSender<TaskEvent>,
  rx:          mpsc::UnboundedReceiver<TaskEvent>,
}

impl<B: AdoptionBackend + 'static> App<B> {
  /// Create an [`App`] with an empty cache.
  pub fn new(backend: B, user_id: i64) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      screen: Screen::Catalog,
      dialog: None,
      mutations: Mutations::new(
        Arc::new(backend),
        Arc::new(QueryCache::new()),
        Arc::new(NotificationLog::new()),
      ),
      filter: CatalogFilter::default(),
      catalog_cursor: 0,
      card: FlipCard::new(),
      search: String::new(),
      search_active: false,
      table_cursor: 0,
      applications: Applications {
        user_id,
        entries: Vec::new(),
      },
      status_msg: String::new(),
      notice: None,
      fetching: HashSet::new(),
      failed: HashMap::new(),
      next_ticket: 0,
      tx,
      rx,
    }
  }

  pub fn cache(&self) -> &Arc<QueryCache> { self.mutations.cache() }

  // ── Views ─────────────────────────────────────────────────────────────────

  pub fn pets(&self) -> Arc<Vec<Pet>> { self.cache().get::<Pet>().unwrap_or_default() }

  pub fn users(&self) -> Arc<Vec<User>> { self.cache().get::<User>().unwrap_or_default() }

  pub fn is_loading(&self, key: QueryKey) -> bool { self.fetching.contains(&key) }

  pub fn catalog(&self) -> Vec<Pet> {
    self
      .filter
      .apply(&self.pets())
      .into_iter()
      .cloned()
      .collect()
  }

  pub fn catalog_pet(&self) -> Option<Pet> { self.catalog().into_iter().nth(self.catalog_cursor) }

  pub fn breeds(&self) -> Vec<String> { available_breeds(&self.pets()) }

  pub fn pet_rows(&self) -> Vec<Pet> {
    search_pets(&self.pets(), &self.search)
      .into_iter()
      .cloned()
      .collect()
  }

  pub fn user_rows(&self) -> Vec<User> {
    search_users(&self.users(), &self.search)
      .into_iter()
      .cloned()
      .collect()
  }

  fn table_len(&self) -> usize {
    match self.screen {
      Screen::Pets => self.pet_rows().len(),
      Screen::Users => self.user_rows().len(),
      Screen::Catalog | Screen::Dashboard => 0,
    }
  }

  fn clamp_cursors(&mut self) {
    let catalog = self.catalog().len();
    if self.catalog_cursor >= catalog {
      self.catalog_cursor = catalog.saturating_sub(1);
      self.card = FlipCard::new();
    }
    let rows = self.table_len();
    if self.table_cursor >= rows {
      self.table_cursor = rows.saturating_sub(1);
    }
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  fn spawn<F>(&self, task: F) -> AbortHandle
  where
    F: Future<Output = TaskEvent> + Send + 'static,
  {
    let tx = self.tx.clone();
    tokio::spawn(async move {
      // The receiver only goes away on shutdown.
      let _ = tx.send(task.await);
    })
    .abort_handle()
  }

  fn ticket(&mut self) -> u64 {
    self.next_ticket += 1;
    self.next_ticket
  }

  /// Start a fetch for the current screen's collection if it is stale and
  /// not already loading.
  pub fn refresh_stale(&mut self) {
    let key = self.screen.query();
    let cache = self.cache().clone();
    if !cache.needs_fetch(key) || self.fetching.contains(&key) {
      return;
    }
    if self.failed.get(&key) == Some(&cache.invalidation_count(key)) {
      return;
    }
    self.fetching.insert(key);
    let backend = self.mutations.backend().clone();
    match key {
      QueryKey::Pets => self.spawn(async move {
        let result = cache.refetch::<Pet, B>(&backend).await;
        TaskEvent::Fetched {
          key,
          result: result.map(|_| ()).map_err(|e| e.to_string()),
        }
      }),
      QueryKey::Users => self.spawn(async move {
        let result = cache.refetch::<User, B>(&backend).await;
        TaskEvent::Fetched {
          key,
          result: result.map(|_| ()).map_err(|e| e.to_string()),
        }
      }),
    };
  }

  /// Apply every event that has already arrived.
  pub fn drain_events(&mut self) {
    while let Ok(event) = self.rx.try_recv() {
      self.apply_event(event);
    }
  }

  /// Wait for the next event and apply it.
  pub async fn next_event(&mut self) -> Option<()> {
    let event = self.rx.recv().await?;
    self.apply_event(event);
    Some(())
  }

  fn apply_event(&mut self, event: TaskEvent) {
    match event {
      TaskEvent::Fetched { key, result } => {
        self.fetching.remove(&key);
        match result {
          Ok(()) => {
            self.failed.remove(&key);
          }
          Err(e) => {
            warn!(%key, error = %e, "fetch failed");
            let seen = self.cache().invalidation_count(key);
            self.failed.insert(key, seen);
            self.status_msg = format!("Could not load {key}: {e}");
          }
        }
        self.clamp_cursors();
      }
      TaskEvent::PetSaved { ticket, outcome } => {
        if let Some(Dialog::Pet(d)) = &mut self.dialog
          && d.pending.as_ref().is_some_and(|p| p.ticket == ticket)
        {
          d.pending = None;
          d.form.settle(&outcome);
          if !d.form.is_open() {
            self.dialog = None;
          }
        }
      }
      TaskEvent::UserSaved { ticket, outcome } => {
        if let Some(Dialog::User(d)) = &mut self.dialog
          && d.pending.as_ref().is_some_and(|p| p.ticket == ticket)
        {
          d.pending = None;
          d.form.settle(&outcome);
          if !d.form.is_open() {
            self.dialog = None;
          }
        }
      }
      TaskEvent::Deleted(_) => {}
      TaskEvent::ImageRead { ticket, result } => {
        if let Some(Dialog::Pet(d)) = &mut self.dialog
          && d.image_read.as_ref().is_some_and(|p| p.ticket == ticket)
        {
          d.image_read = None;
          match result {
            Ok(image) => d.form.attach_image(image),
            Err(e) => self.status_msg = e.to_string(),
          }
        }
      }
    }
    if let Some(notice) = self.mutations.notifier().drain().pop() {
      self.notice = Some(notice);
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }
    self.status_msg.clear();
    self.notice = None;

    if self.dialog.is_some() {
      self.handle_dialog_key(key);
      return true;
    }
    if self.search_active {
      self.handle_search_key(key);
      return true;
    }
    if self.screen == Screen::Catalog && self.card.is_confirming() {
      self.handle_confirm_adopt_key(key);
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => self.switch_screen(cycle(self.screen, true)),
      KeyCode::BackTab => self.switch_screen(cycle(self.screen, false)),
      KeyCode::Char(c @ '1'..='4') => {
        if let Some(screen) = Screen::iter().nth(c as usize - '1' as usize) {
          self.switch_screen(screen);
        }
      }
      KeyCode::Char('r') => {
        let query = self.screen.query();
        self.failed.remove(&query);
        self.cache().invalidate(query);
      }
      _ => match self.screen {
        Screen::Catalog => self.handle_catalog_key(key),
        Screen::Dashboard => {}
        Screen::Pets | Screen::Users => self.handle_table_key(key),
      },
    }
    true
  }

  fn switch_screen(&mut self, screen: Screen) {
    self.screen = screen;
    self.search.clear();
    self.table_cursor = 0;
    self.card = FlipCard::new();
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.search.clear();
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        self.search.pop();
      }
      KeyCode::Char(c) => self.search.push(c),
      _ => return,
    }
    self.table_cursor = 0;
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  fn handle_catalog_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.catalog_cursor + 1 < self.catalog().len() {
          self.catalog_cursor += 1;
          self.card = FlipCard::new();
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.catalog_cursor > 0 {
          self.catalog_cursor -= 1;
          self.card = FlipCard::new();
        }
      }
      // Space stands in for the pointer entering or leaving the card.
      KeyCode::Char(' ') => {
        if self.card.is_flipped() {
          self.card.pointer_leave();
        } else if self.catalog_pet().is_some() {
          self.card.pointer_enter();
        }
      }
      KeyCode::Char('a') => {
        if self.catalog_pet().is_none() {
          return;
        }
        if self.card.is_flipped() {
          self.card.request_adopt();
        } else {
          self.status_msg = "Flip the card with Space to adopt".into();
        }
      }
      KeyCode::Char('[') => self.filter.shift_min(-1),
      KeyCode::Char(']') => self.filter.shift_min(1),
      KeyCode::Char('{') => self.filter.shift_max(-1),
      KeyCode::Char('}') => self.filter.shift_max(1),
      KeyCode::Char('b') => {
        let breeds = self.breeds();
        self.filter.cycle_breed(&breeds);
      }
      KeyCode::Char('x') => self.filter = CatalogFilter::default(),
      _ => return,
    }
    self.clamp_cursors();
  }

  fn handle_confirm_adopt_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        let Some(pet) = self.catalog_pet() else {
          self.card.cancel();
          return;
        };
        self.card.confirm(&pet, &mut self.applications);
        self.status_msg = format!("Adoption request for {} recorded", pet.name);
      }
      KeyCode::Char('n') | KeyCode::Esc => self.card.cancel(),
      _ => {}
    }
  }

  // ── Admin tables ──────────────────────────────────────────────────────────

  fn handle_table_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.table_cursor + 1 < self.table_len() {
          self.table_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.table_cursor = self.table_cursor.saturating_sub(1);
      }
      KeyCode::Char('/') => {
        self.search_active = true;
        self.search.clear();
        self.table_cursor = 0;
      }
      KeyCode::Char('n') => {
        self.dialog = Some(match self.screen {
          Screen::Users => Dialog::User(UserDialog::new(UserForm::create())),
          _ => Dialog::Pet(PetDialog::new(PetForm::create())),
        });
      }
      KeyCode::Char('e') | KeyCode::Enter => {
        self.dialog = match self.screen {
          Screen::Pets => self
            .pet_rows()
            .get(self.table_cursor)
            .map(|p| Dialog::Pet(PetDialog::new(PetForm::edit(p)))),
          Screen::Users => self
            .user_rows()
            .get(self.table_cursor)
            .map(|u| Dialog::User(UserDialog::new(UserForm::edit(u)))),
          _ => None,
        };
      }
      KeyCode::Char('d') => {
        self.dialog = match self.screen {
          Screen::Pets => self.pet_rows().get(self.table_cursor).map(|p| {
            Dialog::Delete(DeleteTarget::Pet {
              id:   p.id,
              name: p.name.clone(),
            })
          }),
          Screen::Users => self.user_rows().get(self.table_cursor).map(|u| {
            Dialog::Delete(DeleteTarget::User {
              id:   u.id,
              name: u.full_name(),
            })
          }),
          _ => None,
        };
      }
      _ => {}
    }
  }

  // ── Dialogs ───────────────────────────────────────────────────────────────

  fn handle_dialog_key(&mut self, key: KeyEvent) {
    let Some(dialog) = self.dialog.take() else {
      return;
    };
    self.dialog = match dialog {
      Dialog::Pet(d) => self.handle_pet_key(d, key).map(Dialog::Pet),
      Dialog::User(d) => self.handle_user_key(d, key).map(Dialog::User),
      Dialog::Delete(target) => self.handle_delete_key(target, key).map(Dialog::Delete),
    };
  }

  /// Returns the dialog if it stays open.
  fn handle_pet_key(&mut self, mut d: PetDialog, key: KeyEvent) -> Option<PetDialog> {
    if key.code == KeyCode::Esc {
      if d.is_saving() {
        // The request may already have reached the backend.
        self.cache().invalidate(QueryKey::Pets);
      }
      d.form.cancel();
      return None;
    }
    if d.is_saving() {
      return Some(d);
    }
    if is_submit(key) {
      match d.form.prepare() {
        Some(request) => {
          let ticket = self.ticket();
          let mutations = self.mutations.clone();
          let handle = self.spawn(async move {
            TaskEvent::PetSaved {
              ticket,
              outcome: request.send(&mutations).await,
            }
          });
          d.pending = Some(Pending { ticket, handle });
        }
        None => self.status_msg = "Fix the highlighted fields".into(),
      }
      return Some(d);
    }

    let count = PetField::iter().count();
    let field = d.field();
    match key.code {
      KeyCode::Tab | KeyCode::Down => {
        d.focus = (d.focus + 1) % count;
        d.tag_cursor = 0;
      }
      KeyCode::BackTab | KeyCode::Up => {
        d.focus = (d.focus + count - 1) % count;
        d.tag_cursor = 0;
      }
      KeyCode::Enter if field == PetField::Image => {
        let path = d.image_path.trim().to_string();
        if !path.is_empty() {
          let ticket = self.ticket();
          let handle = self.spawn(async move {
            TaskEvent::ImageRead {
              ticket,
              result: read_image(&path).await,
            }
          });
          d.image_read = Some(Pending { ticket, handle });
        }
      }
      KeyCode::Delete if field == PetField::Image => {
        d.image_read = None;
        d.form.clear_image();
        d.image_path.clear();
      }
      _ if field == PetField::Image => {
        if let Some(text) = edit_text(&d.image_path, key) {
          d.image_path = text;
        }
      }
      KeyCode::Enter if field.is_tags() => {
        d.form.commit_tag_input(field);
      }
      KeyCode::Left if field.is_tags() => d.tag_cursor = d.tag_cursor.saturating_sub(1),
      KeyCode::Right if field.is_tags() => {
        let len = d.form.tags(field).map_or(0, |t| t.len());
        if d.tag_cursor + 1 < len {
          d.tag_cursor += 1;
        }
      }
      KeyCode::Delete if field.is_tags() => {
        d.form.remove_tag(field, d.tag_cursor);
        let len = d.form.tags(field).map_or(0, |t| t.len());
        d.tag_cursor = d.tag_cursor.min(len.saturating_sub(1));
      }
      KeyCode::Enter => d.focus = (d.focus + 1) % count,
      _ => {
        if let Some(text) = edit_text(d.form.text(field), key) {
          d.form.set_text(field, text);
        }
      }
    }
    Some(d)
  }

  fn handle_user_key(&mut self, mut d: UserDialog, key: KeyEvent) -> Option<UserDialog> {
    if key.code == KeyCode::Esc {
      if d.is_saving() {
        self.cache().invalidate(QueryKey::Users);
      }
      d.form.cancel();
      return None;
    }
    if d.is_saving() {
      return Some(d);
    }
    if is_submit(key) {
      match d.form.prepare() {
        Some(request) => {
          let ticket = self.ticket();
          let mutations = self.mutations.clone();
          let handle = self.spawn(async move {
            TaskEvent::UserSaved {
              ticket,
              outcome: request.send(&mutations).await,
            }
          });
          d.pending = Some(Pending { ticket, handle });
        }
        None => self.status_msg = "Fix the highlighted fields".into(),
      }
      return Some(d);
    }

    let count = d.form.visible_fields().len();
    let field = d.field();
    match key.code {
      KeyCode::Tab | KeyCode::Down | KeyCode::Enter => d.focus = (d.focus + 1) % count,
      KeyCode::BackTab | KeyCode::Up => d.focus = (d.focus + count - 1) % count,
      KeyCode::Left if field.is_choice() => d.form.cycle_choice(field, false),
      KeyCode::Right | KeyCode::Char(' ') if field.is_choice() => {
        d.form.cycle_choice(field, true)
      }
      _ => {
        if let Some(text) = edit_text(&d.form.text(field), key) {
          d.form.set_text(field, text);
        }
      }
    }
    Some(d)
  }

  fn handle_delete_key(&mut self, target: DeleteTarget, key: KeyEvent) -> Option<DeleteTarget> {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        let mutations = self.mutations.clone();
        match target {
          DeleteTarget::Pet { id, name } => {
            self.status_msg = format!("Deleting {name}…");
            self.spawn(async move { TaskEvent::Deleted(mutations.delete_pet(id).await) });
          }
          DeleteTarget::User { id, name } => {
            self.status_msg = format!("Deleting {name}…");
            self.spawn(async move { TaskEvent::Deleted(mutations.delete_user(id).await) });
          }
        }
        None
      }
      KeyCode::Char('n') | KeyCode::Esc => None,
      _ => Some(target),
    }
  }
}

fn is_submit(key: KeyEvent) -> bool {
  key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s')
}

/// Apply a typing key to `current`; `None` if the key does not edit text.
fn edit_text(current: &str, key: KeyEvent) -> Option<String> {
  match key.code {
    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
      Some(format!("{current}{c}"))
    }
    KeyCode::Backspace => {
      let mut text = current.to_string();
      text.pop();
      Some(text)
    }
    _ => None,
  }
}

// ─── Image attachments ────────────────────────────────────────────────────────

async fn read_image(path: &str) -> huellas_core::Result<ImageAttachment> {
  let data = tokio::fs::read(path)
    .await
    .map_err(|source| Error::Attachment {
      path: path.to_string(),
      source,
    })?;
  let file_name = Path::new(path)
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.to_string());
  Ok(ImageAttachment {
    content_type: content_type(&file_name).to_string(),
    file_name,
    data: Bytes::from(data),
  })
}

fn content_type(file_name: &str) -> &'static str {
  let ext = Path::new(file_name)
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase);
  match ext.as_deref() {
    Some("png") => "image/png",
    Some("jpg" | "jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    _ => "application/octet-stream",
  }
}
