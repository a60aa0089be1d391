//! Editable string collections (requirements, health notes, traits).

/// A tag collection plus the text currently typed for the next entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
  items: Vec<String>,
  /// Text typed but not yet added.
  pub input: String,
}

impl TagList {
  pub fn new(items: Vec<String>) -> Self {
    Self {
      items,
      input: String::new(),
    }
  }

  pub fn items(&self) -> &[String] { &self.items }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Append `value` trimmed. Blank input is ignored. Duplicates are kept.
  /// Returns whether anything was added.
  pub fn push(&mut self, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
      return false;
    }
    self.items.push(value.to_string());
    true
  }

  /// Add the pending input and clear it. Blank input is left in place.
  pub fn commit_input(&mut self) -> bool {
    let input = std::mem::take(&mut self.input);
    if self.push(&input) {
      true
    } else {
      self.input = input;
      false
    }
  }

  /// Remove the entry at `index`; out-of-range indices are ignored.
  pub fn remove(&mut self, index: usize) -> Option<String> {
    (index < self.items.len()).then(|| self.items.remove(index))
  }

  pub fn clear(&mut self) {
    self.items.clear();
    self.input.clear();
  }
}
