//! Field validation rules and the per-field error map.
//!
//! Each form field runs an ordered list of rules; the first one that fails
//! produces the field's message and later rules are not consulted.

use std::{collections::BTreeMap, fmt};

/// A single rule outcome: `Err` carries the user-facing message.
pub type Rule = Result<(), String>;

/// One message per invalid field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  /// Run `rules` for `field` in order and record the first failure. A field
  /// that already has a message keeps it.
  pub fn check<I>(&mut self, field: &'static str, rules: I)
  where
    I: IntoIterator<Item = Rule>,
  {
    if self.0.contains_key(field) {
      return;
    }
    if let Some(Err(message)) = rules.into_iter().find(Result::is_err) {
      self.0.insert(field, message);
    }
  }

  /// Replace whatever is recorded for `field` with the outcome of `rules`.
  pub fn recheck<I>(&mut self, field: &'static str, rules: I)
  where
    I: IntoIterator<Item = Rule>,
  {
    self.0.remove(field);
    self.check(field, rules);
  }

  pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn clear(&mut self) { self.0.clear(); }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
    self.0.iter().map(|(k, v)| (*k, v.as_str()))
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, (field, message)) in self.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{field}: {message}")?;
    }
    Ok(())
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// At least `min` characters.
pub fn min_chars(value: &str, min: usize, message: &str) -> Rule {
  if value.chars().count() >= min {
    Ok(())
  } else {
    Err(message.to_string())
  }
}

pub fn non_empty_list<T>(items: &[T], message: &str) -> Rule {
  if items.is_empty() {
    Err(message.to_string())
  } else {
    Ok(())
  }
}

/// A plain `local@domain.tld` shape check; no whitespace, a non-empty local
/// part, and a dotted domain without empty labels.
pub fn email(value: &str, message: &str) -> Rule {
  let valid = !value.chars().any(char::is_whitespace)
    && value.split_once('@').is_some_and(|(local, domain)| {
      !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
    });
  if valid { Ok(()) } else { Err(message.to_string()) }
}
