//! Adoption applications linking a pet to a user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApplicationStatus {
  #[default]
  Pending,
  Approved,
  Rejected,
}

/// An application to adopt `pet_id`, filed by `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adoption {
  pub id:               i64,
  pub pet_id:           i64,
  pub user_id:          i64,
  #[serde(default)]
  pub status:           ApplicationStatus,
  pub application_date: NaiveDate,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:            Option<String>,
}

impl Adoption {
  /// A fresh, pending application dated `on`.
  pub fn apply(id: i64, pet_id: i64, user_id: i64, on: NaiveDate) -> Self {
    Self {
      id,
      pet_id,
      user_id,
      status: ApplicationStatus::default(),
      application_date: on,
      notes: None,
    }
  }

  pub fn is_open(&self) -> bool { self.status == ApplicationStatus::Pending }
}
