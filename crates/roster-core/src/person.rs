//! Person — the primary record, its mutation requests, and the response
//! projection returned to callers.
//!
//! The stored entity and the response projection are distinct shapes on
//! purpose: `age` and the country display name exist only on the projection
//! and are derived at read time, never persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Gender ──────────────────────────────────────────────────────────────────

/// The closed set of gender values accepted on mutation requests.
/// The entity stores the textual rendering, which fits its 10-char column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Male => "Male",
      Self::Female => "Female",
      Self::Other => "Other",
    }
  }
}

impl std::fmt::Display for Gender {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A stored person record.
///
/// `person_id` is assigned once, on add, and never changes. `tin` is owned
/// by the storage layer (defaulted there, unique there) and is never
/// validated or touched by updates. `created_at` is stamped by the mutation
/// pipeline on add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:           Uuid,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub birth_date:          Option<NaiveDate>,
  pub gender:              Option<String>,
  pub country_id:          Uuid,
  pub address:             Option<String>,
  pub receives_newsletter: bool,
  pub tin:                 Option<String>,
  pub created_at:          DateTime<Utc>,
}

impl Person {
  /// Project into the response shape. The country display name is resolved
  /// by the caller (batch enrichment); `age` is computed against `today`.
  pub fn to_response(
    &self,
    country: Option<String>,
    today: NaiveDate,
  ) -> PersonResponse {
    PersonResponse {
      person_id:           self.person_id,
      name:                self.name.clone(),
      email:               self.email.clone(),
      birth_date:          self.birth_date,
      gender:              self.gender.clone(),
      country_id:          self.country_id,
      country,
      address:             self.address.clone(),
      receives_newsletter: self.receives_newsletter,
      age:                 self.birth_date.map(|b| age_on(b, today)),
    }
  }
}

/// Whole years between `birth_date` and `today`: elapsed days over 365.25,
/// rounded to the nearest year.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i64 {
  let days = (today - birth_date).num_days() as f64;
  (days / 365.25).round() as i64
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Input to the add operation. Carries every mutable field; the identifier
/// and timestamp are assigned by the mutation pipeline, not accepted from
/// callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonAddRequest {
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub birth_date:          Option<NaiveDate>,
  pub gender:              Option<Gender>,
  pub country_id:          Uuid,
  pub address:             Option<String>,
  pub receives_newsletter: bool,
}

impl PersonAddRequest {
  /// Build the stored record from a validated request.
  pub fn into_person(
    self,
    person_id: Uuid,
    created_at: DateTime<Utc>,
  ) -> Person {
    Person {
      person_id,
      name: self.name,
      email: self.email,
      birth_date: self.birth_date,
      gender: self.gender.map(|g| g.as_str().to_owned()),
      country_id: self.country_id,
      address: self.address,
      receives_newsletter: self.receives_newsletter,
      tin: None,
      created_at,
    }
  }
}

/// Input to the update operation: the target identifier plus every mutable
/// field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonUpdateRequest {
  pub person_id:           Uuid,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub birth_date:          Option<NaiveDate>,
  pub gender:              Option<Gender>,
  pub country_id:          Uuid,
  pub address:             Option<String>,
  pub receives_newsletter: bool,
}

impl PersonUpdateRequest {
  /// Overwrite every mutable field on `existing` from this request.
  /// A `None` here clears the stored value: this is a full replace, not a
  /// merge. The identifier, TIN, and creation timestamp are untouched.
  pub fn apply_to(&self, existing: &mut Person) {
    existing.name = self.name.clone();
    existing.email = self.email.clone();
    existing.birth_date = self.birth_date;
    existing.gender = self.gender.map(|g| g.as_str().to_owned());
    existing.country_id = self.country_id;
    existing.address = self.address.clone();
    existing.receives_newsletter = self.receives_newsletter;
  }
}

// ─── Response projection ─────────────────────────────────────────────────────

/// The read model returned by every person operation — never stored.
///
/// `country` reflects the country store's state at the time the projection
/// was built; `age` is recomputed on every projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonResponse {
  pub person_id:           Uuid,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub birth_date:          Option<NaiveDate>,
  pub gender:              Option<String>,
  pub country_id:          Uuid,
  pub country:             Option<String>,
  pub address:             Option<String>,
  pub receives_newsletter: bool,
  pub age:                 Option<i64>,
}
