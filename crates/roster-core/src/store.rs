//! The `PersonStore` and `CountryStore` traits.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The service
//! layer depends on these abstractions, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes.

use std::future::Future;

use uuid::Uuid;

use crate::{country::Country, person::Person, query::PersonField};

// ─── Persons ─────────────────────────────────────────────────────────────────

/// Abstraction over the person half of a roster store backend.
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new person record. The caller has already assigned the
  /// identifier; the store fills storage-owned defaults (the TIN code).
  /// Returns the record as persisted.
  fn insert_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by identifier. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// List every person record.
  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Case-insensitive substring match over one stored text field.
  ///
  /// Records with no value for the field are included. Fields with no
  /// stored text column (birth date, country name, age, the newsletter
  /// flag) fall back to the full list; exact matching over those is the
  /// query engine's job.
  fn find_persons<'a>(
    &'a self,
    field: PersonField,
    text: &'a str,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Overwrite an existing record in place, keyed by its identifier.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Delete by identifier. Returns `true` if a record was removed.
  fn delete_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Countries ───────────────────────────────────────────────────────────────

/// Abstraction over the country half of a roster store backend.
pub trait CountryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new country record.
  fn insert_country(
    &self,
    country: Country,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + '_;

  /// Retrieve a country by identifier. Returns `None` if not found.
  fn get_country(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + '_;

  /// Case-sensitive exact name lookup, used by the duplicate-name check.
  fn get_country_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  /// List every country record.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;
}
