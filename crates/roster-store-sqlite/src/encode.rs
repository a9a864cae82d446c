//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as ISO 8601
//! (`YYYY-MM-DD`), UUIDs as hyphenated lowercase strings, and booleans as
//! SQLite integers.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{country::Country, person::Person};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── TIN ─────────────────────────────────────────────────────────────────────

/// The storage-layer default for the tax identification column: an 8-char
/// uppercase code drawn from a fresh UUID. Uniqueness is enforced by the
/// column's UNIQUE constraint.
pub fn generate_tin() -> String {
  Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:           String,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub birth_date:          Option<String>,
  pub gender:              Option<String>,
  pub country_id:          String,
  pub address:             Option<String>,
  pub receives_newsletter: bool,
  pub tin:                 String,
  pub created_at:          String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:           decode_uuid(&self.person_id)?,
      name:                self.name,
      email:               self.email,
      birth_date:          self
        .birth_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      gender:              self.gender,
      country_id:          decode_uuid(&self.country_id)?,
      address:             self.address,
      receives_newsletter: self.receives_newsletter,
      tin:                 Some(self.tin),
      created_at:          decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `countries` row.
pub struct RawCountry {
  pub country_id: String,
  pub name:       String,
  pub created_at: String,
}

impl RawCountry {
  pub fn into_country(self) -> Result<Country> {
    Ok(Country {
      country_id: decode_uuid(&self.country_id)?,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
