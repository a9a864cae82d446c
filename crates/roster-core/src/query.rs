//! The field-driven filter and sort engine.
//!
//! Callers select a field by its PascalCase key (`"Name"`,
//! `"BirthDate"`, `"ReceiveNewsLetters"`, ...), parsed here into an explicit
//! tag. Unknown or empty keys make the operation a no-op; they never error.
//! Filtering and sorting are independent and compose in either order.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::person::PersonResponse;

// ─── Field tags ──────────────────────────────────────────────────────────────

/// A sortable (and mostly filterable) field of [`PersonResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonField {
  Name,
  Email,
  BirthDate,
  Gender,
  Country,
  Address,
  Age,
  Newsletter,
}

impl PersonField {
  /// Parse a caller-supplied key, case-insensitively, over the supported
  /// field names. Unknown keys yield `None`.
  pub fn parse(key: &str) -> Option<Self> {
    match key.to_ascii_lowercase().as_str() {
      "name" => Some(Self::Name),
      "email" => Some(Self::Email),
      "birthdate" => Some(Self::BirthDate),
      "gender" => Some(Self::Gender),
      "country" => Some(Self::Country),
      "address" => Some(Self::Address),
      "age" => Some(Self::Age),
      "receivenewsletters" | "newsletter" => Some(Self::Newsletter),
      _ => None,
    }
  }

  /// Whether the substring filter supports this field. Age and the
  /// newsletter flag have no textual form; a filter keyed on them is a
  /// no-op, same as an unknown key.
  pub fn is_searchable(self) -> bool {
    !matches!(self, Self::Age | Self::Newsletter)
  }

  /// The string the substring filter matches against, or `None` when the
  /// record has no value for this field.
  fn search_text(self, person: &PersonResponse) -> Option<String> {
    match self {
      Self::Name => person.name.clone(),
      Self::Email => person.email.clone(),
      Self::BirthDate => person.birth_date.map(render_birth_date),
      Self::Gender => person.gender.clone(),
      Self::Country => person.country.clone(),
      Self::Address => person.address.clone(),
      Self::Age | Self::Newsletter => None,
    }
  }
}

/// The rendering birth dates are searched against, e.g. `"02 January 1999"`.
pub fn render_birth_date(date: NaiveDate) -> String {
  date.format("%d %B %Y").to_string()
}

/// Sort direction for [`sort_persons`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Apply a case-insensitive substring filter keyed by `key`.
///
/// An empty key, an empty/absent search string, and an unrecognised or
/// non-searchable key all yield the input unchanged. A record whose
/// selected field is absent passes the filter — callers rely on the
/// permissive default.
pub fn filter_persons(
  persons: Vec<PersonResponse>,
  key: &str,
  search: Option<&str>,
) -> Vec<PersonResponse> {
  let needle = match search {
    Some(s) if !s.is_empty() => s.to_lowercase(),
    _ => return persons,
  };
  let field = match PersonField::parse(key) {
    Some(f) if f.is_searchable() => f,
    _ => return persons,
  };

  persons
    .into_iter()
    .filter(|person| match field.search_text(person) {
      Some(text) => text.to_lowercase().contains(&needle),
      None => true,
    })
    .collect()
}

// ─── Sort ────────────────────────────────────────────────────────────────────

/// Sort by `key` in `order`. An empty or unrecognised key returns the input
/// unchanged, in its original order.
///
/// The sort is stable in both directions: descending reverses the
/// comparator, not the list, so equal keys keep their input order.
pub fn sort_persons(
  mut persons: Vec<PersonResponse>,
  key: &str,
  order: SortOrder,
) -> Vec<PersonResponse> {
  let Some(field) = PersonField::parse(key) else {
    return persons;
  };

  persons.sort_by(|a, b| {
    let ordering = compare(field, a, b);
    match order {
      SortOrder::Asc => ordering,
      SortOrder::Desc => ordering.reverse(),
    }
  });
  persons
}

/// Ascending comparison for one field. String fields compare
/// case-insensitively; absent values sort first, as the minimal value of
/// their type.
fn compare(
  field: PersonField,
  a: &PersonResponse,
  b: &PersonResponse,
) -> Ordering {
  match field {
    PersonField::Name => cmp_text(&a.name, &b.name),
    PersonField::Email => cmp_text(&a.email, &b.email),
    PersonField::BirthDate => a.birth_date.cmp(&b.birth_date),
    PersonField::Gender => cmp_text(&a.gender, &b.gender),
    PersonField::Country => cmp_text(&a.country, &b.country),
    PersonField::Address => cmp_text(&a.address, &b.address),
    PersonField::Age => a.age.cmp(&b.age),
    PersonField::Newsletter => {
      a.receives_newsletter.cmp(&b.receives_newsletter)
    }
  }
}

/// Case-insensitive, locale-agnostic ordering over optional text.
fn cmp_text(a: &Option<String>, b: &Option<String>) -> Ordering {
  match (a, b) {
    (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
    (None, Some(_)) => Ordering::Less,
    (Some(_), None) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}
