//! Declarative request validation.
//!
//! Rules run in field-declaration order; the first failure wins and is
//! returned as a [`ValidationError`]. Nothing here touches the store, so a
//! failed validation leaves persistence completely untouched.

use std::sync::LazyLock;

use regex_lite::Regex;
use thiserror::Error;

use crate::person::{PersonAddRequest, PersonUpdateRequest};

/// Upper bound for the free-text columns (name, email, address).
const TEXT_MAX: usize = 255;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// The first field constraint a mutation request violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
  pub field:   &'static str,
  pub message: String,
}

fn fail(field: &'static str, message: impl Into<String>) -> ValidationError {
  ValidationError {
    field,
    message: message.into(),
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

fn required(
  field: &'static str,
  value: Option<&str>,
) -> Result<(), ValidationError> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(()),
    _ => Err(fail(field, "can't be blank")),
  }
}

fn max_len(
  field: &'static str,
  value: Option<&str>,
  limit: usize,
) -> Result<(), ValidationError> {
  match value {
    Some(v) if v.chars().count() > limit => {
      Err(fail(field, format!("can't exceed {limit} characters")))
    }
    _ => Ok(()),
  }
}

fn email_format(
  field: &'static str,
  value: Option<&str>,
) -> Result<(), ValidationError> {
  match value {
    Some(v) if !EMAIL_RE.is_match(v) => {
      Err(fail(field, "must be a valid email address"))
    }
    _ => Ok(()),
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A mutation request that can be checked before it reaches the store.
pub trait Validate {
  /// Returns the first failing constraint, in field-declaration order.
  fn validate(&self) -> Result<(), ValidationError>;
}

/// The shared rule table for person mutations. Gender and the country
/// reference are constrained by their types; the TIN is storage-owned and
/// never validated here.
fn person_rules(
  name: Option<&str>,
  email: Option<&str>,
  address: Option<&str>,
) -> Result<(), ValidationError> {
  required("name", name)?;
  max_len("name", name, TEXT_MAX)?;
  email_format("email", email)?;
  max_len("email", email, TEXT_MAX)?;
  max_len("address", address, TEXT_MAX)?;
  Ok(())
}

impl Validate for PersonAddRequest {
  fn validate(&self) -> Result<(), ValidationError> {
    person_rules(
      self.name.as_deref(),
      self.email.as_deref(),
      self.address.as_deref(),
    )
  }
}

impl Validate for PersonUpdateRequest {
  fn validate(&self) -> Result<(), ValidationError> {
    person_rules(
      self.name.as_deref(),
      self.email.as_deref(),
      self.address.as_deref(),
    )
  }
}
