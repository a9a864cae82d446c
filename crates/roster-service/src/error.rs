//! Service error taxonomy.

use roster_core::ValidationError;
use thiserror::Error;
use uuid::Uuid;

/// An error raised by a service operation.
///
/// Read misses are `Ok(None)`, never errors; only writes aimed at a missing
/// record error out. Every variant except [`Error::Store`] is raised before
/// the store is touched at all.
#[derive(Debug, Error)]
pub enum Error {
  /// A required request or identifier parameter was absent.
  #[error("required argument missing: {0}")]
  MissingArgument(&'static str),

  /// The first field constraint a mutation request violated.
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  /// An update aimed at an identifier with no stored record.
  #[error("no person with id {0}")]
  PersonNotFound(Uuid),

  /// A country add using a name that is already taken.
  #[error("country name already exists: {0}")]
  DuplicateCountryName(String),

  /// A backend failure, propagated as-is.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
