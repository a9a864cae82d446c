//! Country — the lookup entity person records reference by identifier.
//!
//! Countries are add-only in this core: no update or delete is defined.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored country record. Names are unique among countries; the mutation
/// pipeline enforces this with a case-sensitive lookup before insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
  pub country_id: Uuid,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

impl Country {
  pub fn to_response(&self) -> CountryResponse {
    CountryResponse {
      country_id: self.country_id,
      name:       self.name.clone(),
    }
  }
}

/// Input to the country add operation. `name` stays optional here so the
/// pipeline can report its absence as an argument error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryAddRequest {
  pub name: Option<String>,
}

/// The read model for country operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResponse {
  pub country_id: Uuid,
  pub name:       String,
}
