//! Country-name enrichment for person response projections.
//!
//! Display names are resolved in one batch per read: collect the distinct
//! country ids in play, fetch the countries once, and merge from an
//! id→name map. An id with no matching country resolves to `None` and
//! never raises; orphaned references surface as a missing display name.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use roster_core::{
  person::{Person, PersonResponse},
  store::CountryStore,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Project `persons` into responses, resolving display names through
/// `store` in a single batch.
pub(crate) async fn project_persons<S: CountryStore>(
  store: &S,
  persons: Vec<Person>,
) -> Result<Vec<PersonResponse>> {
  let names = country_names(store, &persons).await?;
  let today = Utc::now().date_naive();
  Ok(
    persons
      .iter()
      .map(|p| p.to_response(names.get(&p.country_id).cloned(), today))
      .collect(),
  )
}

/// Project a single person; one country lookup, no list fetch.
pub(crate) async fn project_one<S: CountryStore>(
  store: &S,
  person: Person,
) -> Result<PersonResponse> {
  let country = store
    .get_country(person.country_id)
    .await
    .map_err(Error::store)?
    .map(|c| c.name);
  Ok(person.to_response(country, Utc::now().date_naive()))
}

async fn country_names<S: CountryStore>(
  store: &S,
  persons: &[Person],
) -> Result<HashMap<Uuid, String>> {
  let wanted: HashSet<Uuid> = persons.iter().map(|p| p.country_id).collect();
  if wanted.is_empty() {
    return Ok(HashMap::new());
  }
  let countries = store.list_countries().await.map_err(Error::store)?;
  Ok(
    countries
      .into_iter()
      .filter(|c| wanted.contains(&c.country_id))
      .map(|c| (c.country_id, c.name))
      .collect(),
  )
}
