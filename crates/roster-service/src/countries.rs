//! [`CountriesService`] — the country pipeline. Add-only plus reads; no
//! update or delete is defined for countries.

use std::sync::Arc;

use chrono::Utc;
use roster_core::{
  country::{Country, CountryAddRequest, CountryResponse},
  store::CountryStore,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Country operations over a shared store handle.
pub struct CountriesService<S> {
  store: Arc<S>,
}

impl<S> CountriesService<S>
where
  S: CountryStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Check the name, reject duplicates, assign a fresh identifier, and
  /// persist.
  ///
  /// The duplicate check is read-then-write: two concurrent adds of the
  /// same name can both pass it. Known limitation.
  pub async fn add_country(
    &self,
    request: Option<CountryAddRequest>,
  ) -> Result<CountryResponse> {
    let request =
      request.ok_or(Error::MissingArgument("country add request"))?;
    let name = request.name.ok_or(Error::MissingArgument("country name"))?;

    let existing = self
      .store
      .get_country_by_name(&name)
      .await
      .map_err(Error::store)?;
    if existing.is_some() {
      return Err(Error::DuplicateCountryName(name));
    }

    let country = Country {
      country_id: Uuid::new_v4(),
      name,
      created_at: Utc::now(),
    };
    let country = self
      .store
      .insert_country(country)
      .await
      .map_err(Error::store)?;
    tracing::info!(country_id = %country.country_id, "added country");

    Ok(country.to_response())
  }

  /// Every country, in stable store order.
  pub async fn get_all_countries(&self) -> Result<Vec<CountryResponse>> {
    let countries =
      self.store.list_countries().await.map_err(Error::store)?;
    Ok(countries.iter().map(Country::to_response).collect())
  }

  /// Point lookup. `None` in, `None` out; an unknown identifier is also
  /// `None`, never an error.
  pub async fn get_country_by_id(
    &self,
    id: Option<Uuid>,
  ) -> Result<Option<CountryResponse>> {
    let Some(id) = id else {
      return Ok(None);
    };
    Ok(
      self
        .store
        .get_country(id)
        .await
        .map_err(Error::store)?
        .map(|c| c.to_response()),
    )
  }
}
