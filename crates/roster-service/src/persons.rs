//! [`PersonsService`] — the person mutation pipeline and read compositions.
//!
//! Every mutation runs validate → resolve → persist → enrich, in that
//! order; a failure at any step before persist leaves the store untouched.

use std::sync::Arc;

use chrono::Utc;
use roster_core::{
  Validate as _,
  person::{PersonAddRequest, PersonResponse, PersonUpdateRequest},
  query::{PersonField, SortOrder, filter_persons, sort_persons},
  store::{CountryStore, PersonStore},
};
use uuid::Uuid;

use crate::{
  enrich::{project_one, project_persons},
  error::{Error, Result},
};

/// Person operations over a shared store handle.
pub struct PersonsService<S> {
  store: Arc<S>,
}

impl<S> PersonsService<S>
where
  S: PersonStore + CountryStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  // ── Mutations ──────────────────────────────────────────────────────────

  /// Validate `request`, assign a fresh identifier, persist, and return
  /// the enriched response.
  pub async fn add_person(
    &self,
    request: Option<PersonAddRequest>,
  ) -> Result<PersonResponse> {
    let request =
      request.ok_or(Error::MissingArgument("person add request"))?;
    request.validate()?;

    let person = request.into_person(Uuid::new_v4(), Utc::now());
    let person = self
      .store
      .insert_person(person)
      .await
      .map_err(Error::store)?;
    tracing::info!(person_id = %person.person_id, "added person");

    project_one(self.store.as_ref(), person).await
  }

  /// Validate `request`, resolve the target record, replace every mutable
  /// field wholesale, persist, and return the enriched response.
  ///
  /// Fails with [`Error::PersonNotFound`] before any mutation when the
  /// identifier matches nothing.
  pub async fn update_person(
    &self,
    request: Option<PersonUpdateRequest>,
  ) -> Result<PersonResponse> {
    let request =
      request.ok_or(Error::MissingArgument("person update request"))?;
    request.validate()?;

    let mut person = self
      .store
      .get_person(request.person_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::PersonNotFound(request.person_id))?;

    request.apply_to(&mut person);
    let person = self
      .store
      .update_person(person)
      .await
      .map_err(Error::store)?;
    tracing::info!(person_id = %person.person_id, "updated person");

    project_one(self.store.as_ref(), person).await
  }

  /// Delete by identifier. An unknown identifier is `Ok(false)`, not an
  /// error; only a `None` identifier errors.
  pub async fn delete_person(&self, id: Option<Uuid>) -> Result<bool> {
    let id = id.ok_or(Error::MissingArgument("person id"))?;

    let existing =
      self.store.get_person(id).await.map_err(Error::store)?;
    if existing.is_none() {
      return Ok(false);
    }

    let deleted =
      self.store.delete_person(id).await.map_err(Error::store)?;
    tracing::info!(person_id = %id, "deleted person");
    Ok(deleted)
  }

  // ── Reads ──────────────────────────────────────────────────────────────

  /// Point lookup. `None` in, `None` out; an unknown identifier is also
  /// `None`, never an error.
  pub async fn get_person_by_id(
    &self,
    id: Option<Uuid>,
  ) -> Result<Option<PersonResponse>> {
    let Some(id) = id else {
      return Ok(None);
    };
    let Some(person) =
      self.store.get_person(id).await.map_err(Error::store)?
    else {
      return Ok(None);
    };
    Ok(Some(project_one(self.store.as_ref(), person).await?))
  }

  /// Every person, enriched, in stable store order.
  pub async fn get_all_persons(&self) -> Result<Vec<PersonResponse>> {
    let persons =
      self.store.list_persons().await.map_err(Error::store)?;
    project_persons(self.store.as_ref(), persons).await
  }

  /// Field-keyed substring search.
  ///
  /// The store pre-narrows over its text columns where it can; the query
  /// engine's exact pass then runs over the enriched projections either
  /// way, so birth-date renderings and country display names match the
  /// same way as stored text. An empty search string or unknown key
  /// returns everything.
  pub async fn get_filtered_persons(
    &self,
    search_by: &str,
    search_string: Option<&str>,
  ) -> Result<Vec<PersonResponse>> {
    tracing::debug!(search_by, "filtering persons");

    let persons = match (PersonField::parse(search_by), search_string) {
      (Some(field), Some(text))
        if !text.is_empty() && field.is_searchable() =>
      {
        self
          .store
          .find_persons(field, text)
          .await
          .map_err(Error::store)?
      }
      _ => self.store.list_persons().await.map_err(Error::store)?,
    };

    let responses = project_persons(self.store.as_ref(), persons).await?;
    Ok(filter_persons(responses, search_by, search_string))
  }

  /// Field-keyed ordering over an already-projected list. Pure; no store
  /// access, no side effects.
  pub fn get_sorted_persons(
    &self,
    persons: Vec<PersonResponse>,
    sort_by: &str,
    sort_order: SortOrder,
  ) -> Vec<PersonResponse> {
    sort_persons(persons, sort_by, sort_order)
  }
}
