//! Service tests against an in-memory SQLite store.

use std::sync::Arc;

use chrono::NaiveDate;
use roster_core::{
  country::CountryAddRequest,
  person::{Gender, PersonAddRequest, PersonUpdateRequest},
  query::SortOrder,
};
use roster_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{CountriesService, Error, PersonsService};

async fn services(
) -> (PersonsService<SqliteStore>, CountriesService<SqliteStore>) {
  let store = Arc::new(
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store"),
  );
  (
    PersonsService::new(store.clone()),
    CountriesService::new(store),
  )
}

fn add_request(name: &str) -> PersonAddRequest {
  PersonAddRequest {
    name: Some(name.into()),
    email: Some(format!("{}@example.com", name.to_lowercase())),
    birth_date: NaiveDate::from_ymd_opt(1994, 1, 2),
    gender: Some(Gender::Other),
    country_id: Uuid::new_v4(),
    address: Some("1 Main St".into()),
    receives_newsletter: true,
  }
}

// ─── Add ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_person_assigns_id_and_roundtrips() {
  let (persons, _) = services().await;
  let added = persons
    .add_person(Some(add_request("Alice")))
    .await
    .unwrap();

  assert_ne!(added.person_id, Uuid::nil());
  assert_eq!(added.name.as_deref(), Some("Alice"));
  assert_eq!(added.gender.as_deref(), Some("Other"));
  assert!(added.age.is_some());

  let fetched = persons
    .get_person_by_id(Some(added.person_id))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched, added);
}

#[tokio::test]
async fn add_person_null_request_errors() {
  let (persons, _) = services().await;
  let result = persons.add_person(None).await;
  assert!(matches!(result, Err(Error::MissingArgument(_))));
}

#[tokio::test]
async fn add_person_invalid_request_fails_validation_and_stores_nothing() {
  let (persons, _) = services().await;

  let mut no_name = add_request("Alice");
  no_name.name = None;
  assert!(matches!(
    persons.add_person(Some(no_name)).await,
    Err(Error::Validation(_))
  ));

  let mut bad_email = add_request("Alice");
  bad_email.email = Some("not-an-email".into());
  assert!(matches!(
    persons.add_person(Some(bad_email)).await,
    Err(Error::Validation(_))
  ));

  // A failed validation never reaches the store.
  assert!(persons.get_all_persons().await.unwrap().is_empty());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_person_null_request_errors() {
  let (persons, _) = services().await;
  let result = persons.update_person(None).await;
  assert!(matches!(result, Err(Error::MissingArgument(_))));
}

#[tokio::test]
async fn update_person_unknown_id_errors() {
  let (persons, _) = services().await;
  let ghost_id = Uuid::new_v4();
  let request = PersonUpdateRequest {
    person_id:           ghost_id,
    name:                Some("Ghost".into()),
    email:               None,
    birth_date:          None,
    gender:              None,
    country_id:          Uuid::new_v4(),
    address:             None,
    receives_newsletter: false,
  };
  let result = persons.update_person(Some(request)).await;
  assert!(
    matches!(result, Err(Error::PersonNotFound(id)) if id == ghost_id)
  );
}

#[tokio::test]
async fn update_person_replaces_every_mutable_field() {
  let (persons, _) = services().await;
  let added = persons
    .add_person(Some(add_request("Alice")))
    .await
    .unwrap();

  // Omitting the address in the request clears it: full replace, not a
  // sparse patch.
  let request = PersonUpdateRequest {
    person_id:           added.person_id,
    name:                Some("Alicia".into()),
    email:               Some("alicia@example.com".into()),
    birth_date:          None,
    gender:              Some(Gender::Female),
    country_id:          added.country_id,
    address:             None,
    receives_newsletter: false,
  };
  let updated = persons.update_person(Some(request)).await.unwrap();

  assert_eq!(updated.person_id, added.person_id);
  assert_eq!(updated.name.as_deref(), Some("Alicia"));
  assert_eq!(updated.address, None);
  assert_eq!(updated.birth_date, None);
  assert_eq!(updated.age, None);
  assert!(!updated.receives_newsletter);

  let fetched = persons
    .get_person_by_id(Some(added.person_id))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched, updated);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_person_null_id_errors() {
  let (persons, _) = services().await;
  assert!(matches!(
    persons.delete_person(None).await,
    Err(Error::MissingArgument(_))
  ));
}

#[tokio::test]
async fn delete_person_semantics() {
  let (persons, _) = services().await;
  let added = persons
    .add_person(Some(add_request("Alice")))
    .await
    .unwrap();

  // Unknown id: false, not an error.
  assert!(!persons.delete_person(Some(Uuid::new_v4())).await.unwrap());
  // Existing id: true, then gone.
  assert!(persons.delete_person(Some(added.person_id)).await.unwrap());
  assert!(
    persons
      .get_person_by_id(Some(added.person_id))
      .await
      .unwrap()
      .is_none()
  );
}

// ─── Point lookup ────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_person_by_id_none_and_unknown_are_not_errors() {
  let (persons, _) = services().await;
  assert!(persons.get_person_by_id(None).await.unwrap().is_none());
  assert!(
    persons
      .get_person_by_id(Some(Uuid::new_v4()))
      .await
      .unwrap()
      .is_none()
  );
}

// ─── Listing / filtering / sorting ───────────────────────────────────────────

#[tokio::test]
async fn get_all_persons_is_order_stable() {
  let (persons, _) = services().await;
  for name in ["Alice", "Bob", "Carol"] {
    persons.add_person(Some(add_request(name))).await.unwrap();
  }

  let first = persons.get_all_persons().await.unwrap();
  let second = persons.get_all_persons().await.unwrap();
  assert_eq!(first.len(), 3);
  assert_eq!(first, second);
}

#[tokio::test]
async fn get_filtered_empty_search_returns_everything() {
  let (persons, _) = services().await;
  for name in ["Glaybson", "Buula"] {
    persons.add_person(Some(add_request(name))).await.unwrap();
  }

  let all = persons.get_filtered_persons("Name", Some("")).await.unwrap();
  assert_eq!(all.len(), 2);
  let all = persons.get_filtered_persons("Name", None).await.unwrap();
  assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn get_filtered_matches_case_insensitively() {
  let (persons, _) = services().await;
  for name in ["Glaybson", "Buula"] {
    persons.add_person(Some(add_request(name))).await.unwrap();
  }

  let hits = persons
    .get_filtered_persons("Name", Some("gl"))
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name.as_deref(), Some("Glaybson"));
}

#[tokio::test]
async fn get_filtered_by_country_display_name() {
  let (persons, countries) = services().await;
  let brazil = countries
    .add_country(Some(CountryAddRequest {
      name: Some("Brazil".into()),
    }))
    .await
    .unwrap();

  let mut in_brazil = add_request("Alice");
  in_brazil.country_id = brazil.country_id;
  persons.add_person(Some(in_brazil)).await.unwrap();
  persons.add_person(Some(add_request("Bob"))).await.unwrap();

  let hits = persons
    .get_filtered_persons("Country", Some("braz"))
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn get_filtered_unknown_key_returns_everything() {
  let (persons, _) = services().await;
  for name in ["Glaybson", "Buula"] {
    persons.add_person(Some(add_request(name))).await.unwrap();
  }

  let all = persons
    .get_filtered_persons("Shoe Size", Some("zz"))
    .await
    .unwrap();
  assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn get_sorted_orders_and_no_ops_like_the_engine() {
  let (persons, _) = services().await;
  for name in ["Buula", "Glaybson"] {
    persons.add_person(Some(add_request(name))).await.unwrap();
  }
  let all = persons.get_all_persons().await.unwrap();

  let desc =
    persons.get_sorted_persons(all.clone(), "Name", SortOrder::Desc);
  let names: Vec<_> = desc.iter().map(|p| p.name.as_deref()).collect();
  assert_eq!(names, vec![Some("Glaybson"), Some("Buula")]);

  let asc = persons.get_sorted_persons(desc, "Name", SortOrder::Asc);
  let names: Vec<_> = asc.iter().map(|p| p.name.as_deref()).collect();
  assert_eq!(names, vec![Some("Buula"), Some("Glaybson")]);

  let untouched =
    persons.get_sorted_persons(all.clone(), "", SortOrder::Asc);
  assert_eq!(untouched, all);
  let untouched =
    persons.get_sorted_persons(all.clone(), "UnknownField", SortOrder::Asc);
  assert_eq!(untouched, all);
}

// ─── Enrichment ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn responses_carry_current_country_names() {
  let (persons, countries) = services().await;
  let brazil = countries
    .add_country(Some(CountryAddRequest {
      name: Some("Brazil".into()),
    }))
    .await
    .unwrap();

  let mut matched = add_request("Alice");
  matched.country_id = brazil.country_id;
  let matched = persons.add_person(Some(matched)).await.unwrap();
  assert_eq!(matched.country.as_deref(), Some("Brazil"));

  // An orphaned reference surfaces as a missing name, never an error.
  let orphan = persons.add_person(Some(add_request("Bob"))).await.unwrap();
  assert_eq!(orphan.country, None);

  let all = persons.get_all_persons().await.unwrap();
  let alice = all.iter().find(|p| p.name.as_deref() == Some("Alice"));
  assert_eq!(alice.unwrap().country.as_deref(), Some("Brazil"));
}

// ─── Countries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_country_null_request_and_null_name_error() {
  let (_, countries) = services().await;
  assert!(matches!(
    countries.add_country(None).await,
    Err(Error::MissingArgument(_))
  ));
  assert!(matches!(
    countries
      .add_country(Some(CountryAddRequest { name: None }))
      .await,
    Err(Error::MissingArgument(_))
  ));
}

#[tokio::test]
async fn add_country_rejects_duplicate_names() {
  let (_, countries) = services().await;
  let request = CountryAddRequest {
    name: Some("USA".into()),
  };
  countries.add_country(Some(request.clone())).await.unwrap();

  let result = countries.add_country(Some(request)).await;
  assert!(
    matches!(result, Err(Error::DuplicateCountryName(name)) if name == "USA")
  );
}

#[tokio::test]
async fn get_country_by_id_none_and_unknown_are_not_errors() {
  let (_, countries) = services().await;
  assert!(countries.get_country_by_id(None).await.unwrap().is_none());
  assert!(
    countries
      .get_country_by_id(Some(Uuid::new_v4()))
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn get_all_countries_lists_what_was_added() {
  let (_, countries) = services().await;
  for name in ["Brazil", "Chile"] {
    countries
      .add_country(Some(CountryAddRequest {
        name: Some(name.into()),
      }))
      .await
      .unwrap();
  }

  let all = countries.get_all_countries().await.unwrap();
  assert_eq!(all.len(), 2);
  let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
  assert!(names.contains(&"Brazil") && names.contains(&"Chile"));
}
