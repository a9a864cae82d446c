//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`] and
//! [`CountryStore`].

use std::path::Path;

use roster_core::{
  country::Country,
  person::Person,
  query::PersonField,
  store::{CountryStore, PersonStore},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    RawCountry, RawPerson, encode_date, encode_dt, encode_uuid, generate_tin,
  },
  schema::SCHEMA,
};

const PERSON_COLUMNS: &str = "person_id, name, email, birth_date, gender, \
                              country_id, address, receives_newsletter, tin, \
                              created_at";

/// Deterministic listing order: insertion time, identifier as tiebreak.
const PERSON_ORDER: &str = "ORDER BY created_at, person_id";

fn person_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    person_id:           row.get(0)?,
    name:                row.get(1)?,
    email:               row.get(2)?,
    birth_date:          row.get(3)?,
    gender:              row.get(4)?,
    country_id:          row.get(5)?,
    address:             row.get(6)?,
    receives_newsletter: row.get(7)?,
    tin:                 row.get(8)?,
    created_at:          row.get(9)?,
  })
}

fn country_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCountry> {
  Ok(RawCountry {
    country_id: row.get(0)?,
    name:       row.get(1)?,
    created_at: row.get(2)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query_persons(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), person_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn insert_person(&self, mut person: Person) -> Result<Person> {
    // The TIN column is storage-owned: filled here when absent, unique by
    // constraint.
    if person.tin.is_none() {
      person.tin = Some(generate_tin());
    }

    let id_str         = encode_uuid(person.person_id);
    let name           = person.name.clone();
    let email          = person.email.clone();
    let birth_date_str = person.birth_date.map(encode_date);
    let gender         = person.gender.clone();
    let country_id_str = encode_uuid(person.country_id);
    let address        = person.address.clone();
    let newsletter     = person.receives_newsletter;
    let tin            = person.tin.clone();
    let created_at_str = encode_dt(person.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, name, email, birth_date, gender,
             country_id, address, receives_newsletter, tin, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            name,
            email,
            birth_date_str,
            gender,
            country_id_str,
            address,
            newsletter,
            tin,
            created_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PERSON_COLUMNS} FROM persons WHERE person_id = ?1"
              ),
              rusqlite::params![id_str],
              person_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_persons(&self) -> Result<Vec<Person>> {
    self
      .query_persons(
        format!("SELECT {PERSON_COLUMNS} FROM persons {PERSON_ORDER}"),
        Vec::new(),
      )
      .await
  }

  async fn find_persons(
    &self,
    field: PersonField,
    text: &str,
  ) -> Result<Vec<Person>> {
    // Only the plain text columns can be matched here. Birth dates are
    // searched against a rendered form and countries against a display name
    // from another table; the query engine handles those over the full
    // list. LIKE metacharacters in `text` can only widen this match, and
    // the engine's exact pass narrows it again.
    let column = match field {
      PersonField::Name => "name",
      PersonField::Email => "email",
      PersonField::Gender => "gender",
      PersonField::Address => "address",
      _ => return self.list_persons().await,
    };

    let sql = format!(
      "SELECT {PERSON_COLUMNS} FROM persons
       WHERE {column} IS NULL OR lower({column}) LIKE ?1
       {PERSON_ORDER}"
    );
    let pattern = format!("%{}%", text.to_lowercase());
    self.query_persons(sql, vec![pattern]).await
  }

  async fn update_person(&self, person: Person) -> Result<Person> {
    let id_str         = encode_uuid(person.person_id);
    let name           = person.name.clone();
    let email          = person.email.clone();
    let birth_date_str = person.birth_date.map(encode_date);
    let gender         = person.gender.clone();
    let country_id_str = encode_uuid(person.country_id);
    let address        = person.address.clone();
    let newsletter     = person.receives_newsletter;

    let affected = self
      .conn
      .call(move |conn| {
        // tin and created_at are immutable once written.
        let affected = conn.execute(
          "UPDATE persons SET
             name = ?2, email = ?3, birth_date = ?4, gender = ?5,
             country_id = ?6, address = ?7, receives_newsletter = ?8
           WHERE person_id = ?1",
          rusqlite::params![
            id_str,
            name,
            email,
            birth_date_str,
            gender,
            country_id_str,
            address,
            newsletter,
          ],
        )?;
        Ok(affected)
      })
      .await?;

    if affected == 0 {
      return Err(Error::PersonNotFound(person.person_id));
    }
    Ok(person)
  }

  async fn delete_person(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE person_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }
}

// ─── CountryStore impl ───────────────────────────────────────────────────────

impl CountryStore for SqliteStore {
  type Error = Error;

  async fn insert_country(&self, country: Country) -> Result<Country> {
    let id_str         = encode_uuid(country.country_id);
    let name           = country.name.clone();
    let created_at_str = encode_dt(country.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (country_id, name, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, created_at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(country)
  }

  async fn get_country(&self, id: Uuid) -> Result<Option<Country>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, name, created_at FROM countries
               WHERE country_id = ?1",
              rusqlite::params![id_str],
              country_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn get_country_by_name(&self, name: &str) -> Result<Option<Country>> {
    let name = name.to_owned();

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        // `=` on TEXT is case-sensitive, which the duplicate check relies
        // on.
        Ok(
          conn
            .query_row(
              "SELECT country_id, name, created_at FROM countries
               WHERE name = ?1",
              rusqlite::params![name],
              country_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT country_id, name, created_at FROM countries
           ORDER BY created_at, country_id",
        )?;
        let rows = stmt
          .query_map([], country_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }
}
