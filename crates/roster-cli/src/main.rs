//! roster command-line front-end.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite store, and performs one operation per invocation. All record
//! semantics live in `roster-service`; this binary only parses arguments
//! and prints JSON.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roster_core::{
  country::CountryAddRequest,
  person::{Gender, PersonAddRequest, PersonUpdateRequest},
  query::SortOrder,
};
use roster_service::{CountriesService, PersonsService};
use roster_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct Config {
  /// Path of the SQLite database file.
  store_path: String,
}

#[derive(Parser)]
#[command(author, version, about = "Roster record manager")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum GenderArg {
  Male,
  Female,
  Other,
}

impl From<GenderArg> for Gender {
  fn from(g: GenderArg) -> Self {
    match g {
      GenderArg::Male => Gender::Male,
      GenderArg::Female => Gender::Female,
      GenderArg::Other => Gender::Other,
    }
  }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SortOrderArg {
  Asc,
  Desc,
}

impl From<SortOrderArg> for SortOrder {
  fn from(o: SortOrderArg) -> Self {
    match o {
      SortOrderArg::Asc => SortOrder::Asc,
      SortOrderArg::Desc => SortOrder::Desc,
    }
  }
}

#[derive(Subcommand)]
enum Command {
  /// List persons, optionally filtered and sorted.
  List {
    /// Field key to search, e.g. "Name" or "Country".
    #[arg(long)]
    search_by: Option<String>,
    /// Substring to search for.
    #[arg(long)]
    search: Option<String>,
    /// Field key to sort by.
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long, value_enum, default_value_t = SortOrderArg::Asc)]
    order: SortOrderArg,
  },
  /// Show one person by id.
  Show { id: Uuid },
  /// Add a person.
  Add {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: Option<String>,
    /// ISO 8601 calendar date, e.g. 1990-06-15.
    #[arg(long)]
    birth_date: Option<NaiveDate>,
    #[arg(long, value_enum)]
    gender: Option<GenderArg>,
    #[arg(long)]
    country_id: Uuid,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    newsletter: bool,
  },
  /// Update a person, replacing every mutable field with what is given
  /// here. An omitted option clears the stored value.
  Update {
    id: Uuid,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    birth_date: Option<NaiveDate>,
    #[arg(long, value_enum)]
    gender: Option<GenderArg>,
    #[arg(long)]
    country_id: Uuid,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    newsletter: bool,
  },
  /// Delete a person by id.
  Delete { id: Uuid },
  /// List countries.
  Countries,
  /// Add a country.
  AddCountry { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration: optional file, then ROSTER_-prefixed environment.
  let settings = config::Config::builder()
    .set_default("store_path", "roster.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read config")?;
  let cfg: Config = settings
    .try_deserialize()
    .context("failed to deserialise Config")?;

  let store = Arc::new(SqliteStore::open(&cfg.store_path).await?);
  tracing::debug!(path = %cfg.store_path, "opened store");

  let persons = PersonsService::new(store.clone());
  let countries = CountriesService::new(store);

  match cli.command {
    Command::List {
      search_by,
      search,
      sort_by,
      order,
    } => {
      let list = persons
        .get_filtered_persons(
          search_by.as_deref().unwrap_or(""),
          search.as_deref(),
        )
        .await?;
      let list = persons.get_sorted_persons(
        list,
        sort_by.as_deref().unwrap_or(""),
        order.into(),
      );
      println!("{}", serde_json::to_string_pretty(&list)?);
    }

    Command::Show { id } => {
      match persons.get_person_by_id(Some(id)).await? {
        Some(person) => {
          println!("{}", serde_json::to_string_pretty(&person)?)
        }
        None => println!("not found"),
      }
    }

    Command::Add {
      name,
      email,
      birth_date,
      gender,
      country_id,
      address,
      newsletter,
    } => {
      let added = persons
        .add_person(Some(PersonAddRequest {
          name: Some(name),
          email,
          birth_date,
          gender: gender.map(Into::into),
          country_id,
          address,
          receives_newsletter: newsletter,
        }))
        .await?;
      println!("{}", serde_json::to_string_pretty(&added)?);
    }

    Command::Update {
      id,
      name,
      email,
      birth_date,
      gender,
      country_id,
      address,
      newsletter,
    } => {
      let updated = persons
        .update_person(Some(PersonUpdateRequest {
          person_id: id,
          name: Some(name),
          email,
          birth_date,
          gender: gender.map(Into::into),
          country_id,
          address,
          receives_newsletter: newsletter,
        }))
        .await?;
      println!("{}", serde_json::to_string_pretty(&updated)?);
    }

    Command::Delete { id } => {
      let deleted = persons.delete_person(Some(id)).await?;
      println!("{}", if deleted { "deleted" } else { "not found" });
    }

    Command::Countries => {
      let list = countries.get_all_countries().await?;
      println!("{}", serde_json::to_string_pretty(&list)?);
    }

    Command::AddCountry { name } => {
      let added = countries
        .add_country(Some(CountryAddRequest { name: Some(name) }))
        .await?;
      println!("{}", serde_json::to_string_pretty(&added)?);
    }
  }

  Ok(())
}
