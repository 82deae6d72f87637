//! `catfacts` — ingestion job and query server for the cat facts store.
//!
//! # Usage
//!
//! ```text
//! catfacts serve                 # serve /facts over HTTP
//! catfacts import --count 10     # pull 10 new unique facts from the source
//! catfacts --config prod.toml import
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use catfacts_core::{import::ImportController, store::FactStore};
use catfacts_provider::HttpFactProvider;
use catfacts_store_sqlite::SqliteStore;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{Settings, StoreLocation};

#[derive(Parser)]
#[command(author, version, about = "Cat facts ingestion and query server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "catfacts.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API.
  Serve,
  /// Fetch new facts from the external source into the store.
  Import {
    /// Number of new unique facts to collect (overrides `import.target`).
    #[arg(short = 'n', long)]
    count: Option<u32>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let store = open_store(&settings).await?;

  match cli.command {
    Command::Serve => serve(&settings, store).await,
    Command::Import { count } => import(&settings, &store, count).await,
  }
}

async fn open_store(settings: &Settings) -> anyhow::Result<SqliteStore> {
  let store = match settings.store_location()? {
    StoreLocation::Memory => SqliteStore::open_in_memory()
      .await
      .context("failed to open in-memory store")?,
    StoreLocation::File(path) => SqliteStore::open(&path)
      .await
      .with_context(|| format!("failed to open store at {path:?}"))?,
  };
  Ok(store)
}

fn app(store: SqliteStore) -> Router {
  catfacts_api::api_router(Arc::new(store))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

async fn serve(settings: &Settings, store: SqliteStore) -> anyhow::Result<()> {
  let address = settings.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(store)).await.context("server error")?;

  Ok(())
}

async fn import(
  settings: &Settings,
  store: &SqliteStore,
  count: Option<u32>,
) -> anyhow::Result<()> {
  let import_settings = settings.import.to_settings(count)?;
  let provider = HttpFactProvider::new(&settings.import.source_url)?;

  tracing::info!(
    source = %provider.url(),
    target = import_settings.target,
    max_attempts = import_settings.max_attempts(),
    "starting import"
  );

  let report = ImportController::new(store, &provider, import_settings)
    .run()
    .await
    .context("import aborted")?;

  let total = store.count().await?;
  tracing::info!(total, "store now holds {total} facts");
  println!("{}", serde_json::to_string_pretty(&report)?);

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::{collections::VecDeque, sync::Mutex, time::Duration};

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use catfacts_core::{
    import::ImportSettings,
    provider::{FactProvider, FetchError, RetryPolicy},
  };
  use tower::ServiceExt;

  use super::*;

  #[test]
  fn cli_parses_import_count() {
    let cli = Cli::try_parse_from(["catfacts", "import", "-n", "7"]).unwrap();
    assert!(matches!(cli.command, Command::Import { count: Some(7) }));
    assert_eq!(cli.config, PathBuf::from("catfacts.toml"));
  }

  #[test]
  fn cli_requires_a_subcommand() {
    assert!(Cli::try_parse_from(["catfacts"]).is_err());
  }

  #[tokio::test]
  async fn app_allows_cross_origin_reads() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .uri("/facts")
      .header(header::ORIGIN, "http://localhost:3000")
      .body(Body::empty())
      .unwrap();

    let resp = app(store).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
  }

  #[tokio::test]
  async fn memory_database_url_opens_empty_store() {
    let mut settings = Settings::load(std::path::Path::new("does-not-exist.toml")).unwrap();
    settings.database_url = ":memory:".into();

    let store = open_store(&settings).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
  }

  /// Hands out a fixed sequence of candidates, then reports a missing fact.
  struct Replay(Mutex<VecDeque<&'static str>>);

  impl Replay {
    fn new(candidates: &[&'static str]) -> Self {
      Self(Mutex::new(candidates.iter().copied().collect()))
    }
  }

  impl FactProvider for Replay {
    async fn fetch_once(&self) -> Result<String, FetchError> {
      self.0.lock().unwrap().pop_front().map(str::to_owned).ok_or(FetchError::MissingFact)
    }
  }

  fn import_settings(target: u32) -> ImportSettings {
    ImportSettings {
      target,
      retry: RetryPolicy::new(Duration::from_secs(5), 1, Duration::ZERO).unwrap(),
    }
  }

  #[tokio::test]
  async fn import_into_sqlite_skips_stored_duplicates() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.insert("Cats are mammals.").await.unwrap();
    let provider = Replay::new(&[
      "Cats are mammals.",
      "meow",
      "Cats have five toes on their front paws.",
      "  Cats are mammals.  ",
      "Cats can jump six times their length.",
      "Cats can jump six times their length.",
    ]);

    let report = ImportController::new(&store, &provider, import_settings(3))
      .run()
      .await
      .unwrap();

    assert_eq!(report.attempts, 6);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.duplicates, 3);
    assert_eq!(report.invalid, 1);
    assert!(!report.is_complete());
    assert_eq!(store.count().await.unwrap(), 3);
  }

  #[tokio::test]
  async fn import_into_sqlite_reaches_target_past_duplicates() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.insert("Cats are mammals.").await.unwrap();
    let provider = Replay::new(&[
      "Cats are mammals.",
      "Cats have five toes on their front paws.",
      "Cats are mammals.",
      "Cats can jump six times their length.",
    ]);

    let report = ImportController::new(&store, &provider, import_settings(2))
      .run()
      .await
      .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.attempts, 4);
    assert_eq!(report.duplicates, 2);

    let texts: Vec<String> =
      store.list().await.unwrap().into_iter().map(|f| f.text.into_inner()).collect();
    assert_eq!(texts, [
      "Cats are mammals.",
      "Cats have five toes on their front paws.",
      "Cats can jump six times their length.",
    ]);
  }
}
