//! Runtime configuration.
//!
//! Sources, lowest priority first: built-in defaults, the optional TOML file,
//! a bare `DATABASE_URL`, then `CATFACTS_*` environment variables (nested keys
//! use `__`, e.g. `CATFACTS_IMPORT__TARGET=10`).

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context as _, bail};
use catfacts_core::{import::ImportSettings, provider::RetryPolicy};
use catfacts_provider::DEFAULT_SOURCE_URL;
use config::{ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

// ─── Settings ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// `sqlite:` URL or plain path of the database file.
  pub database_url: String,
  pub host:         String,
  pub port:         u16,
  pub import:       ImportConfig,
}

/// Parameters of `catfacts import`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
  pub source_url:       String,
  /// Number of new unique facts to collect per run.
  pub target:           u32,
  /// Attempts per provider call.
  pub retries:          u32,
  pub retry_delay_secs: u64,
  pub timeout_secs:     u64,
}

impl Settings {
  /// Load settings from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::load_with(path, std::env::var("DATABASE_URL").ok())
  }

  /// `database_url` is the value of the unprefixed `DATABASE_URL` variable.
  /// It beats the file but loses to `CATFACTS_DATABASE_URL`.
  fn load_with(path: &Path, database_url: Option<String>) -> anyhow::Result<Self> {
    let bare: config::Map<String, String> =
      database_url.map(|url| ("DATABASE_URL".to_owned(), url)).into_iter().collect();

    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::default().source(Some(bare)))
        .add_source(
          config::Environment::with_prefix("CATFACTS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
        ),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .set_default("database_url", "sqlite:///./cat_facts.db")?
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8000)?
      .set_default("import.source_url", DEFAULT_SOURCE_URL)?
      .set_default("import.target", 5)?
      .set_default("import.retries", i64::from(RetryPolicy::DEFAULT_RETRIES))?
      .set_default("import.retry_delay_secs", 2)?
      .set_default("import.timeout_secs", 5)?
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_location(&self) -> anyhow::Result<StoreLocation> {
    StoreLocation::parse(&self.database_url)
  }
}

impl ImportConfig {
  /// Validated import settings; `count` overrides the configured target.
  pub fn to_settings(&self, count: Option<u32>) -> anyhow::Result<ImportSettings> {
    let retry = RetryPolicy::new(
      Duration::from_secs(self.timeout_secs),
      self.retries,
      Duration::from_secs(self.retry_delay_secs),
    )?;
    Ok(ImportSettings { target: count.unwrap_or(self.target), retry })
  }
}

// ─── Store location ──────────────────────────────────────────────────────────

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
  Memory,
  File(PathBuf),
}

impl StoreLocation {
  /// Accepts `sqlite:///relative.db`, `sqlite:////absolute.db`,
  /// `sqlite://file.db`, `sqlite:file.db`, `:memory:` or a plain path.
  pub fn parse(url: &str) -> anyhow::Result<Self> {
    let path = if let Some(rest) = url.strip_prefix("sqlite:///") {
      rest
    } else if let Some(rest) = url.strip_prefix("sqlite://") {
      rest
    } else if let Some(rest) = url.strip_prefix("sqlite:") {
      rest
    } else if let Some((scheme, _)) = url.split_once("://") {
      bail!("unsupported database url scheme {scheme:?}; only sqlite is available");
    } else {
      url
    };

    match path {
      "" | ":memory:" => Ok(Self::Memory),
      p => Ok(Self::File(expand_tilde(Path::new(p)))),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
