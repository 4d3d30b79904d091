//! `gloss` — sync a Readwise highlight archive into local SQLite.
//!
//! Reads `config.toml` (or the path given with `--config`), runs one sync
//! pass followed by tag propagation, then exports the denormalized archive
//! to CSV.
//!
//! The API token comes from the config file's `api_token` key or the
//! `GLOSS_API_TOKEN` environment variable; without one the process exits
//! before any work is attempted.

mod export;

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use chrono::Utc;
use clap::Parser;
use gloss_core::store::HighlightStore as _;
use gloss_readwise::{ApiConfig, DEFAULT_BASE_URL, ReadwiseClient, pace::Throttle};
use gloss_store_sqlite::SqliteStore;
use gloss_sync::{Syncer, TagMapping};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Readwise highlight archive sync")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Deserialized from the config file layered with `GLOSS_*` environment
/// variables.
#[derive(Debug, Clone, Deserialize)]
struct Settings {
  /// Sent verbatim as the `Authorization` header. Required.
  api_token: String,

  #[serde(default = "default_base_url")]
  base_url: String,

  /// SQLite file holding the archive.
  #[serde(default = "default_database")]
  database: PathBuf,

  /// Optional TSV of `primary_tag`/`associated_tag` pairs.
  #[serde(default)]
  tag_mapping: Option<PathBuf>,

  /// CSV written after each successful pass.
  #[serde(default = "default_export")]
  export: PathBuf,

  /// Seconds to wait between per-item highlight pages.
  #[serde(default = "default_page_delay_secs")]
  page_delay_secs: u64,
}

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_owned()
}

fn default_database() -> PathBuf {
  PathBuf::from("highlights.sqlite3")
}

fn default_export() -> PathBuf {
  PathBuf::from("highlights_export.csv")
}

fn default_page_delay_secs() -> u64 {
  10
}

// ─── Entry point ──────────────────────────────────────────────────────────────

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

  // Load configuration. Missing token is fatal before any work starts.
  let settings: Settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GLOSS"))
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context(
      "invalid configuration: api_token is required (config file key \
       `api_token` or environment variable GLOSS_API_TOKEN)",
    )?;

  let database = expand_tilde(&settings.database);
  let store = SqliteStore::open(&database)
    .await
    .with_context(|| format!("failed to open archive at {database:?}"))?;

  let client = ReadwiseClient::with_pacer(
    ApiConfig {
      base_url: settings.base_url.clone(),
      token:    settings.api_token.clone(),
    },
    Throttle::new(Duration::from_secs(settings.page_delay_secs)),
  )
  .context("failed to build API client")?;

  let mapping = match &settings.tag_mapping {
    Some(path) => TagMapping::from_tsv(path)
      .with_context(|| format!("loading tag mapping {}", path.display()))?,
    None => TagMapping::default(),
  };

  let report = Syncer::new(&client, &store).run(Utc::now(), &mapping).await?;
  tracing::info!(
    refreshed = report.refreshed_highlights,
    items = report.updated_items,
    new = report.new_highlights,
    propagated = report.propagation.appended,
    "sync complete"
  );

  // Snapshot the archive after every successful pass.
  let rows = store.export_rows().await?;
  let export_path = expand_tilde(&settings.export);
  export::write_csv(&rows, &export_path)?;
  tracing::info!(
    items = store.item_ids().await?.len(),
    rows = rows.len(),
    path = %export_path.display(),
    "exported archive"
  );

  Ok(())
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
