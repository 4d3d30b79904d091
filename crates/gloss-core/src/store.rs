//! The `HighlightStore` trait and supporting row types.
//!
//! The trait is implemented by storage backends (e.g. `gloss-store-sqlite`).
//! Higher layers (`gloss-sync`, `gloss-cli`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Highlight, Item, item::Category};

// ─── Row types ───────────────────────────────────────────────────────────────

/// A highlight id paired with its stored note, as returned by
/// [`HighlightStore::marker_notes`].
#[derive(Debug, Clone)]
pub struct MarkerNote {
  pub highlight_id: i64,
  pub note:         String,
}

/// One row of the denormalized export: a highlight left-joined with its
/// owning item. The item side is absent when the highlight's `item_id`
/// matches no stored item.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
  pub highlight_id:   i64,
  pub text:           String,
  pub note:           String,
  pub location:       Option<i64>,
  pub location_type:  Option<String>,
  pub updated:        Option<DateTime<Utc>>,
  pub highlighted_at: Option<DateTime<Utc>>,
  pub url:            Option<String>,
  pub color:          Option<String>,
  pub item_id:        Option<i64>,
  pub highlight_tags: String,
  pub category:       Option<Category>,
  pub title:          Option<String>,
  pub author:         Option<String>,
  pub cover_url:      Option<String>,
  pub page_url:       Option<String>,
  pub source_url:     Option<String>,
  pub item_tags:      Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the local highlight archive.
///
/// Writes are insert-or-replace keyed on the remote id: applying the same
/// payload twice leaves the store unchanged, which is what makes an aborted
/// sync pass safe to repeat. The sync log is append-only; the current
/// watermark is the most recently inserted row, never a comparison of
/// timestamp values.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded async runtime.
pub trait HighlightStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Upserts ───────────────────────────────────────────────────────────

  /// Insert `item`, or overwrite every column of the existing row with the
  /// same id.
  fn upsert_item(
    &self,
    item: Item,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert `highlight`, or overwrite every column of the existing row
  /// with the same id.
  fn upsert_highlight(
    &self,
    highlight: Highlight,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Sync log ──────────────────────────────────────────────────────────

  /// The watermark of the last completed sync, or
  /// [`watermark::epoch`](crate::watermark::epoch) if none has run.
  fn last_sync(
    &self,
  ) -> impl Future<Output = Result<DateTime<Utc>, Self::Error>> + Send + '_;

  /// Append `at` to the sync log. Never overwrites prior rows.
  fn record_sync(
    &self,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve an item by remote id. Returns `None` if not stored.
  fn item(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// Retrieve a highlight by remote id. Returns `None` if not stored.
  fn highlight(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Highlight>, Self::Error>> + Send + '_;

  /// Distinct ids of every stored item.
  fn item_ids(
    &self,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + '_;

  /// Highlights whose note contains the marker character anywhere.
  ///
  /// A coarse prefilter for the tag propagation pass, which re-tokenizes
  /// each note and skips those with no marker-prefixed token.
  fn marker_notes(
    &self,
    marker: char,
  ) -> impl Future<Output = Result<Vec<MarkerNote>, Self::Error>> + Send + '_;

  /// All highlights left-joined with their items, for the CSV export.
  fn export_rows(
    &self,
  ) -> impl Future<Output = Result<Vec<ExportRow>, Self::Error>> + Send + '_;
}
