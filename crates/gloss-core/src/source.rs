//! The `HighlightSource` trait — the remote service as the sync pass sees it.
//!
//! Implemented by `gloss-readwise` over HTTP; tests substitute in-memory
//! stubs. Pagination, authentication and rate limiting are implementation
//! details behind this seam.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{Highlight, Item, item::Category};

/// Read/write access to the remote highlight service.
///
/// The `since` parameter on the fetch methods is the current watermark; the
/// remote filters to entities updated strictly after it.
pub trait HighlightSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Highlights updated after `since` but highlighted before it — that is,
  /// existing highlights that were modified, not newly created ones.
  fn updated_highlights(
    &self,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Highlight>, Self::Error>> + Send + '_;

  /// Items in `category` that are new or modified since `since`.
  fn items_in_category(
    &self,
    category: Category,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// All highlights belonging to `item_id` updated after `since`.
  fn item_highlights(
    &self,
    item_id: i64,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Highlight>, Self::Error>> + Send + '_;

  /// The current note text of a single highlight.
  fn highlight_note(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Replace a highlight's note. Only the note field is written.
  fn set_highlight_note(
    &self,
    id: i64,
    note: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
