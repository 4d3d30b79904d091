//! Wire payload types — the remote API's JSON field names are an external
//! contract, kept verbatim here and mapped onto domain types at the edge.

use chrono::{DateTime, Utc};
use gloss_core::{Category, Highlight, Item, tags::canonical_tag_string};
use serde::Deserialize;

/// Envelope of every list endpoint: total result count plus one page of
/// results in server-defined order.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
  pub count:   u64,
  pub results: Vec<T>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TagPayload {
  pub id: i64,
}

/// An item as the list-items endpoint returns it.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
  pub id:              i64,
  #[serde(default)]
  pub title:           Option<String>,
  #[serde(default)]
  pub author:          Option<String>,
  #[serde(default)]
  pub cover_image_url: Option<String>,
  #[serde(default)]
  pub highlights_url:  Option<String>,
  #[serde(default)]
  pub source_url:      Option<String>,
  #[serde(default)]
  pub tags:            Vec<TagPayload>,
}

impl ItemPayload {
  /// Convert to the domain type.
  ///
  /// `category` comes from the list query that produced this payload, not
  /// from the body, so an unexpected wire string can never reach storage.
  pub fn into_item(self, category: Category) -> Item {
    Item {
      id: self.id,
      category,
      title: self.title.unwrap_or_default(),
      author: self.author,
      cover_url: self.cover_image_url,
      page_url: self.highlights_url,
      source_url: self.source_url,
      tags: canonical_tag_string(self.tags.into_iter().map(|t| t.id)),
    }
  }
}

/// A highlight as the list-highlights and single-highlight endpoints return
/// it.
#[derive(Debug, Deserialize)]
pub struct HighlightPayload {
  pub id:             i64,
  #[serde(default)]
  pub text:           Option<String>,
  #[serde(default)]
  pub note:           Option<String>,
  #[serde(default)]
  pub location:       Option<i64>,
  #[serde(default)]
  pub location_type:  Option<String>,
  #[serde(default)]
  pub updated:        Option<DateTime<Utc>>,
  #[serde(default)]
  pub highlighted_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub url:            Option<String>,
  #[serde(default)]
  pub color:          Option<String>,
  #[serde(default)]
  pub book_id:        Option<i64>,
  #[serde(default)]
  pub tags:           Vec<TagPayload>,
}

impl HighlightPayload {
  pub fn into_highlight(self) -> Highlight {
    Highlight {
      id: self.id,
      text: self.text.unwrap_or_default(),
      note: self.note.unwrap_or_default(),
      location: self.location,
      location_type: self.location_type,
      updated: self.updated,
      highlighted_at: self.highlighted_at,
      url: self.url,
      color: self.color,
      item_id: self.book_id,
      tags: canonical_tag_string(self.tags.into_iter().map(|t| t.id)),
    }
  }
}
