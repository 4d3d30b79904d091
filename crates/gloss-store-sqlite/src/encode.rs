//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Entity timestamps (`updated`, `highlighted_at`) are stored as RFC 3339
//! strings; the sync-log watermark uses the wire form from
//! [`gloss_core::watermark`]. Tag strings are already canonical text and
//! pass through untouched.

use chrono::{DateTime, Utc};
use gloss_core::{Category, Highlight, Item, store::ExportRow};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `items` row.
pub struct RawItem {
  pub id:         i64,
  pub category:   String,
  pub title:      String,
  pub author:     Option<String>,
  pub cover_url:  Option<String>,
  pub page_url:   Option<String>,
  pub source_url: Option<String>,
  pub tags:       String,
}

impl RawItem {
  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      id:         self.id,
      category:   Category::parse(&self.category)?,
      title:      self.title,
      author:     self.author,
      cover_url:  self.cover_url,
      page_url:   self.page_url,
      source_url: self.source_url,
      tags:       self.tags,
    })
  }
}

/// Raw strings read directly from a `highlights` row.
pub struct RawHighlight {
  pub id:             i64,
  pub text:           String,
  pub note:           String,
  pub location:       Option<i64>,
  pub location_type:  Option<String>,
  pub updated:        Option<String>,
  pub highlighted_at: Option<String>,
  pub url:            Option<String>,
  pub color:          Option<String>,
  pub item_id:        Option<i64>,
  pub tags:           String,
}

impl RawHighlight {
  pub fn into_highlight(self) -> Result<Highlight> {
    Ok(Highlight {
      id:             self.id,
      text:           self.text,
      note:           self.note,
      location:       self.location,
      location_type:  self.location_type,
      updated:        decode_opt_dt(self.updated)?,
      highlighted_at: decode_opt_dt(self.highlighted_at)?,
      url:            self.url,
      color:          self.color,
      item_id:        self.item_id,
      tags:           self.tags,
    })
  }
}

/// Raw strings read from the highlights/items export join. The item side is
/// all-optional: a highlight may reference an item that was never synced.
pub struct RawExportRow {
  pub highlight:  RawHighlight,
  pub category:   Option<String>,
  pub title:      Option<String>,
  pub author:     Option<String>,
  pub cover_url:  Option<String>,
  pub page_url:   Option<String>,
  pub source_url: Option<String>,
  pub item_tags:  Option<String>,
}

impl RawExportRow {
  pub fn into_export_row(self) -> Result<ExportRow> {
    let highlight = self.highlight.into_highlight()?;
    let category =
      self.category.as_deref().map(Category::parse).transpose()?;

    Ok(ExportRow {
      highlight_id: highlight.id,
      text: highlight.text,
      note: highlight.note,
      location: highlight.location,
      location_type: highlight.location_type,
      updated: highlight.updated,
      highlighted_at: highlight.highlighted_at,
      url: highlight.url,
      color: highlight.color,
      item_id: highlight.item_id,
      highlight_tags: highlight.tags,
      category,
      title: self.title,
      author: self.author,
      cover_url: self.cover_url,
      page_url: self.page_url,
      source_url: self.source_url,
      item_tags: self.item_tags,
    })
  }
}
