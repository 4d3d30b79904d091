//! [`SqliteStore`] — the SQLite implementation of
//! [`HighlightStore`](gloss_core::store::HighlightStore).

use std::path::Path;

use chrono::{DateTime, Utc};
use gloss_core::{
  Highlight, Item,
  store::{ExportRow, HighlightStore, MarkerNote},
  watermark,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawExportRow, RawHighlight, RawItem, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A highlight archive backed by a single SQLite file.
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
}

fn raw_highlight_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawHighlight> {
  Ok(RawHighlight {
    id:             row.get(0)?,
    text:           row.get(1)?,
    note:           row.get(2)?,
    location:       row.get(3)?,
    location_type:  row.get(4)?,
    updated:        row.get(5)?,
    highlighted_at: row.get(6)?,
    url:            row.get(7)?,
    color:          row.get(8)?,
    item_id:        row.get(9)?,
    tags:           row.get(10)?,
  })
}

// ─── HighlightStore impl ─────────────────────────────────────────────────────

impl HighlightStore for SqliteStore {
  type Error = Error;

  // ── Upserts ───────────────────────────────────────────────────────────────

  async fn upsert_item(&self, item: Item) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO items (
             id, category, title, author, cover_url, page_url, source_url, tags
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            item.id,
            item.category.as_str(),
            item.title,
            item.author,
            item.cover_url,
            item.page_url,
            item.source_url,
            item.tags,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn upsert_highlight(&self, highlight: Highlight) -> Result<()> {
    let updated_str        = highlight.updated.map(encode_dt);
    let highlighted_at_str = highlight.highlighted_at.map(encode_dt);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO highlights (
             id, text, note, location, location_type, updated,
             highlighted_at, url, color, item_id, tags
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            highlight.id,
            highlight.text,
            highlight.note,
            highlight.location,
            highlight.location_type,
            updated_str,
            highlighted_at_str,
            highlight.url,
            highlight.color,
            highlight.item_id,
            highlight.tags,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Sync log ──────────────────────────────────────────────────────────────

  async fn last_sync(&self) -> Result<DateTime<Utc>> {
    let latest: Option<String> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT last_updated FROM sync_log ORDER BY id DESC LIMIT 1",
              [],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    match latest {
      Some(s) => Ok(watermark::decode(&s)?),
      None => Ok(watermark::epoch()),
    }
  }

  async fn record_sync(&self, at: DateTime<Utc>) -> Result<()> {
    let at_str = watermark::encode(at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sync_log (last_updated) VALUES (?1)",
          rusqlite::params![at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn item(&self, id: i64) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, category, title, author, cover_url, page_url,
                      source_url, tags
               FROM items WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawItem {
                  id:         row.get(0)?,
                  category:   row.get(1)?,
                  title:      row.get(2)?,
                  author:     row.get(3)?,
                  cover_url:  row.get(4)?,
                  page_url:   row.get(5)?,
                  source_url: row.get(6)?,
                  tags:       row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn highlight(&self, id: i64) -> Result<Option<Highlight>> {
    let raw: Option<RawHighlight> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, text, note, location, location_type, updated,
                      highlighted_at, url, color, item_id, tags
               FROM highlights WHERE id = ?1",
              rusqlite::params![id],
              raw_highlight_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawHighlight::into_highlight).transpose()
  }

  async fn item_ids(&self) -> Result<Vec<i64>> {
    let ids = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT DISTINCT id FROM items")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids)
  }

  async fn marker_notes(&self, marker: char) -> Result<Vec<MarkerNote>> {
    let pattern = format!("%{marker}%");

    let rows: Vec<(i64, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT id, note FROM highlights WHERE note LIKE ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      rows
        .into_iter()
        .map(|(highlight_id, note)| MarkerNote { highlight_id, note })
        .collect(),
    )
  }

  async fn export_rows(&self) -> Result<Vec<ExportRow>> {
    let raws: Vec<RawExportRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT
             h.id, h.text, h.note, h.location, h.location_type, h.updated,
             h.highlighted_at, h.url, h.color, h.item_id, h.tags,
             i.category, i.title, i.author, i.cover_url, i.page_url,
             i.source_url, i.tags
           FROM highlights h
           LEFT JOIN items i ON h.item_id = i.id
           ORDER BY h.id",
        )?;

        let rows = stmt
          .query_map([], |row| {
            Ok(RawExportRow {
              highlight:  raw_highlight_from_row(row)?,
              category:   row.get(11)?,
              title:      row.get(12)?,
              author:     row.get(13)?,
              cover_url:  row.get(14)?,
              page_url:   row.get(15)?,
              source_url: row.get(16)?,
              item_tags:  row.get(17)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExportRow::into_export_row).collect()
  }
}
