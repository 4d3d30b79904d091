//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use gloss_core::{Category, Highlight, Item, store::HighlightStore, watermark};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn book(id: i64) -> Item {
  Item {
    id,
    category:   Category::Book,
    title:      format!("Book {id}"),
    author:     Some("A. Writer".into()),
    cover_url:  None,
    page_url:   Some(format!("https://example.com/bookreview/{id}")),
    source_url: None,
    tags:       "3 7".into(),
  }
}

fn note_highlight(id: i64, item_id: i64, note: &str) -> Highlight {
  Highlight {
    id,
    text:           format!("passage {id}"),
    note:           note.into(),
    location:       Some(100),
    location_type:  Some("order".into()),
    updated:        Some(Utc.with_ymd_and_hms(2021, 8, 12, 1, 59, 12).unwrap()),
    highlighted_at: None,
    url:            None,
    color:          Some("yellow".into()),
    item_id:        Some(item_id),
    tags:           String::new(),
  }
}

// ─── Upserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_item_then_fetch() {
  let s = store().await;
  s.upsert_item(book(42)).await.unwrap();

  let fetched = s.item(42).await.unwrap().unwrap();
  assert_eq!(fetched, book(42));
}

#[tokio::test]
async fn item_missing_returns_none() {
  let s = store().await;
  assert!(s.item(99).await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_item_overwrites_every_column() {
  let s = store().await;
  s.upsert_item(book(1)).await.unwrap();

  let replacement = Item {
    title: "Retitled".into(),
    author: None,
    tags: String::new(),
    ..book(1)
  };
  s.upsert_item(replacement.clone()).await.unwrap();

  // Still one row, fully replaced.
  assert_eq!(s.item_ids().await.unwrap(), vec![1]);
  assert_eq!(s.item(1).await.unwrap().unwrap(), replacement);
}

#[tokio::test]
async fn upsert_item_twice_is_idempotent() {
  let s = store().await;
  s.upsert_item(book(7)).await.unwrap();
  s.upsert_item(book(7)).await.unwrap();

  assert_eq!(s.item_ids().await.unwrap(), vec![7]);
  assert_eq!(s.item(7).await.unwrap().unwrap(), book(7));
}

#[tokio::test]
async fn upsert_highlight_roundtrip_and_overwrite() {
  let s = store().await;
  let original = note_highlight(5, 42, "first thoughts");
  s.upsert_highlight(original.clone()).await.unwrap();
  assert_eq!(s.highlight(5).await.unwrap().unwrap(), original);

  let revised = Highlight {
    note: "second thoughts".into(),
    color: None,
    ..original
  };
  s.upsert_highlight(revised.clone()).await.unwrap();
  assert_eq!(s.highlight(5).await.unwrap().unwrap(), revised);
}

#[tokio::test]
async fn upsert_highlight_twice_is_idempotent() {
  let s = store().await;
  s.upsert_highlight(note_highlight(5, 42, "x")).await.unwrap();
  s.upsert_highlight(note_highlight(5, 42, "x")).await.unwrap();

  let rows = s.export_rows().await.unwrap();
  assert_eq!(rows.len(), 1);
}

// ─── Sync log ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn last_sync_defaults_to_epoch() {
  let s = store().await;
  assert_eq!(s.last_sync().await.unwrap(), watermark::epoch());
}

#[tokio::test]
async fn record_then_read_returns_just_recorded() {
  let s = store().await;
  let at = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
  s.record_sync(at).await.unwrap();
  assert_eq!(s.last_sync().await.unwrap(), at);
}

#[tokio::test]
async fn watermark_is_latest_by_insertion_not_by_value() {
  let s = store().await;
  let newer = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
  let older = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

  s.record_sync(newer).await.unwrap();
  s.record_sync(older).await.unwrap();

  // The log is append-only; the most recent insertion wins.
  assert_eq!(s.last_sync().await.unwrap(), older);
}

// ─── Marker notes ────────────────────────────────────────────────────────────

#[tokio::test]
async fn marker_notes_returns_only_notes_with_marker() {
  let s = store().await;
  s.upsert_highlight(note_highlight(1, 42, ".todo")).await.unwrap();
  s.upsert_highlight(note_highlight(2, 42, "plain prose")).await.unwrap();
  s.upsert_highlight(note_highlight(3, 42, "see .ref for this")).await.unwrap();
  s.upsert_highlight(note_highlight(4, 42, "")).await.unwrap();

  let mut notes = s.marker_notes('.').await.unwrap();
  notes.sort_by_key(|n| n.highlight_id);

  let ids: Vec<i64> = notes.iter().map(|n| n.highlight_id).collect();
  assert_eq!(ids, vec![1, 3]);
  assert_eq!(notes[0].note, ".todo");
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn export_rows_left_join_items() {
  let s = store().await;
  s.upsert_item(book(42)).await.unwrap();
  s.upsert_highlight(note_highlight(1, 42, "kept")).await.unwrap();
  // An orphan: its item was never synced.
  s.upsert_highlight(note_highlight(2, 777, "orphan")).await.unwrap();

  let rows = s.export_rows().await.unwrap();
  assert_eq!(rows.len(), 2);

  let joined = &rows[0];
  assert_eq!(joined.highlight_id, 1);
  assert_eq!(joined.title.as_deref(), Some("Book 42"));
  assert_eq!(joined.category, Some(Category::Book));
  assert_eq!(joined.item_tags.as_deref(), Some("3 7"));

  let orphan = &rows[1];
  assert_eq!(orphan.highlight_id, 2);
  assert!(orphan.title.is_none());
  assert!(orphan.category.is_none());
  assert!(orphan.item_tags.is_none());
}
