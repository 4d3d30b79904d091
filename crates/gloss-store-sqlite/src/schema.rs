//! SQL schema for the Gloss SQLite store.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS items (
    id         INTEGER PRIMARY KEY,  -- remote identifier
    category   TEXT NOT NULL,        -- 'book' | 'article' | 'tweet' | 'supplemental' | 'podcast'
    title      TEXT NOT NULL,
    author     TEXT,
    cover_url  TEXT,
    page_url   TEXT,
    source_url TEXT,
    tags       TEXT NOT NULL DEFAULT ''  -- canonical tag string
);

CREATE TABLE IF NOT EXISTS highlights (
    id             INTEGER PRIMARY KEY,  -- remote identifier
    text           TEXT NOT NULL,
    note           TEXT NOT NULL DEFAULT '',
    location       INTEGER,
    location_type  TEXT,
    updated        TEXT,            -- RFC 3339 UTC
    highlighted_at TEXT,            -- RFC 3339 UTC
    url            TEXT,
    color          TEXT,
    item_id        INTEGER,         -- remote parent id; deliberately not a FK
    tags           TEXT NOT NULL DEFAULT ''
);

-- One row per completed sync pass. The current watermark is the most
-- recently inserted row, not the greatest timestamp.
CREATE TABLE IF NOT EXISTS sync_log (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    last_updated TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS highlights_item_idx ON highlights(item_id);

PRAGMA user_version = 1;
";
