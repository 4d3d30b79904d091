//! [`ReadwiseClient`] — HTTP implementation of
//! [`HighlightSource`](gloss_core::source::HighlightSource).

use std::time::Duration;

use chrono::{DateTime, Utc};
use gloss_core::{
  Category, Highlight, Item, source::HighlightSource, watermark,
};
use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::{
  Error, Result,
  pace::{NoPause, Pacer, Throttle},
  page::fetch_all_pages,
  wire::{HighlightPayload, ItemPayload, ListResponse},
};

pub const DEFAULT_BASE_URL: &str = "https://readwise.io/api/v2";

/// Wait between per-item highlight pages; the remote throttles that
/// endpoint hard.
const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(10);

// ─── Config ──────────────────────────────────────────────────────────────────

/// Connection settings for the remote API.
///
/// The token is supplied by the caller at construction time; this crate
/// never consults the process environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Sent verbatim as the `Authorization` header value.
  pub token:    String,
}

impl ApiConfig {
  pub fn new(token: impl Into<String>) -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_owned(),
      token:    token.into(),
    }
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the Readwise API v2.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ReadwiseClient<P: Pacer = Throttle> {
  http:   Client,
  config: ApiConfig,
  pacer:  P,
}

impl ReadwiseClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    Self::with_pacer(config, Throttle::new(DEFAULT_PAGE_DELAY))
  }
}

impl<P: Pacer> ReadwiseClient<P> {
  /// Build a client with a caller-supplied pacer. Tests pass
  /// [`NoPause`]; the CLI passes a [`Throttle`] with a configured delay.
  pub fn with_pacer(config: ApiConfig, pacer: P) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { http, config, pacer })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  async fn get_json<T: DeserializeOwned>(
    &self,
    url: String,
    query: &[(&str, String)],
  ) -> Result<T> {
    let resp = self
      .http
      .get(&url)
      .header(header::AUTHORIZATION, &self.config.token)
      .query(query)
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status { status: resp.status(), url });
    }
    resp.json().await.map_err(|source| Error::Body { url, source })
  }

  /// One page of a list endpoint: the caller's fixed filters plus the
  /// paging parameters.
  async fn list_page<T: DeserializeOwned>(
    &self,
    path: &str,
    filters: &[(&str, String)],
    page: u64,
    page_size: u64,
  ) -> Result<ListResponse<T>> {
    let mut query = filters.to_vec();
    query.push(("page", page.to_string()));
    query.push(("page_size", page_size.to_string()));
    self.get_json(self.url(path), &query).await
  }
}

// ─── HighlightSource impl ────────────────────────────────────────────────────

impl<P: Pacer> HighlightSource for ReadwiseClient<P> {
  type Error = Error;

  async fn updated_highlights(
    &self,
    since: DateTime<Utc>,
  ) -> Result<Vec<Highlight>> {
    let cutoff = watermark::encode(since);
    let filters = [
      ("updated__gt", cutoff.clone()),
      ("highlighted_at__lt", cutoff),
    ];

    let batches = fetch_all_pages(
      |page, page_size| {
        self.list_page::<HighlightPayload>("/highlights/", &filters, page, page_size)
      },
      &NoPause,
    )
    .await?;

    Ok(
      batches
        .into_iter()
        .flatten()
        .map(HighlightPayload::into_highlight)
        .collect(),
    )
  }

  async fn items_in_category(
    &self,
    category: Category,
    since: DateTime<Utc>,
  ) -> Result<Vec<Item>> {
    let filters = [
      ("category", category.api_value().to_owned()),
      ("updated__gt", watermark::encode(since)),
    ];

    let batches = fetch_all_pages(
      |page, page_size| {
        self.list_page::<ItemPayload>("/books/", &filters, page, page_size)
      },
      &NoPause,
    )
    .await?;

    Ok(
      batches
        .into_iter()
        .flatten()
        .map(|payload| payload.into_item(category))
        .collect(),
    )
  }

  async fn item_highlights(
    &self,
    item_id: i64,
    since: DateTime<Utc>,
  ) -> Result<Vec<Highlight>> {
    let filters = [
      ("book_id", item_id.to_string()),
      ("updated__gt", watermark::encode(since)),
    ];

    // The only paced fetch: this endpoint rate-limits per item.
    let batches = fetch_all_pages(
      |page, page_size| {
        self.list_page::<HighlightPayload>("/highlights/", &filters, page, page_size)
      },
      &self.pacer,
    )
    .await?;

    Ok(
      batches
        .into_iter()
        .flatten()
        .map(HighlightPayload::into_highlight)
        .collect(),
    )
  }

  async fn highlight_note(&self, id: i64) -> Result<String> {
    let payload: HighlightPayload =
      self.get_json(self.url(&format!("/highlights/{id}")), &[]).await?;
    Ok(payload.note.unwrap_or_default())
  }

  async fn set_highlight_note(&self, id: i64, note: String) -> Result<()> {
    let url = self.url(&format!("/highlights/{id}"));
    tracing::debug!(highlight_id = id, "patching note");

    let resp = self
      .http
      .patch(&url)
      .header(header::AUTHORIZATION, &self.config.token)
      .json(&serde_json::json!({ "note": note }))
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status { status: resp.status(), url });
    }
    Ok(())
  }
}
