//! The sync orchestrator — one linear pass over the remote service.

use chrono::{DateTime, Utc};
use gloss_core::{Category, source::HighlightSource, store::HighlightStore};

use crate::{
  Error, Result,
  mapping::TagMapping,
  propagate::{PropagationReport, TagPropagation},
};

/// Per-stage counts from one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
  /// Existing highlights whose remote copy changed since the last pass.
  pub refreshed_highlights: usize,
  /// Items (all categories) new or updated since the last pass.
  pub updated_items:        usize,
  /// Highlights fetched through the per-item endpoint.
  pub new_highlights:       usize,
  pub propagation:          PropagationReport,
}

/// Sequences one sync run: read watermark, merge remote changes, record the
/// new watermark, propagate tags.
///
/// Every await is sequential; there is exactly one in-flight request at any
/// time. The watermark is recorded only after all fetches and writes have
/// succeeded, so an aborted pass re-fetches the same window next time and
/// the idempotent upserts absorb the repetition.
pub struct Syncer<'a, R, S> {
  source: &'a R,
  store:  &'a S,
}

impl<'a, R, S> Syncer<'a, R, S>
where
  R: HighlightSource,
  S: HighlightStore,
{
  pub fn new(source: &'a R, store: &'a S) -> Self {
    Self { source, store }
  }

  /// Run one full pass. `now` becomes the recorded watermark on success.
  pub async fn run(
    &self,
    now: DateTime<Utc>,
    mapping: &TagMapping,
  ) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    let since = self.store.last_sync().await.map_err(Error::store_err)?;
    tracing::info!(since = %since, "starting sync pass");

    // Highlights modified (but not newly created) since the last pass.
    let refreshed = self
      .source
      .updated_highlights(since)
      .await
      .map_err(Error::source_err)?;
    report.refreshed_highlights = refreshed.len();
    for highlight in refreshed {
      self
        .store
        .upsert_highlight(highlight)
        .await
        .map_err(Error::store_err)?;
    }

    // New or updated items across every category.
    let mut item_ids = Vec::new();
    for category in Category::ALL {
      let items = self
        .source
        .items_in_category(category, since)
        .await
        .map_err(Error::source_err)?;
      tracing::debug!(category = category.as_str(), count = items.len(), "fetched items");
      for item in items {
        item_ids.push(item.id);
        self.store.upsert_item(item).await.map_err(Error::store_err)?;
      }
    }
    report.updated_items = item_ids.len();

    // Highlights belonging to the collected items. Nothing collected means
    // nothing to fetch; the watermark still advances below.
    if item_ids.is_empty() {
      tracing::info!("no new or updated items");
    } else {
      for item_id in item_ids {
        let highlights = self
          .source
          .item_highlights(item_id, since)
          .await
          .map_err(Error::source_err)?;
        report.new_highlights += highlights.len();
        for highlight in highlights {
          self
            .store
            .upsert_highlight(highlight)
            .await
            .map_err(Error::store_err)?;
        }
      }
    }

    // Only reached once every fetch and write above has succeeded.
    self.store.record_sync(now).await.map_err(Error::store_err)?;
    tracing::info!(watermark = %now, "recorded watermark");

    report.propagation =
      TagPropagation::new(self.source, self.store, mapping).run().await?;

    Ok(report)
  }
}
