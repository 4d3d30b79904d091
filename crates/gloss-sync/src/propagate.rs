//! Tag propagation over marker notes.
//!
//! Notes carry an informal tagging convention: whitespace-delimited tokens
//! prefixed with a marker character (`.todo`, `.quote`). Wherever a primary
//! tag appears without its mapped associated tag, the pass appends the
//! associated tag to the note on the remote, which stays the source of
//! truth. The next sync pass pulls the change back into the local store.

use std::collections::BTreeSet;

use gloss_core::{
  source::HighlightSource, store::HighlightStore, tags::marker_tokens,
};

use crate::{Error, Result, mapping::TagMapping};

/// Marker prefix for in-note tags.
pub const MARKER: char = '.';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
  /// Highlights that carried at least one marker token.
  pub scanned:  usize,
  /// Remote note updates issued.
  pub appended: usize,
}

/// One propagation pass over the stored notes.
pub struct TagPropagation<'a, R, S> {
  source:  &'a R,
  store:   &'a S,
  mapping: &'a TagMapping,
  marker:  char,
}

impl<'a, R, S> TagPropagation<'a, R, S>
where
  R: HighlightSource,
  S: HighlightStore,
{
  pub fn new(source: &'a R, store: &'a S, mapping: &'a TagMapping) -> Self {
    Self { source, store, mapping, marker: MARKER }
  }

  pub fn with_marker(mut self, marker: char) -> Self {
    self.marker = marker;
    self
  }

  pub async fn run(&self) -> Result<PropagationReport> {
    let mut report = PropagationReport::default();

    let candidates = self
      .store
      .marker_notes(self.marker)
      .await
      .map_err(Error::store_err)?;

    for candidate in candidates {
      // The present set is computed once from the stored note; appends
      // within this pass go to the remote only.
      let present: BTreeSet<String> =
        marker_tokens(&candidate.note, self.marker);
      if present.is_empty() {
        continue;
      }
      report.scanned += 1;

      for tag in &present {
        let Some(associated) = self.mapping.associated_for(tag) else {
          continue;
        };
        if present.contains(associated) {
          continue;
        }

        let current = self
          .source
          .highlight_note(candidate.highlight_id)
          .await
          .map_err(Error::source_err)?;
        let appended = format!("{current} {associated}");
        self
          .source
          .set_highlight_note(candidate.highlight_id, appended)
          .await
          .map_err(Error::source_err)?;

        tracing::debug!(
          highlight_id = candidate.highlight_id,
          tag = associated,
          "propagated tag"
        );
        report.appended += 1;
      }
    }

    Ok(report)
  }
}
