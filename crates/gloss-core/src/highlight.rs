//! Highlight — a user-created annotation attached to an item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A highlight as stored locally.
///
/// `id` is the remote integer identifier and the local primary key.
/// `item_id` points at the owning [`Item`](crate::Item) but is not enforced
/// as a foreign key; highlights can arrive before their item does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
  pub id:             i64,
  pub text:           String,
  /// Free text. May carry space-delimited marker tokens (e.g. `.todo`)
  /// that the tag propagation pass acts on.
  pub note:           String,
  pub location:       Option<i64>,
  pub location_type:  Option<String>,
  pub updated:        Option<DateTime<Utc>>,
  pub highlighted_at: Option<DateTime<Utc>>,
  pub url:            Option<String>,
  pub color:          Option<String>,
  pub item_id:        Option<i64>,
  /// Canonical tag string — see [`crate::tags::canonical_tag_string`].
  pub tags:           String,
}
