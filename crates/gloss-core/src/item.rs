//! Item — a top-level content entity that owns zero or more highlights.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The kind of content an item represents.
///
/// The remote service files every item under exactly one of these five
/// categories. The list endpoint filters on the plural form
/// ([`Category::api_value`]); storage and display use the singular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Book,
  Article,
  Tweet,
  Supplemental,
  Podcast,
}

impl Category {
  /// Every category, in the order the sync pass walks them.
  pub const ALL: [Category; 5] = [
    Category::Book,
    Category::Article,
    Category::Tweet,
    Category::Supplemental,
    Category::Podcast,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Category::Book => "book",
      Category::Article => "article",
      Category::Tweet => "tweet",
      Category::Supplemental => "supplemental",
      Category::Podcast => "podcast",
    }
  }

  /// Value accepted by the list endpoint's `category` filter.
  pub fn api_value(self) -> &'static str {
    match self {
      Category::Book => "books",
      Category::Article => "articles",
      Category::Tweet => "tweets",
      Category::Supplemental => "supplementals",
      Category::Podcast => "podcasts",
    }
  }

  /// Parse either the stored singular form or the wire plural form.
  pub fn parse(s: &str) -> Result<Category> {
    match s {
      "book" | "books" => Ok(Category::Book),
      "article" | "articles" => Ok(Category::Article),
      "tweet" | "tweets" => Ok(Category::Tweet),
      "supplemental" | "supplementals" => Ok(Category::Supplemental),
      "podcast" | "podcasts" => Ok(Category::Podcast),
      other => Err(Error::UnknownCategory(other.to_owned())),
    }
  }
}

/// A book, article, tweet, supplemental or podcast as stored locally.
///
/// `id` is the remote service's integer identifier and the local primary
/// key; re-syncing the same id overwrites the row in full. Items are never
/// deleted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub id:         i64,
  pub category:   Category,
  pub title:      String,
  pub author:     Option<String>,
  pub cover_url:  Option<String>,
  /// The service's own page for this item's highlights.
  pub page_url:   Option<String>,
  pub source_url: Option<String>,
  /// Canonical tag string — see [`crate::tags::canonical_tag_string`].
  pub tags:       String,
}
