//! The external primary→associated tag mapping.

use std::path::Path;

use serde::Deserialize;

use crate::Result;

#[derive(Debug, Clone, Deserialize)]
struct MappingRow {
  primary_tag:    String,
  associated_tag: String,
}

/// Ordered `(primary_tag, associated_tag)` pairs: a note carrying a primary
/// tag should also carry its associated tag.
#[derive(Debug, Clone, Default)]
pub struct TagMapping {
  rows: Vec<MappingRow>,
}

impl TagMapping {
  /// Load from a tab-separated file with `primary_tag` and `associated_tag`
  /// header columns.
  pub fn from_tsv(path: impl AsRef<Path>) -> Result<Self> {
    let mut reader = csv::ReaderBuilder::new()
      .delimiter(b'\t')
      .from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
      rows.push(row?);
    }
    Ok(Self { rows })
  }

  /// Build from in-memory pairs.
  pub fn from_pairs<I, S>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
  {
    Self {
      rows: pairs
        .into_iter()
        .map(|(primary, associated)| MappingRow {
          primary_tag:    primary.into(),
          associated_tag: associated.into(),
        })
        .collect(),
    }
  }

  /// The associated tag for `primary`, if mapped.
  ///
  /// When a primary tag appears in several rows, the first row wins; later
  /// rows for the same primary are never consulted.
  pub fn associated_for(&self, primary: &str) -> Option<&str> {
    self
      .rows
      .iter()
      .find(|row| row.primary_tag == primary)
      .map(|row| row.associated_tag.as_str())
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn associated_for_finds_mapped_tag() {
    let mapping = TagMapping::from_pairs([(".todo", ".followup")]);
    assert_eq!(mapping.associated_for(".todo"), Some(".followup"));
    assert_eq!(mapping.associated_for(".done"), None);
  }

  #[test]
  fn first_row_wins_for_duplicate_primaries() {
    let mapping = TagMapping::from_pairs([
      (".todo", ".followup"),
      (".todo", ".someday"),
    ]);
    assert_eq!(mapping.associated_for(".todo"), Some(".followup"));
  }

  #[test]
  fn loads_tab_separated_file() {
    let path = std::env::temp_dir()
      .join(format!("gloss-mapping-{}.tsv", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "primary_tag\tassociated_tag").unwrap();
    writeln!(file, ".todo\t.followup").unwrap();
    writeln!(file, ".quote\t.writing").unwrap();
    drop(file);

    let mapping = TagMapping::from_tsv(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.associated_for(".quote"), Some(".writing"));
  }
}
