//! CSV export of the denormalized archive — highlights left-joined with
//! their items, one row per highlight.

use std::path::Path;

use anyhow::{Context as _, Result};
use gloss_core::store::ExportRow;

pub fn write_csv(rows: &[ExportRow], path: &Path) -> Result<()> {
  let mut writer = csv::Writer::from_path(path)
    .with_context(|| format!("creating export file {}", path.display()))?;

  for row in rows {
    writer.serialize(row).context("writing export row")?;
  }
  writer.flush().context("flushing export file")?;
  Ok(())
}
