//! Watermark timestamp codec.
//!
//! The watermark marks the boundary between already-synchronized and
//! needs-fetching data. It travels as `YYYY-MM-DDTHH:MM:SSZ`, both in the
//! sync log table and in the remote API's `updated__gt` /
//! `highlighted_at__lt` filters.

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// `strftime` pattern for the watermark wire/storage form.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The watermark reported when no sync has ever completed: fetch everything.
pub fn epoch() -> DateTime<Utc> {
  DateTime::<Utc>::UNIX_EPOCH
}

pub fn encode(at: DateTime<Utc>) -> String {
  at.format(FORMAT).to_string()
}

pub fn decode(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|source| Error::InvalidWatermark { value: s.to_owned(), source })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn encode_decode_round_trip() {
    let at = Utc.with_ymd_and_hms(2021, 8, 12, 1, 59, 12).unwrap();
    let encoded = encode(at);
    assert_eq!(encoded, "2021-08-12T01:59:12Z");
    assert_eq!(decode(&encoded).unwrap(), at);
  }

  #[test]
  fn epoch_encodes_as_unix_zero() {
    assert_eq!(encode(epoch()), "1970-01-01T00:00:00Z");
  }

  #[test]
  fn decode_rejects_garbage() {
    assert!(matches!(
      decode("last tuesday"),
      Err(Error::InvalidWatermark { .. })
    ));
  }
}
