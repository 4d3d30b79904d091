//! Error type for `gloss-readwise`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Network-level failure: connect, timeout, TLS.
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The remote answered with a non-success status.
  #[error("{url} returned {status}")]
  Status {
    status: reqwest::StatusCode,
    url:    String,
  },

  /// The remote answered 2xx but the body did not decode.
  #[error("undecodable response from {url}: {source}")]
  Body {
    url:    String,
    #[source]
    source: reqwest::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
