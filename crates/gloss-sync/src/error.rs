//! Error type for `gloss-sync`.
//!
//! The orchestrator is generic over its collaborators, so their error types
//! are carried as boxed trait objects.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("remote source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("tag mapping error: {0}")]
  Mapping(#[from] csv::Error),
}

impl Error {
  pub(crate) fn source_err(
    e: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Error::Source(Box::new(e))
  }

  pub(crate) fn store_err(
    e: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
