//! Readwise API v2 client.
//!
//! Implements [`gloss_core::source::HighlightSource`] over HTTP: bearer-token
//! auth, count-probe pagination, and an injectable pacer for the endpoint
//! that rate-limits aggressively.

mod client;
mod page;

pub mod error;
pub mod pace;
pub mod wire;

pub use client::{ApiConfig, DEFAULT_BASE_URL, ReadwiseClient};
pub use error::{Error, Result};
pub use page::{PAGE_SIZE, fetch_all_pages};
