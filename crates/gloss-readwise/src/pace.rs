//! Pacing strategy for rate-limited endpoints.
//!
//! The per-item highlights endpoint throttles hard, so the client waits
//! between successive page requests. The wait is a strategy trait rather
//! than a hardcoded sleep: production uses [`Throttle`], tests use
//! [`NoPause`].

use std::{future::Future, time::Duration};

/// A pause inserted between successive paginated requests.
pub trait Pacer: Send + Sync {
  fn pause(&self) -> impl Future<Output = ()> + Send + '_;
}

/// Sleep a fixed duration via the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
  delay: Duration,
}

impl Throttle {
  pub fn new(delay: Duration) -> Self {
    Self { delay }
  }
}

impl Pacer for Throttle {
  async fn pause(&self) {
    tokio::time::sleep(self.delay).await;
  }
}

/// No pause at all. Used for endpoints without a rate limit and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Pacer for NoPause {
  async fn pause(&self) {}
}
