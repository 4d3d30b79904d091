//! Count-probe pagination over the remote list endpoints.

use std::future::Future;

use crate::{Result, pace::Pacer, wire::ListResponse};

/// Results per page on the full-size requests.
pub const PAGE_SIZE: u64 = 1000;

/// Drive a paged list endpoint to exhaustion, one batch per page.
///
/// A probe request at `page_size=1` learns the total result count; the
/// number of full pages is `ceil(count / PAGE_SIZE)`. Pages are then fetched
/// sequentially at full size, in server order, with `pacer` awaited between
/// successive requests. The probe's single result is discarded — page 1 is
/// re-fetched at full size. A count of zero issues no further requests.
///
/// `fetch` is called as `fetch(page, page_size)` and carries the caller's
/// fixed filters in its closure.
pub async fn fetch_all_pages<T, F, Fut, P>(
  fetch: F,
  pacer: &P,
) -> Result<Vec<Vec<T>>>
where
  F: Fn(u64, u64) -> Fut,
  Fut: Future<Output = Result<ListResponse<T>>>,
  P: Pacer + ?Sized,
{
  let probe = fetch(1, 1).await?;
  let total_pages = probe.count.div_ceil(PAGE_SIZE);

  let mut batches = Vec::with_capacity(total_pages as usize);
  for page in 1..=total_pages {
    if page > 1 {
      pacer.pause().await;
    }
    let response = fetch(page, PAGE_SIZE).await?;
    batches.push(response.results);
  }

  Ok(batches)
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;
  use crate::pace::NoPause;

  /// Serve `count` sequential integers, `page_size` at a time.
  fn synthetic_page(count: u64, page: u64, page_size: u64) -> ListResponse<u64> {
    let start = (page - 1) * page_size;
    let end = count.min(start + page_size);
    ListResponse {
      count,
      results: (start..end).collect(),
    }
  }

  #[tokio::test]
  async fn fetches_every_page_exactly_once() {
    let calls = Mutex::new(Vec::new());

    let batches = fetch_all_pages(
      |page, page_size| {
        calls.lock().unwrap().push((page, page_size));
        let response = synthetic_page(2500, page, page_size);
        async move { Ok(response) }
      },
      &NoPause,
    )
    .await
    .unwrap();

    // One probe, then pages 1..=3 at full size.
    assert_eq!(
      calls.into_inner().unwrap(),
      vec![(1, 1), (1, 1000), (2, 1000), (3, 1000)]
    );

    // Concatenation is complete with nothing dropped or duplicated.
    let all: Vec<u64> = batches.into_iter().flatten().collect();
    assert_eq!(all, (0..2500).collect::<Vec<u64>>());
  }

  #[tokio::test]
  async fn zero_count_stops_after_probe() {
    let calls = Mutex::new(Vec::new());

    let batches = fetch_all_pages(
      |page, page_size| {
        calls.lock().unwrap().push((page, page_size));
        let response = synthetic_page(0, page, page_size);
        async move { Ok(response) }
      },
      &NoPause,
    )
    .await
    .unwrap();

    assert!(batches.is_empty());
    assert_eq!(calls.into_inner().unwrap(), vec![(1, 1)]);
  }

  struct CountingPacer(AtomicUsize);

  impl Pacer for CountingPacer {
    async fn pause(&self) {
      self.0.fetch_add(1, Ordering::SeqCst);
    }
  }

  #[tokio::test]
  async fn pauses_between_pages_not_before_the_first() {
    let pacer = CountingPacer(AtomicUsize::new(0));

    fetch_all_pages(
      |page, page_size| {
        let response = synthetic_page(2500, page, page_size);
        async move { Ok(response) }
      },
      &pacer,
    )
    .await
    .unwrap();

    // Three pages, two gaps.
    assert_eq!(pacer.0.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn partial_last_page_is_kept() {
    let batches = fetch_all_pages(
      |page, page_size| {
        let response = synthetic_page(1001, page, page_size);
        async move { Ok(response) }
      },
      &NoPause,
    )
    .await
    .unwrap();

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1000);
    assert_eq!(batches[1].len(), 1);
  }
}
