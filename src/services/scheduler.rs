// src/services/scheduler.rs

//! Bounded-concurrency runner for per-item detail fetches.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::stream::{self, StreamExt};

use crate::error::Result;

/// Shared completion counter for one scheduler run.
#[derive(Debug)]
pub struct Progress {
    label: String,
    total: usize,
    done: AtomicUsize,
}

impl Progress {
    pub fn new(label: impl Into<String>, total: usize) -> Self {
        Self {
            label: label.into(),
            total,
            done: AtomicUsize::new(0),
        }
    }

    /// Record one finished item and return the new count.
    ///
    /// Logs at info level every 10% of the total.
    pub fn advance(&self) -> usize {
        let done = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        let step = (self.total / 10).max(1);

        if done % step == 0 || done == self.total {
            log::info!(
                "{}: {}/{} ({}%)",
                self.label,
                done,
                self.total,
                done * 100 / self.total.max(1)
            );
        }
        done
    }

    pub fn completed(&self) -> usize {
        self.done.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Runs one fallible async operation per item with at most `concurrency`
/// operations in flight.
///
/// Every item is attempted exactly once. Errors and panics are caught per
/// item and turn into `None`; siblings keep running. A finished item frees
/// its slot at once, even while earlier items are still running. Results
/// come back in submission order.
#[derive(Debug, Clone, Copy)]
pub struct BoundedScheduler {
    concurrency: usize,
}

impl BoundedScheduler {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn run<I, T, F, Fut>(
        &self,
        items: Vec<I>,
        progress: &Progress,
        op: F,
    ) -> Vec<Option<T>>
    where
        I: fmt::Display,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let op = &op;
        let mut results: Vec<Option<T>> = Vec::with_capacity(items.len());
        results.resize_with(items.len(), || None);

        // A slot frees as soon as its item finishes, whatever its position.
        let mut finished = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| async move {
                let key = item.to_string();
                let outcome = AssertUnwindSafe(op(item)).catch_unwind().await;

                let result = match outcome {
                    Ok(Ok(value)) => value,
                    Ok(Err(error)) => {
                        log::warn!("Failed to fetch {}: {}", key, error);
                        None
                    }
                    Err(panic) => {
                        log::error!(
                            "Extraction panicked for {}: {}",
                            key,
                            panic_message(&*panic)
                        );
                        None
                    }
                };

                let done = progress.advance();
                log::debug!("[{}/{}] {}", done, progress.total(), key);
                (index, result)
            })
            .buffer_unordered(self.concurrency);

        while let Some((index, result)) = finished.next().await {
            results[index] = result;
        }
        results
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_every_item_gets_one_slot_in_order() {
        let scheduler = BoundedScheduler::new(3);
        let progress = Progress::new("items", 20);

        let results = scheduler
            .run((0..20).collect(), &progress, |i: u32| async move {
                // Later items finish first.
                tokio::time::sleep(Duration::from_millis(u64::from(20 - i))).await;
                Ok(Some(i * 2))
            })
            .await;

        assert_eq!(results.len(), 20);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(*r, Some(i as u32 * 2));
        }
        assert_eq!(progress.completed(), 20);
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let scheduler = BoundedScheduler::new(4);
        let progress = Progress::new("items", 10);

        let results = scheduler
            .run((0..10).collect(), &progress, |i: u32| async move {
                if i == 6 {
                    return Err(AppError::crawl(i.to_string(), "timed out"));
                }
                Ok(Some(i))
            })
            .await;

        assert_eq!(results.len(), 10);
        assert_eq!(results[6], None);
        assert_eq!(results.iter().filter(|r| r.is_some()).count(), 9);
        assert_eq!(progress.completed(), 10);
    }

    #[tokio::test]
    async fn test_panic_is_isolated() {
        let scheduler = BoundedScheduler::new(2);
        let progress = Progress::new("items", 5);

        let results = scheduler
            .run((0..5).collect(), &progress, |i: u32| async move {
                if i == 2 {
                    panic!("malformed table");
                }
                Ok(Some(i))
            })
            .await;

        assert_eq!(results, vec![Some(0), Some(1), None, Some(3), Some(4)]);
        assert_eq!(progress.completed(), 5);
    }

    #[tokio::test]
    async fn test_absent_results_are_kept() {
        let scheduler = BoundedScheduler::new(2);
        let progress = Progress::new("items", 4);

        let results = scheduler
            .run((0..4).collect(), &progress, |i: u32| async move {
                Ok((i % 2 == 0).then_some(i))
            })
            .await;

        assert_eq!(results, vec![Some(0), None, Some(2), None]);
    }

    #[tokio::test]
    async fn test_in_flight_never_exceeds_concurrency() {
        let scheduler = BoundedScheduler::new(3);
        let progress = Progress::new("items", 12);
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        scheduler
            .run((0..12).collect(), &progress, |i: u32| {
                let in_flight = &in_flight;
                let peak = &peak;
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok(Some(i))
                }
            })
            .await;

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) > 1);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_slow_head_item_does_not_hold_back_later_items() {
        let scheduler = BoundedScheduler::new(2);
        let progress = Progress::new("items", 6);
        let began = Instant::now();
        let started = Mutex::new(vec![Duration::ZERO; 6]);

        let results = scheduler
            .run((0..6).collect(), &progress, |i: usize| {
                let started = &started;
                async move {
                    started.lock().unwrap()[i] = began.elapsed();
                    let pause = if i == 0 { 400 } else { 10 };
                    tokio::time::sleep(Duration::from_millis(pause)).await;
                    Ok(Some(i))
                }
            })
            .await;

        assert_eq!(results, (0..6).map(Some).collect::<Vec<_>>());
        let started = started.into_inner().unwrap();
        // Items 2..6 run in the slot item 1 frees, while item 0 still sleeps.
        for (i, at) in started.iter().enumerate().skip(2) {
            assert!(*at < Duration::from_millis(200), "item {i} started at {at:?}");
        }
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let scheduler = BoundedScheduler::new(0);
        assert_eq!(scheduler.concurrency(), 1);

        let progress = Progress::new("items", 0);
        let results: Vec<Option<u32>> = scheduler
            .run(Vec::<u32>::new(), &progress, |i| async move { Ok(Some(i)) })
            .await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_progress_counts() {
        let progress = Progress::new("lectures", 3);
        assert_eq!(progress.advance(), 1);
        assert_eq!(progress.advance(), 2);
        assert_eq!(progress.advance(), 3);
        assert_eq!(progress.completed(), progress.total());
    }
}
