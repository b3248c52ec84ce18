//! Bounded-concurrency probe scheduler
//!
//! Every work item runs as its own tokio task. A semaphore permit is taken on
//! the enqueuing side before the task is spawned, so a saturated pool stalls
//! the producer instead of piling up tasks. `run` is a barrier: it returns
//! only after every dispatched item has finished, successfully or not.

use crate::core::error::Ignored;
use crate::reporting::model::ScanResult;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Append-only result collection shared by all workers of one scan.
#[derive(Clone, Default)]
pub struct ResultAggregator {
    inner: Arc<Mutex<Vec<ScanResult>>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: ScanResult) {
        self.inner.lock().push(result);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Take everything collected so far. Meant to be called after the barrier.
    pub fn drain(&self) -> Vec<ScanResult> {
        std::mem::take(&mut *self.inner.lock())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    pub dispatched: usize,
    pub completed: usize,
    pub ignored: usize,
    pub panicked: usize,
}

pub struct Scheduler {
    limit: usize,
}

impl Scheduler {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run `worker` once per item, at most `limit` at a time.
    pub async fn run<T, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        sink: &ResultAggregator,
        worker: F,
    ) -> SchedulerReport
    where
        T: Send + 'static,
        F: Fn(T, ResultAggregator) -> Fut,
        Fut: Future<Output = Result<(), Ignored>> + Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut tasks = JoinSet::new();
        let mut report = SchedulerReport::default();

        for item in items {
            // never closed, acquire only fails after close()
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let fut = worker(item, sink.clone());
            report.dispatched += 1;

            tasks.spawn(async move {
                let outcome = fut.await;
                drop(permit);
                outcome
            });
        }

        while let Some(joined) = tasks.join_next().await {
            report.completed += 1;
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(ignored)) => {
                    report.ignored += 1;
                    tracing::debug!("work item skipped: {}", ignored.reason);
                }
                Err(e) => {
                    report.panicked += 1;
                    tracing::warn!("work item aborted: {}", e);
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::ScannerKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_never_exceeds_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let sink = ResultAggregator::new();

        let scheduler = Scheduler::new(3);
        let report = scheduler
            .run(0..40, &sink, |_, _| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<(), Ignored>(())
                }
            })
            .await;

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(report.dispatched, 40);
        assert_eq!(report.completed, 40);
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_siblings() {
        let sink = ResultAggregator::new();
        let report = Scheduler::new(4)
            .run(0..10usize, &sink, |i, sink| async move {
                if i % 2 == 0 {
                    return Err(Ignored::new("even"));
                }
                sink.push(ScanResult::confirmed(ScannerKind::Lfi, format!("u{i}"), "p", "d"));
                Ok(())
            })
            .await;

        assert_eq!(report.completed, 10);
        assert_eq!(report.ignored, 5);
        assert_eq!(sink.drain().len(), 5);
    }

    #[tokio::test]
    async fn test_panicking_item_is_contained() {
        let sink = ResultAggregator::new();
        let report = Scheduler::new(2)
            .run(0..4usize, &sink, |i, _| async move {
                if i == 1 {
                    panic!("boom");
                }
                Ok::<(), Ignored>(())
            })
            .await;

        assert_eq!(report.dispatched, 4);
        assert_eq!(report.completed, 4);
        assert_eq!(report.panicked, 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let sink = ResultAggregator::new();
        Scheduler::new(16)
            .run(0..500usize, &sink, |i, sink| async move {
                sink.push(ScanResult::confirmed(ScannerKind::Xss, i.to_string(), "p", "d"));
                Ok::<(), Ignored>(())
            })
            .await;

        let mut urls: Vec<String> = sink.drain().into_iter().map(|r| r.url).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 500);
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        assert_eq!(Scheduler::new(0).limit(), 1);
    }
}
