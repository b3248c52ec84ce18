//! Scheduler bounds observed through an instrumented prober

use async_trait::async_trait;
use loxs::core::error::ProbeError;
use loxs::crlf::CrlfScanner;
use loxs::http::{ProbeResponse, Prober};
use loxs::{Backends, ScanConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Instrumented {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl Prober for Instrumented {
    async fn fetch(&self, _url: &str, _timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(25)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(ProbeResponse::new(200, "ok"))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_in_flight_never_exceeds_limit_and_nothing_is_dropped() {
    let prober = Arc::new(Instrumented::default());
    let scanner = CrlfScanner::new().with_backends(Backends::default().with_prober(prober.clone()));

    let config = ScanConfig::builder()
        .urls(vec!["http://a/?q=", "http://b/?q="])
        .payloads(vec!["%0d%0aX-Extra:TOKEN"])
        .with_concurrency(3)
        .with_browser_verification(false)
        .build();

    let results = scanner.scan(&config).await;

    assert!(results.is_empty());
    // 21 built-in + 1 user payload, per target
    assert_eq!(prober.calls.load(Ordering::SeqCst), 44);
    assert!(prober.peak.load(Ordering::SeqCst) <= 3);
    assert!(prober.peak.load(Ordering::SeqCst) >= 2);
    assert_eq!(prober.in_flight.load(Ordering::SeqCst), 0);
}
