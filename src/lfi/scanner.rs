use crate::core::config::ScanConfig;
use crate::core::context::{Backends, ProbeContext};
use crate::core::error::Ignored;
use crate::core::registry::ScannerKind;
use crate::core::scheduler::{ResultAggregator, Scheduler};
use crate::lfi::candidates;
use crate::lfi::payloads::{self, LfiPayload};
use crate::lfi::verdict;
use crate::reporting::model::ScanResult;
use crate::reporting::summary;
use crate::validation::baseline::{Baseline, BaselineSampler};
use crate::validation::token;
use std::sync::Arc;

enum Probe {
    Catalog(LfiPayload),
    User(String),
}

struct Work {
    target: String,
    baseline: Arc<Baseline>,
    probe: Probe,
}

pub struct LfiScanner {
    catalog: Vec<LfiPayload>,
    backends: Backends,
}

impl Default for LfiScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LfiScanner {
    pub fn new() -> Self {
        Self {
            catalog: payloads::catalog(),
            backends: Backends::default(),
        }
    }

    /// Replace the built-in traversal catalog
    pub fn with_catalog(mut self, catalog: Vec<LfiPayload>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    pub async fn scan(&self, config: &ScanConfig) -> Vec<ScanResult> {
        let Some(ctx) = ProbeContext::prepare(ScannerKind::Lfi, config, &self.backends) else {
            return Vec::new();
        };

        tracing::info!(
            "Starting LFI scan: {} target(s), {} catalog + {} user payload(s)",
            config.urls.len(),
            self.catalog.len(),
            config.payloads.len()
        );

        let nonce = token::random_hex(&mut rand::rng(), 8);
        let sampler = BaselineSampler::new(ctx.prober.as_ref(), config.request_timeout());

        let mut work = Vec::new();
        for target in &config.urls {
            let baseline = Arc::new(sampler.soft_404(target, &nonce).await);
            for payload in &self.catalog {
                work.push(Work {
                    target: target.clone(),
                    baseline: Arc::clone(&baseline),
                    probe: Probe::Catalog(*payload),
                });
            }
            for payload in &config.payloads {
                work.push(Work {
                    target: target.clone(),
                    baseline: Arc::clone(&baseline),
                    probe: Probe::User(payload.clone()),
                });
            }
        }

        let sink = ResultAggregator::new();
        let report = Scheduler::new(config.concurrency_limit())
            .run(work, &sink, |item, sink| {
                let ctx = ctx.clone();
                async move { probe(ctx, item, sink).await }
            })
            .await;
        tracing::debug!("[LFI] scheduler finished: {:?}", report);

        let results = sink.drain();
        summary::log(ScannerKind::Lfi, &results);
        results
    }
}

async fn probe(ctx: ProbeContext, work: Work, sink: ResultAggregator) -> Result<(), Ignored> {
    let timeout = ctx.config.request_timeout();

    match work.probe {
        Probe::Catalog(payload) => {
            let mut last_error = None;
            for candidate in candidates::build(&work.target, payload.payload) {
                let resp = match ctx.prober.fetch(&candidate, timeout).await {
                    Ok(resp) => resp,
                    Err(e) => {
                        tracing::debug!("[LFI] {} failed: {}", candidate, e);
                        last_error = Some(e);
                        continue;
                    }
                };
                last_error = None;

                if let Some(result) = verdict::confirm(&candidate, &work.baseline, &resp, &payload) {
                    tracing::info!("[LFI CONFIRMED] {} -> {}", candidate, result.details);
                    sink.push(result);
                    return Ok(());
                }
            }
            match last_error {
                Some(e) => Err(e.into()),
                None => Ok(()),
            }
        }
        Probe::User(payload) => {
            let url = format!("{}{}", work.target, payload);
            let resp = ctx.prober.fetch(&url, timeout).await?;
            if let Some(result) = verdict::confirm_any(&url, &work.baseline, &resp, &payload) {
                tracing::info!("[LFI CONFIRMED] {} -> {}", url, result.details);
                sink.push(result);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ProbeError;
    use crate::http::client::Prober;
    use crate::http::response::ProbeResponse;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Serves /etc/passwd whenever a traversal reaches the `file` parameter.
    struct VulnerableSite;

    #[async_trait]
    impl Prober for VulnerableSite {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<ProbeResponse, ProbeError> {
            if url.contains("file=../../../etc/passwd") {
                Ok(ProbeResponse::new(
                    200,
                    format!("root:x:0:0:root:/root:/bin/bash\n{}", "p".repeat(40)),
                ))
            } else if url.contains("test_nonexistent_") {
                Ok(ProbeResponse::new(200, "n".repeat(31)))
            } else {
                Ok(ProbeResponse::new(200, "page"))
            }
        }
    }

    #[tokio::test]
    async fn test_single_traversal_confirms_once() {
        let scanner = LfiScanner::new()
            .with_catalog(vec![payloads::CATALOG[0]])
            .with_backends(Backends::default().with_prober(Arc::new(VulnerableSite)));
        let config = ScanConfig::builder()
            .urls(vec!["http://test/page?file=a.txt".to_string()])
            .with_browser_verification(false)
            .build();

        let results = scanner.scan(&config).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].vulnerable);
        assert!(results[0].details.contains("/etc/passwd"));
        assert_eq!(results[0].url, "http://test/page?file=../../../etc/passwd");
    }

    #[tokio::test]
    async fn test_clean_site_yields_nothing() {
        struct Clean;
        #[async_trait]
        impl Prober for Clean {
            async fn fetch(&self, _url: &str, _t: Duration) -> Result<ProbeResponse, ProbeError> {
                Ok(ProbeResponse::new(200, "same page"))
            }
        }

        let scanner =
            LfiScanner::new().with_backends(Backends::default().with_prober(Arc::new(Clean)));
        let config = ScanConfig::builder()
            .urls(vec!["http://test/page?file=a.txt".to_string()])
            .payloads(vec!["../../etc/hosts".to_string()])
            .build();
        assert!(scanner.scan(&config).await.is_empty());
    }
}
