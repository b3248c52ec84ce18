use crate::core::config::ScanConfig;
use crate::core::context::{Backends, ProbeContext};
use crate::core::error::Ignored;
use crate::core::registry::ScannerKind;
use crate::core::scheduler::{ResultAggregator, Scheduler};
use crate::reporting::model::ScanResult;
use crate::reporting::summary;
use crate::sqli::payloads::{BooleanPair, TimePayload, BOOLEAN_PAIRS, ERROR_PROBES, TIME_PAYLOADS};
use crate::sqli::time::{DelayThreshold, BASELINE_SAMPLES, TIMEOUT_HEADROOM_SECS};
use crate::sqli::{boolean, error};
use crate::validation::baseline::{Baseline, BaselineSampler, ConnectionStability};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
struct Catalog {
    error_probes: Arc<Vec<String>>,
    time: Arc<Vec<TimePayload>>,
    boolean: Arc<Vec<BooleanPair>>,
}

pub struct SqliScanner {
    time: Vec<TimePayload>,
    boolean: Vec<BooleanPair>,
    backends: Backends,
}

impl Default for SqliScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SqliScanner {
    pub fn new() -> Self {
        Self {
            time: TIME_PAYLOADS.to_vec(),
            boolean: BOOLEAN_PAIRS.to_vec(),
            backends: Backends::default(),
        }
    }

    pub fn with_time_payloads(mut self, payloads: Vec<TimePayload>) -> Self {
        self.time = payloads;
        self
    }

    pub fn with_boolean_pairs(mut self, pairs: Vec<BooleanPair>) -> Self {
        self.boolean = pairs;
        self
    }

    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    pub async fn scan(&self, config: &ScanConfig) -> Vec<ScanResult> {
        let Some(ctx) = ProbeContext::prepare(ScannerKind::Sqli, config, &self.backends) else {
            return Vec::new();
        };

        let error_probes: Vec<String> = if config.payloads.is_empty() {
            ERROR_PROBES.iter().map(|p| p.to_string()).collect()
        } else {
            config.payloads.clone()
        };

        tracing::info!(
            "Starting SQLi scan: {} target(s), methods: error-based, time-based, boolean-based",
            config.urls.len()
        );

        let catalog = Catalog {
            error_probes: Arc::new(error_probes),
            time: Arc::new(self.time.clone()),
            boolean: Arc::new(self.boolean.clone()),
        };

        let sink = ResultAggregator::new();
        let report = Scheduler::new(config.concurrency_limit())
            .run(config.urls.clone(), &sink, |target, sink| {
                let ctx = ctx.clone();
                let catalog = catalog.clone();
                async move { probe_target(ctx, catalog, target, sink).await }
            })
            .await;
        tracing::debug!("[SQLI] scheduler finished: {:?}", report);

        let results = sink.drain();
        summary::log(ScannerKind::Sqli, &results);
        results
    }
}

async fn probe_target(
    ctx: ProbeContext,
    catalog: Catalog,
    target: String,
    sink: ResultAggregator,
) -> Result<(), Ignored> {
    let timeout = ctx.config.request_timeout();
    let baseline = ctx.prober.fetch(&target, timeout).await?;
    let baseline = Baseline::from_response(&baseline);

    error_channel(&ctx, &catalog, &target, &baseline, &sink).await;
    time_channel(&ctx, &catalog, &target, &sink).await;
    boolean_channel(&ctx, &catalog, &target, &baseline, &sink).await;
    Ok(())
}

async fn error_channel(
    ctx: &ProbeContext,
    catalog: &Catalog,
    target: &str,
    baseline: &Baseline,
    sink: &ResultAggregator,
) {
    let timeout = ctx.config.request_timeout();
    for payload in catalog.error_probes.iter() {
        let url = format!("{}{}", target, payload);
        let resp = match ctx.prober.fetch(&url, timeout).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!("[SQLI] error probe {} failed: {}", url, e);
                continue;
            }
        };
        if let Some(result) = error::confirm(&url, payload, baseline, &resp) {
            tracing::info!("[SQLI CONFIRMED] {} -> {}", url, result.details);
            sink.push(result);
        }
    }
}

async fn time_channel(ctx: &ProbeContext, catalog: &Catalog, target: &str, sink: &ResultAggregator) {
    if catalog.time.is_empty() {
        return;
    }

    let sampler = BaselineSampler::new(ctx.prober.as_ref(), ctx.config.request_timeout());
    let latency = sampler
        .latency(target, BASELINE_SAMPLES)
        .await
        .latency
        .unwrap_or_default();
    let stability = ConnectionStability::from(&latency);
    if !stability.is_stable {
        tracing::debug!(
            "[SQLI] unstable latency on {} (avg {:.2}s, max {:.2}s), widening margin",
            target,
            stability.average,
            stability.max
        );
    }
    let threshold = DelayThreshold::calibrate(&latency);
    let timeout = ctx.config.request_timeout() + Duration::from_secs(TIMEOUT_HEADROOM_SECS);

    for payload in catalog.time.iter() {
        let url = format!("{}{}", target, payload.payload);
        let first = match ctx.prober.fetch(&url, timeout).await {
            Ok(resp) => resp.elapsed_secs(),
            Err(e) => {
                tracing::debug!("[SQLI] time probe {} failed: {}", url, e);
                continue;
            }
        };
        if !threshold.first_hit(first, payload.expected_delay) {
            continue;
        }

        // A timed-out repeat is not a delayed repeat
        let second = match ctx.prober.fetch(&url, timeout).await {
            Ok(resp) => resp.elapsed_secs(),
            Err(_) => continue,
        };
        if threshold.repeat_hit(second) {
            let result = ScanResult::confirmed(
                ScannerKind::Sqli,
                &url,
                payload.payload,
                format!("Time-based SQLi - {} ({:.2}s delay)", payload.dbms, first),
            )
            .with_response_time(first);
            tracing::info!(
                "[SQLI CONFIRMED] {} -> {} (baseline {:.2}s)",
                url,
                result.details,
                threshold.average
            );
            sink.push(result);
            return;
        }
    }
}

async fn boolean_channel(
    ctx: &ProbeContext,
    catalog: &Catalog,
    target: &str,
    baseline: &Baseline,
    sink: &ResultAggregator,
) {
    let timeout = ctx.config.request_timeout();
    for pair in catalog.boolean.iter() {
        let true_url = format!("{}{}", target, pair.truthy);
        let false_url = format!("{}{}", target, pair.falsy);

        let (truthy, falsy) = match (
            ctx.prober.fetch(&true_url, timeout).await,
            ctx.prober.fetch(&false_url, timeout).await,
        ) {
            (Ok(t), Ok(f)) => (t, f),
            _ => continue,
        };

        if boolean::confirms(baseline.body_len(), truthy.body_len(), falsy.body_len()) {
            let result = ScanResult::confirmed(
                ScannerKind::Sqli,
                &true_url,
                pair.truthy,
                format!(
                    "Boolean-based SQLi (diff: {} bytes)",
                    boolean::gap(truthy.body_len(), falsy.body_len())
                ),
            );
            tracing::info!("[SQLI CONFIRMED] {} -> {}", true_url, result.details);
            sink.push(result);
            return;
        }
    }
}
