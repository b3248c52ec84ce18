//! Reference responses a probe response is compared against

use crate::http::client::Prober;
use crate::http::response::ProbeResponse;
use std::time::Duration;

/// Jitter at or above this many seconds marks a target as unstable
pub const STABILITY_JITTER_SECS: f64 = 1.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LatencyProfile {
    pub samples: Vec<f64>,
    pub mean: f64,
    pub max: f64,
}

impl LatencyProfile {
    /// Mean and max over successful samples; no samples means 0.0 for both.
    pub fn from_samples(samples: Vec<f64>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let max = samples.iter().cloned().fold(f64::MIN, f64::max);
        Self { samples, mean, max }
    }

    pub fn jitter(&self) -> f64 {
        (self.max - self.mean).max(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Baseline {
    pub status: u16,
    pub body: String,
    pub elapsed: f64,
    pub latency: Option<LatencyProfile>,
}

impl Baseline {
    /// What a completely failed sampling run degrades to
    pub fn empty() -> Self {
        Self {
            status: 0,
            body: String::new(),
            elapsed: 0.0,
            latency: None,
        }
    }

    pub fn from_response(resp: &ProbeResponse) -> Self {
        Self {
            status: resp.status,
            body: resp.body.clone(),
            elapsed: resp.elapsed_secs(),
            latency: None,
        }
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn mean_latency(&self) -> f64 {
        self.latency.as_ref().map(|l| l.mean).unwrap_or(0.0)
    }
}

/// Supplementary view of a latency profile used before timing probes.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionStability {
    pub average: f64,
    pub max: f64,
    pub is_stable: bool,
}

impl From<&LatencyProfile> for ConnectionStability {
    fn from(profile: &LatencyProfile) -> Self {
        Self {
            average: profile.mean,
            max: profile.max,
            is_stable: profile.max - profile.mean < STABILITY_JITTER_SECS,
        }
    }
}

pub struct BaselineSampler<'a> {
    prober: &'a dyn Prober,
    timeout: Duration,
}

impl<'a> BaselineSampler<'a> {
    pub fn new(prober: &'a dyn Prober, timeout: Duration) -> Self {
        Self { prober, timeout }
    }

    /// What the server answers for a resource that certainly does not exist
    pub async fn soft_404(&self, url: &str, token: &str) -> Baseline {
        let probe_url = format!("{}test_nonexistent_{}", url, token);
        self.reference(&probe_url).await
    }

    /// One request to the literal URL
    pub async fn reference(&self, url: &str) -> Baseline {
        match self.prober.fetch(url, self.timeout).await {
            Ok(resp) => Baseline::from_response(&resp),
            Err(e) => {
                tracing::debug!("[BASELINE] {} unavailable: {}", url, e);
                Baseline::empty()
            }
        }
    }

    /// `samples` sequential requests to the unmodified URL. The first
    /// successful response doubles as the body/status reference.
    pub async fn latency(&self, url: &str, samples: usize) -> Baseline {
        let mut first: Option<ProbeResponse> = None;
        let mut timings = Vec::with_capacity(samples);

        for _ in 0..samples {
            match self.prober.fetch(url, self.timeout).await {
                Ok(resp) => {
                    timings.push(resp.elapsed_secs());
                    if first.is_none() {
                        first = Some(resp);
                    }
                }
                Err(e) => tracing::debug!("[BASELINE] latency sample for {} failed: {}", url, e),
            }
        }

        let mut baseline = first
            .as_ref()
            .map(Baseline::from_response)
            .unwrap_or_else(Baseline::empty);
        baseline.latency = Some(LatencyProfile::from_samples(timings));
        baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ProbeError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    struct Scripted {
        replies: Mutex<VecDeque<Result<f64, ()>>>,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<f64, ()>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Prober for Scripted {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<ProbeResponse, ProbeError> {
            self.seen.lock().push(url.to_string());
            match self.replies.lock().pop_front() {
                Some(Ok(secs)) => Ok(ProbeResponse::new(200, "ok")
                    .with_elapsed(Duration::from_secs_f64(secs))),
                _ => Err(ProbeError::malformed(url, "scripted failure")),
            }
        }
    }

    #[test]
    fn test_latency_profile_mean_and_max() {
        let p = LatencyProfile::from_samples(vec![0.2, 0.3, 0.4]);
        assert!((p.mean - 0.3).abs() < 1e-9);
        assert!((p.max - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_stability_threshold() {
        let calm = LatencyProfile::from_samples(vec![0.2, 0.3, 0.4]);
        assert!(ConnectionStability::from(&calm).is_stable);
        let noisy = LatencyProfile::from_samples(vec![0.1, 0.1, 3.1]);
        assert!(!ConnectionStability::from(&noisy).is_stable);
    }

    #[tokio::test]
    async fn test_soft_404_url_shape() {
        let prober = Scripted::new(vec![Ok(0.1)]);
        let sampler = BaselineSampler::new(&prober, Duration::from_secs(1));
        let baseline = sampler.soft_404("http://t/?f=", "abc").await;
        assert_eq!(baseline.status, 200);
        assert_eq!(prober.seen.lock()[0], "http://t/?f=test_nonexistent_abc");
    }

    #[tokio::test]
    async fn test_failed_reference_is_empty() {
        let prober = Scripted::new(vec![Err(())]);
        let sampler = BaselineSampler::new(&prober, Duration::from_secs(1));
        assert_eq!(sampler.reference("http://t/").await, Baseline::empty());
    }

    #[tokio::test]
    async fn test_latency_skips_failed_samples() {
        let prober = Scripted::new(vec![Ok(0.2), Err(()), Ok(0.4)]);
        let sampler = BaselineSampler::new(&prober, Duration::from_secs(1));
        let baseline = sampler.latency("http://t/", 3).await;
        let latency = baseline.latency.unwrap();
        assert_eq!(latency.samples.len(), 2);
        assert!((latency.mean - 0.3).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_latency_all_failed_is_zero() {
        let prober = Scripted::new(vec![Err(()), Err(()), Err(())]);
        let sampler = BaselineSampler::new(&prober, Duration::from_secs(1));
        let baseline = sampler.latency("http://t/", 3).await;
        assert_eq!(baseline.status, 0);
        assert_eq!(baseline.mean_latency(), 0.0);
    }
}
