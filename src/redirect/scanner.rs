use crate::browser::REDIRECT_SETTLE;
use crate::core::config::ScanConfig;
use crate::core::context::{Backends, ProbeContext};
use crate::core::error::{Attempt, Ignored};
use crate::core::registry::ScannerKind;
use crate::core::scheduler::{ResultAggregator, Scheduler};
use crate::redirect::payloads::{self, REDIRECT_PAYLOADS};
use crate::redirect::verdict;
use crate::reporting::model::ScanResult;
use crate::reporting::summary;
use crate::validation::token;
use std::time::Duration;

/// Extra budget on top of the request timeout for a browser session
pub const BROWSER_HEADROOM: Duration = Duration::from_secs(5);

pub struct RedirectScanner {
    templates: Vec<String>,
    backends: Backends,
}

impl Default for RedirectScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectScanner {
    pub fn new() -> Self {
        Self {
            templates: REDIRECT_PAYLOADS.iter().map(|p| p.to_string()).collect(),
            backends: Backends::default(),
        }
    }

    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    pub async fn scan(&self, config: &ScanConfig) -> Vec<ScanResult> {
        let Some(ctx) = ProbeContext::prepare(ScannerKind::Redirect, config, &self.backends) else {
            return Vec::new();
        };

        // user payloads replace the built-in list
        let templates = if config.payloads.is_empty() {
            self.templates.clone()
        } else {
            config.payloads.clone()
        };

        tracing::info!(
            "Starting open redirect scan: {} target(s), {} payload(s), browser tier {}",
            config.urls.len(),
            templates.len(),
            if ctx.browser.is_some() { "on" } else { "off" }
        );

        let work: Vec<(String, String)> = config
            .urls
            .iter()
            .flat_map(|url| templates.iter().map(move |t| (url.clone(), t.clone())))
            .collect();

        let sink = ResultAggregator::new();
        let report = Scheduler::new(config.concurrency_limit())
            .run(work, &sink, |(target, template), sink| {
                let ctx = ctx.clone();
                async move {
                    if let Some(result) = attempt(&ctx, &target, &template).await? {
                        tracing::info!("[REDIRECT CONFIRMED] {} -> {}", result.url, result.details);
                        sink.push(result);
                    }
                    Ok::<(), Ignored>(())
                }
            })
            .await;
        tracing::debug!("[REDIRECT] scheduler finished: {:?}", report);

        let results = sink.drain();
        summary::log(ScannerKind::Redirect, &results);
        results
    }
}

async fn attempt(ctx: &ProbeContext, target: &str, template: &str) -> Attempt<ScanResult> {
    let marker = token::marker_domain(&mut rand::rng());
    let payload = payloads::instantiate(template, &marker);
    let url = format!("{}{}", target, payload);

    // A transport failure on tier 1 does not rule out a client-side redirect
    match ctx.prober.fetch(&url, ctx.config.request_timeout()).await {
        Ok(resp) => {
            if let Some(result) = verdict::confirm_header(&url, &payload, &marker, &resp) {
                return Ok(Some(result));
            }
        }
        Err(e) => tracing::debug!("[REDIRECT] {} failed: {}", url, e),
    }

    let Some(browser) = &ctx.browser else {
        return Ok(None);
    };

    let budget = ctx.config.request_timeout() + BROWSER_HEADROOM;
    match browser.final_location(&url, REDIRECT_SETTLE, budget).await {
        Ok(final_url) => Ok(verdict::confirm_browser(&url, &payload, &marker, &final_url)),
        Err(e) => {
            tracing::debug!("[REDIRECT] browser check for {} inconclusive: {}", url, e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserVerifier, DialogEvent};
    use crate::core::error::ProbeError;
    use crate::http::client::Prober;
    use crate::http::response::ProbeResponse;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Always answers 200; the redirect only happens in script
    struct ScriptRedirect;

    #[async_trait]
    impl Prober for ScriptRedirect {
        async fn fetch(&self, _url: &str, _timeout: Duration) -> Result<ProbeResponse, ProbeError> {
            Ok(ProbeResponse::new(200, "<script>location=new URLSearchParams(location.search).get('next')</script>"))
        }
    }

    /// Lands wherever `next=` points
    struct FollowsNext;

    #[async_trait]
    impl BrowserVerifier for FollowsNext {
        async fn observe_dialog(&self, _url: &str, _b: Duration) -> Result<Option<DialogEvent>, ProbeError> {
            Ok(None)
        }

        async fn final_location(&self, url: &str, _s: Duration, _b: Duration) -> Result<String, ProbeError> {
            let next = url.split("next=").nth(1).unwrap_or(url);
            Ok(format!("https:{}/", next.trim_start_matches("https:")))
        }
    }

    /// Server-side redirect to whatever `next=` holds
    struct LocationEcho;

    #[async_trait]
    impl Prober for LocationEcho {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<ProbeResponse, ProbeError> {
            let next = url.split("next=").nth(1).unwrap_or("/");
            Ok(ProbeResponse::new(302, "").with_header("Location", next))
        }
    }

    /// Every navigation fails
    struct BrokenBrowser;

    #[async_trait]
    impl BrowserVerifier for BrokenBrowser {
        async fn observe_dialog(&self, _url: &str, _b: Duration) -> Result<Option<DialogEvent>, ProbeError> {
            Err(ProbeError::Browser("navigate: net::ERR_CONNECTION_REFUSED".to_string()))
        }

        async fn final_location(&self, _url: &str, _s: Duration, _b: Duration) -> Result<String, ProbeError> {
            Err(ProbeError::Browser("navigate: net::ERR_CONNECTION_REFUSED".to_string()))
        }
    }

    fn single_payload_config() -> ScanConfig {
        ScanConfig::builder()
            .urls(vec!["http://t/go?next="])
            .payloads(vec!["//TARGET"])
            .build()
    }

    #[tokio::test]
    async fn test_header_finding_survives_broken_browser() {
        let scanner = RedirectScanner::new().with_backends(
            Backends::default()
                .with_prober(Arc::new(LocationEcho))
                .with_browser(Arc::new(BrokenBrowser)),
        );

        let results = scanner.scan(&single_payload_config()).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].details.starts_with("Redirects to: //loxs"));
    }

    #[tokio::test]
    async fn test_broken_browser_without_header_is_inconclusive() {
        let scanner = RedirectScanner::new().with_backends(
            Backends::default()
                .with_prober(Arc::new(ScriptRedirect))
                .with_browser(Arc::new(BrokenBrowser)),
        );
        assert!(scanner.scan(&single_payload_config()).await.is_empty());
    }

    #[tokio::test]
    async fn test_browser_tier_confirms_client_side_redirect() {
        let scanner = RedirectScanner::new().with_backends(
            Backends::default()
                .with_prober(Arc::new(ScriptRedirect))
                .with_browser(Arc::new(FollowsNext)),
        );
        let config = ScanConfig::builder()
            .urls(vec!["http://t/go?next="])
            .payloads(vec!["//TARGET"])
            .build();

        let results = scanner.scan(&config).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].details.starts_with("Browser verified: "));
        assert!(results[0].payload.starts_with("//loxs"));
    }

    #[tokio::test]
    async fn test_no_browser_no_header_no_finding() {
        let scanner = RedirectScanner::new()
            .with_backends(Backends::default().with_prober(Arc::new(ScriptRedirect)));
        let config = ScanConfig::builder()
            .urls(vec!["http://t/go?next="])
            .with_browser_verification(false)
            .build();
        assert!(scanner.scan(&config).await.is_empty());
    }
}
