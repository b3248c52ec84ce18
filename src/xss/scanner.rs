use crate::browser::DIALOG_SETTLE;
use crate::core::config::ScanConfig;
use crate::core::context::{Backends, ProbeContext};
use crate::core::error::{Attempt, Ignored};
use crate::core::registry::ScannerKind;
use crate::core::scheduler::{ResultAggregator, Scheduler};
use crate::reporting::model::ScanResult;
use crate::reporting::summary;
use crate::validation::token;
use crate::xss::payloads::{self, DIALOG_PAYLOADS};
use crate::xss::verdict;
use std::time::Duration;

/// Extra budget on top of the request timeout for a browser session
pub const BROWSER_HEADROOM: Duration = Duration::from_secs(10);

pub struct XssScanner {
    templates: Vec<String>,
    backends: Backends,
}

impl Default for XssScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl XssScanner {
    pub fn new() -> Self {
        Self {
            templates: DIALOG_PAYLOADS.iter().map(|p| p.to_string()).collect(),
            backends: Backends::default(),
        }
    }

    /// Replace the built-in dialog payloads
    pub fn with_templates(mut self, templates: Vec<String>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    pub async fn scan(&self, config: &ScanConfig) -> Vec<ScanResult> {
        let Some(ctx) = ProbeContext::prepare(ScannerKind::Xss, config, &self.backends) else {
            return Vec::new();
        };
        if ctx.browser.is_none() {
            tracing::warn!("Browser verification disabled: reflected XSS cannot be confirmed");
        }

        let templates: Vec<String> = self
            .templates
            .iter()
            .chain(config.payloads.iter())
            .cloned()
            .collect();

        tracing::info!(
            "Starting XSS scan: {} target(s), {} payload(s), dialog interception",
            config.urls.len(),
            templates.len()
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
                        tracing::info!("[XSS CONFIRMED] {} -> {}", result.url, result.details);
                        sink.push(result);
                    }
                    Ok::<(), Ignored>(())
                }
            })
            .await;
        tracing::debug!("[XSS] scheduler finished: {:?}", report);

        let results = sink.drain();
        summary::log(ScannerKind::Xss, &results);
        results
    }
}

async fn attempt(ctx: &ProbeContext, target: &str, template: &str) -> Attempt<ScanResult> {
    let canary = token::canary(&mut rand::rng());
    let payload = payloads::instantiate(template, &canary);
    let url = format!("{}{}", target, payload);

    let resp = ctx.prober.fetch(&url, ctx.config.request_timeout()).await?;
    if !verdict::reflected(&resp.body, &canary) {
        return Ok(None);
    }

    let Some(browser) = &ctx.browser else {
        tracing::debug!("[XSS] {} reflects canary, no browser to confirm", url);
        return Ok(None);
    };

    let budget = ctx.config.request_timeout() + BROWSER_HEADROOM + DIALOG_SETTLE;
    let dialog = match browser.observe_dialog(&url, budget).await {
        Ok(dialog) => dialog,
        Err(e) => {
            tracing::debug!("[XSS] browser check for {} inconclusive: {}", url, e);
            return Ok(None);
        }
    };

    Ok(verdict::confirm(
        &url,
        &payload,
        &canary,
        dialog.as_ref(),
        resp.elapsed_secs(),
    ))
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

    /// Echoes the raw query back into the page
    struct Echo;

    #[async_trait]
    impl Prober for Echo {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<ProbeResponse, ProbeError> {
            Ok(ProbeResponse::new(200, format!("<html>{}</html>", url)))
        }
    }

    /// Pops a dialog only for `<script>` payloads, echoing the alert argument
    struct ScriptOnly;

    #[async_trait]
    impl BrowserVerifier for ScriptOnly {
        async fn observe_dialog(
            &self,
            url: &str,
            _budget: Duration,
        ) -> Result<Option<DialogEvent>, ProbeError> {
            Ok(url
                .split("<script>alert('")
                .nth(1)
                .and_then(|rest| rest.split('\'').next())
                .map(|msg| DialogEvent { message: msg.to_string() }))
        }

        async fn final_location(
            &self,
            url: &str,
            _settle: Duration,
            _budget: Duration,
        ) -> Result<String, ProbeError> {
            Ok(url.to_string())
        }
    }

    /// Chromium never comes up
    struct NoChromium;

    #[async_trait]
    impl BrowserVerifier for NoChromium {
        async fn observe_dialog(
            &self,
            _url: &str,
            _budget: Duration,
        ) -> Result<Option<DialogEvent>, ProbeError> {
            Err(ProbeError::BrowserUnavailable("chromium failed to launch".to_string()))
        }

        async fn final_location(
            &self,
            _url: &str,
            _settle: Duration,
            _budget: Duration,
        ) -> Result<String, ProbeError> {
            Err(ProbeError::BrowserUnavailable("chromium failed to launch".to_string()))
        }
    }

    fn config() -> ScanConfig {
        ScanConfig::builder().urls(vec!["http://t/search?q="]).build()
    }

    #[tokio::test]
    async fn test_dialog_confirms_with_canary() {
        let scanner = XssScanner::new()
            .with_templates(vec![
                "<script>alert('CANARY')</script>".to_string(),
                "<b>CANARY</b>".to_string(),
            ])
            .with_backends(
                Backends::default()
                    .with_prober(Arc::new(Echo))
                    .with_browser(Arc::new(ScriptOnly)),
            );

        let results = scanner.scan(&config()).await;
        assert_eq!(results.len(), 1);
        assert!(results[0]
            .details
            .starts_with("JavaScript alert() triggered with canary: "));
        assert!(!results[0].payload.contains("CANARY"));
    }

    #[tokio::test]
    async fn test_reflection_without_browser_is_not_a_finding() {
        let scanner = XssScanner::new().with_backends(Backends::default().with_prober(Arc::new(Echo)));
        let config = ScanConfig::builder()
            .urls(vec!["http://t/search?q="])
            .with_browser_verification(false)
            .build();
        assert!(scanner.scan(&config).await.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_browser_leaves_reflection_unconfirmed() {
        let scanner = XssScanner::new().with_backends(
            Backends::default()
                .with_prober(Arc::new(Echo))
                .with_browser(Arc::new(NoChromium)),
        );
        assert!(scanner.scan(&config()).await.is_empty());
    }
}
