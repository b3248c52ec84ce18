use crate::core::config::ScanConfig;
use crate::core::context::{Backends, ProbeContext};
use crate::core::error::{Attempt, Ignored};
use crate::core::registry::ScannerKind;
use crate::core::scheduler::{ResultAggregator, Scheduler};
use crate::crlf::payloads::{self, CRLF_PAYLOADS};
use crate::crlf::verdict;
use crate::reporting::model::ScanResult;
use crate::reporting::summary;
use crate::validation::token;

pub struct CrlfScanner {
    templates: Vec<String>,
    backends: Backends,
}

impl Default for CrlfScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl CrlfScanner {
    pub fn new() -> Self {
        Self {
            templates: CRLF_PAYLOADS.iter().map(|p| p.to_string()).collect(),
            backends: Backends::default(),
        }
    }

    pub fn with_templates(mut self, templates: Vec<String>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    pub async fn scan(&self, config: &ScanConfig) -> Vec<ScanResult> {
        let Some(ctx) = ProbeContext::prepare(ScannerKind::Crlf, config, &self.backends) else {
            return Vec::new();
        };

        let templates: Vec<String> = self
            .templates
            .iter()
            .chain(config.payloads.iter())
            .cloned()
            .collect();

        tracing::info!(
            "Starting CRLF scan: {} target(s), {} payload(s)",
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
                        tracing::info!("[CRLF CONFIRMED] {} -> {}", result.url, result.details);
                        sink.push(result);
                    }
                    Ok::<(), Ignored>(())
                }
            })
            .await;
        tracing::debug!("[CRLF] scheduler finished: {:?}", report);

        let results = sink.drain();
        summary::log(ScannerKind::Crlf, &results);
        results
    }
}

async fn attempt(ctx: &ProbeContext, target: &str, template: &str) -> Attempt<ScanResult> {
    let token = token::crlf_token(&mut rand::rng());
    let payload = payloads::instantiate(template, &token);
    let url = format!("{}{}", target, payload);

    let resp = ctx.prober.fetch(&url, ctx.config.request_timeout()).await?;
    Ok(verdict::confirm(&url, &payload, &token, &resp))
}
