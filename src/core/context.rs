//! Per-scan execution context shared by every work item

use crate::browser::{BrowserVerifier, ChromeVerifier};
use crate::core::config::ScanConfig;
use crate::core::registry::ScannerKind;
use crate::http::client::{HttpClient, Prober};
use std::sync::Arc;

/// Optional replacements for the network-facing collaborators.
/// Unset fields fall back to the real HTTP client and headless Chromium.
#[derive(Clone, Default)]
pub struct Backends {
    pub prober: Option<Arc<dyn Prober>>,
    pub browser: Option<Arc<dyn BrowserVerifier>>,
}

impl Backends {
    pub fn with_prober(mut self, prober: Arc<dyn Prober>) -> Self {
        self.prober = Some(prober);
        self
    }

    pub fn with_browser(mut self, browser: Arc<dyn BrowserVerifier>) -> Self {
        self.browser = Some(browser);
        self
    }
}

#[derive(Clone)]
pub struct ProbeContext {
    pub kind: ScannerKind,
    pub config: Arc<ScanConfig>,
    pub prober: Arc<dyn Prober>,
    pub browser: Option<Arc<dyn BrowserVerifier>>,
}

impl ProbeContext {
    /// Build the context for one `scan()` call. Returns `None` when no HTTP
    /// client could be constructed, in which case the scan yields nothing.
    pub fn prepare(kind: ScannerKind, config: &ScanConfig, backends: &Backends) -> Option<Self> {
        let prober: Arc<dyn Prober> = match &backends.prober {
            Some(prober) => Arc::clone(prober),
            None => match HttpClient::from_config(config) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    tracing::error!("Failed to build HTTP client for {} scan: {}", kind, e);
                    return None;
                }
            },
        };

        // Chromium is launched lazily, so handing out a verifier costs nothing
        // until a check actually needs it.
        let browser: Option<Arc<dyn BrowserVerifier>> = if config.browser_verification {
            Some(
                backends
                    .browser
                    .clone()
                    .unwrap_or_else(|| Arc::new(ChromeVerifier::new())),
            )
        } else {
            None
        };

        Some(Self {
            kind,
            config: Arc::new(config.clone()),
            prober,
            browser,
        })
    }
}
