//! headless_chrome backed verifier
//!
//! One Chromium process per scan, launched on first use and shared. Every
//! verification gets its own tab so dialog and navigation state never leak
//! between concurrent checks. headless_chrome is synchronous, so all work
//! happens on the blocking pool under an outer deadline.

use crate::browser::{BrowserVerifier, DialogEvent};
use crate::core::error::ProbeError;
use async_trait::async_trait;
use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone, Default)]
pub struct ChromeVerifier {
    browser: Arc<OnceLock<Option<Browser>>>,
}

impl ChromeVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn launch() -> anyhow::Result<Browser> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .ignore_certificate_errors(true)
            .idle_browser_timeout(IDLE_BROWSER_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("Browser launch options error: {}", e))?;

        Browser::new(options)
    }

    /// Shared browser, launched once. A failed launch is remembered so the
    /// scan does not retry Chromium for every candidate.
    fn browser(&self) -> Result<&Browser, ProbeError> {
        self.browser
            .get_or_init(|| match Self::launch() {
                Ok(browser) => {
                    tracing::info!("Headless browser launched for verification");
                    Some(browser)
                }
                Err(e) => {
                    tracing::warn!("Headless browser unavailable: {}", e);
                    None
                }
            })
            .as_ref()
            .ok_or_else(|| ProbeError::BrowserUnavailable("chromium failed to launch".to_string()))
    }

    fn open_tab(&self, budget: Duration) -> Result<OpenTab, ProbeError> {
        let tab = self
            .browser()?
            .new_tab()
            .map_err(|e| ProbeError::Browser(format!("new tab: {}", e)))?;
        tab.set_default_timeout(budget);
        Ok(OpenTab(tab))
    }

    fn observe_dialog_sync(
        &self,
        url: &str,
        budget: Duration,
    ) -> Result<Option<DialogEvent>, ProbeError> {
        let tab = self.open_tab(budget)?;
        let seen: Arc<Mutex<Option<DialogEvent>>> = Arc::new(Mutex::new(None));

        let listener_seen = Arc::clone(&seen);
        let weak_tab = Arc::downgrade(&tab.0);
        tab.add_event_listener(Arc::new(move |event: &Event| {
            if let Event::PageJavascriptDialogOpening(opening) = event {
                listener_seen.lock().get_or_insert_with(|| DialogEvent {
                    message: opening.params.message.clone(),
                });

                // the listener runs on the transport thread, answer from elsewhere
                if let Some(tab) = weak_tab.upgrade() {
                    std::thread::spawn(move || {
                        let _ = tab.call_method(Page::HandleJavaScriptDialog {
                            accept: true,
                            prompt_text: None,
                        });
                    });
                }
            }
        }))
        .map_err(|e| ProbeError::Browser(format!("event listener: {}", e)))?;

        if let Err(e) = tab.navigate_to(url).and_then(|t| t.wait_until_navigated()) {
            // a dialog can stall the load event; what matters is whether it fired
            tracing::debug!("[BROWSER] navigation to {} incomplete: {}", url, e);
        }
        std::thread::sleep(super::DIALOG_SETTLE);

        drop(tab);
        let dialog = seen.lock().take();
        Ok(dialog)
    }

    fn final_location_sync(
        &self,
        url: &str,
        settle: Duration,
        budget: Duration,
    ) -> Result<String, ProbeError> {
        let tab = self.open_tab(budget)?;

        tab.navigate_to(url)
            .map_err(|e| ProbeError::Browser(format!("navigate: {}", e)))?;
        if let Err(e) = tab.wait_until_navigated() {
            tracing::debug!("[BROWSER] navigation to {} incomplete: {}", url, e);
        }
        std::thread::sleep(settle);

        Ok(tab.get_url())
    }
}

/// A tab that is closed when dropped. The browser keeps every tab it opened
/// registered, so an early return would otherwise leave the target open.
struct OpenTab(Arc<Tab>);

impl Deref for OpenTab {
    type Target = Tab;

    fn deref(&self) -> &Tab {
        &self.0
    }
}

impl Drop for OpenTab {
    fn drop(&mut self) {
        if let Err(e) = self.0.close(true) {
            tracing::debug!("[BROWSER] failed to close tab: {}", e);
        }
    }
}

async fn on_blocking_pool<T, F>(budget: Duration, job: F) -> Result<T, ProbeError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ProbeError> + Send + 'static,
{
    match tokio::time::timeout(budget, tokio::task::spawn_blocking(job)).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join)) => Err(ProbeError::Browser(format!("browser task panicked: {}", join))),
        Err(_) => Err(ProbeError::Browser(format!(
            "browser verification exceeded {:?}",
            budget
        ))),
    }
}

#[async_trait]
impl BrowserVerifier for ChromeVerifier {
    async fn observe_dialog(
        &self,
        url: &str,
        budget: Duration,
    ) -> Result<Option<DialogEvent>, ProbeError> {
        let verifier = self.clone();
        let url = url.to_string();
        on_blocking_pool(budget, move || verifier.observe_dialog_sync(&url, budget)).await
    }

    async fn final_location(
        &self,
        url: &str,
        settle: Duration,
        budget: Duration,
    ) -> Result<String, ProbeError> {
        let verifier = self.clone();
        let url = url.to_string();
        on_blocking_pool(budget, move || verifier.final_location_sync(&url, settle, budget)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_tabs(verifier: &ChromeVerifier) -> usize {
        verifier
            .browser()
            .map(|b| b.get_tabs().lock().map(|tabs| tabs.len()).unwrap_or(0))
            .unwrap_or(0)
    }

    #[tokio::test]
    #[ignore = "needs a local Chromium"]
    async fn test_failed_navigation_closes_its_tab() {
        let verifier = ChromeVerifier::new();
        let first_verifier = verifier.clone();
        let before = tokio::task::spawn_blocking(move || open_tabs(&first_verifier))
            .await
            .unwrap();

        for _ in 0..3 {
            let _ = verifier
                .final_location(
                    "http://127.0.0.1:1/unreachable",
                    Duration::from_millis(10),
                    Duration::from_secs(30),
                )
                .await;
        }

        // tab removal is driven by Chromium's target events
        let mut after = usize::MAX;
        for _ in 0..50 {
            let check_verifier = verifier.clone();
            after = tokio::task::spawn_blocking(move || open_tabs(&check_verifier))
                .await
                .unwrap();
            if after <= before {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(after, before);
    }
}
