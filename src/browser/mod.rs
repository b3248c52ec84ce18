//! Out-of-band verification through a real browser
//!
//! Only consulted when the cheap in-band check is inconclusive: reflected
//! XSS must actually pop a native dialog, an open redirect must actually
//! move the browser off-site.

pub mod chrome;

use crate::core::error::ProbeError;
use async_trait::async_trait;
use std::time::Duration;

pub use chrome::ChromeVerifier;

/// How long a page is given to fire a dialog after navigation
pub const DIALOG_SETTLE: Duration = Duration::from_secs(1);

/// How long client-side redirects are given to finish
pub const REDIRECT_SETTLE: Duration = Duration::from_secs(2);

/// A native alert/confirm/prompt observed in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEvent {
    pub message: String,
}

#[async_trait]
pub trait BrowserVerifier: Send + Sync {
    /// Navigate to `url` and report the first script dialog, if any fired.
    /// Dialogs are dismissed so the page never blocks.
    async fn observe_dialog(
        &self,
        url: &str,
        budget: Duration,
    ) -> Result<Option<DialogEvent>, ProbeError>;

    /// Navigate to `url`, wait `settle` and return where the browser ended up.
    async fn final_location(
        &self,
        url: &str,
        settle: Duration,
        budget: Duration,
    ) -> Result<String, ProbeError>;
}
