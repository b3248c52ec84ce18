//! Probe-level error taxonomy
//!
//! Nothing in here ever reaches the caller of `scan()`. A probe that fails
//! is downgraded to [`Ignored`] and the scan simply has one finding less.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("malformed url {url}: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("browser verification failed: {0}")]
    Browser(String),

    #[error("browser unavailable: {0}")]
    BrowserUnavailable(String),
}

impl ProbeError {
    pub fn malformed(url: &str, reason: impl ToString) -> Self {
        ProbeError::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn from_reqwest(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if err.is_builder() {
            ProbeError::malformed(url, err)
        } else {
            ProbeError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// A work item or probe attempt that produced nothing, for a reason that is
/// only interesting at debug level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ignored {
    pub reason: String,
}

impl Ignored {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Ignored {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ignored: {}", self.reason)
    }
}

impl From<ProbeError> for Ignored {
    fn from(err: ProbeError) -> Self {
        Ignored::new(err.to_string())
    }
}

/// Outcome of one probe attempt.
pub type Attempt<T> = Result<Option<T>, Ignored>;
