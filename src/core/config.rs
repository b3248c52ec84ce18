//! Scan configuration handed to every scanner facade

use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Immutable input of one `scan()` invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target URLs, in the order they were supplied
    pub urls: Vec<String>,

    /// User-supplied payloads (may be empty, catalogs fill in)
    pub payloads: Vec<String>,

    /// Maximum number of work items in flight
    pub concurrency: usize,

    /// Per-request timeout in seconds
    pub timeout: u64,

    /// Raw `Cookie` header value
    pub cookie: Option<String>,

    /// Extra request headers
    pub headers: HashMap<String, String>,

    /// Requests per second across the whole scan, 0 = unlimited
    pub rate_limit: u32,

    /// Allow the headless browser tier (XSS dialogs, redirect navigation)
    pub browser_verification: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            payloads: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT_SECS,
            cookie: None,
            headers: HashMap::new(),
            rate_limit: 0,
            browser_verification: true,
        }
    }
}

impl ScanConfig {
    pub fn new(urls: Vec<String>, payloads: Vec<String>) -> Self {
        Self {
            urls,
            payloads,
            ..Self::default()
        }
    }

    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Concurrency cap, never zero
    pub fn concurrency_limit(&self) -> usize {
        if self.concurrency == 0 {
            DEFAULT_CONCURRENCY
        } else {
            self.concurrency
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanConfigBuilder {
    config: ScanConfig,
}

impl ScanConfigBuilder {
    pub fn urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn payloads<I, S>(mut self, payloads: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.payloads = payloads.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.timeout = seconds;
        self
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.config.cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    /// Insert a header; a repeated key replaces the earlier value
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_rate_limit(mut self, rate: u32) -> Self {
        self.config.rate_limit = rate;
        self
    }

    pub fn with_browser_verification(mut self, enabled: bool) -> Self {
        self.config.browser_verification = enabled;
        self
    }

    pub fn build(self) -> ScanConfig {
        self.config
    }
}
