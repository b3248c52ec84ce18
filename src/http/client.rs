//! HTTP probe client: one GET, timeout, rotating User-Agent, optional
//! cookie and extra headers, redirects never followed.

use crate::core::config::ScanConfig;
use crate::core::error::ProbeError;
use crate::core::rate_limit::RateLimiter;
use crate::http::agents::pick_user_agent;
use crate::http::response::ProbeResponse;
use async_trait::async_trait;
use reqwest::{header, redirect::Policy, Client};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use url::Url;

/// Anything that can issue a single probe request.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError>;
}

pub struct HttpClient {
    client: Client,
    limiter: RateLimiter,
    default_headers: HashMap<String, String>,
    cookies: Option<String>,
}

impl HttpClient {
    pub fn new(limiter: RateLimiter) -> anyhow::Result<Self> {
        Self::with_auth(limiter, None, HashMap::new())
    }

    /// Create HTTP client with cookies and custom headers
    pub fn with_auth(
        limiter: RateLimiter,
        cookies: Option<String>,
        headers: HashMap<String, String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            limiter,
            default_headers: headers,
            cookies,
        })
    }

    pub fn from_config(config: &ScanConfig) -> anyhow::Result<Self> {
        Self::with_auth(
            RateLimiter::new(config.rate_limit),
            config.cookie.clone(),
            config.headers.clone(),
        )
    }
}

#[async_trait]
impl Prober for HttpClient {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        let parsed = Url::parse(url).map_err(|e| ProbeError::malformed(url, e))?;

        self.limiter.wait().await;

        let agent = pick_user_agent(&mut rand::rng());
        let mut request = self
            .client
            .get(parsed)
            .timeout(timeout)
            .header(header::USER_AGENT, agent);

        for (key, value) in &self.default_headers {
            if let Ok(header_name) = header::HeaderName::from_bytes(key.as_bytes()) {
                if let Ok(header_value) = header::HeaderValue::from_str(value) {
                    request = request.header(header_name, header_value);
                }
            }
        }

        if let Some(ref cookies) = self.cookies {
            request = request.header(header::COOKIE, cookies);
        }

        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(url, timeout, e))?;
        let status = response.status().as_u16();

        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).to_string(),
                )
            })
            .collect();

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| ProbeError::from_reqwest(url, timeout, e))?;

        Ok(ProbeResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body_bytes).to_string(),
            elapsed: start.elapsed(),
        })
    }
}
