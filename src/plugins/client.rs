//! Blocking HTTP client with an optional politeness delay and a bounded batch GET.

use crate::plugins::{check_response, PluginError};
use std::time::{Duration, Instant};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;

/// Extra request headers, e.g. `[("Referer", url), ("X-Requested-With", "XMLHttpRequest")]`.
pub type Headers<'h> = &'h [(&'h str, &'h str)];

/// Blocking HTTP client that enforces a minimum delay between requests.
///
/// The cookie jar is always on: some sites bind the CSRF token scraped from one page
/// to the session cookie set by that same response.
#[derive(Debug)]
pub struct PoliteClient {
    inner: reqwest::blocking::Client,
    delay: Duration,
    delay_override: Option<Duration>,
    last_request: Option<Instant>,
}

impl PoliteClient {
    /// Build a client with default User-Agent and timeout and no delay.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    pub fn builder() -> PoliteClientBuilder {
        PoliteClientBuilder::default()
    }

    /// Set the delay a plugin asks for. Ignored when the builder fixed a delay override.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn delay(&self) -> Duration {
        self.delay_override.unwrap_or(self.delay)
    }

    /// Perform a GET request with extra headers. Sleeps until the delay has passed since the last request.
    pub fn get(
        &mut self,
        url: &str,
        headers: Headers<'_>,
    ) -> Result<reqwest::blocking::Response, reqwest::Error> {
        self.wait_delay();
        tracing::debug!(url, "GET");
        let mut request = self.inner.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send();
        self.last_request = Some(Instant::now());
        response
    }

    /// GET every URL concurrently and wait for all of them. Results keep input order.
    ///
    /// One scoped thread per URL; callers bound the fan-out by chunking `urls` into fixed-size
    /// batches. The politeness delay applies once before the whole batch.
    pub fn get_batch(
        &mut self,
        urls: &[String],
        headers: Headers<'_>,
    ) -> Vec<Result<String, PluginError>> {
        self.wait_delay();
        let inner = &self.inner;
        let results: Vec<Result<String, PluginError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = urls
                .iter()
                .map(|url| {
                    scope.spawn(move || {
                        tracing::debug!(url = url.as_str(), "GET (batch)");
                        let mut request = inner.get(url);
                        for (name, value) in headers {
                            request = request.header(*name, *value);
                        }
                        let response = request.send().map_err(|e| PluginError::Network {
                            url: url.clone(),
                            source: e,
                        })?;
                        check_response(response, url)
                    })
                })
                .collect();
            handles
                .into_iter()
                .zip(urls)
                .map(|(handle, url)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(PluginError::parse(
                            "batch response",
                            format!("fetch thread for {} panicked", url),
                        ))
                    })
                })
                .collect()
        });
        self.last_request = Some(Instant::now());
        results
    }

    fn wait_delay(&mut self) {
        let delay = self.delay();
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < delay {
                std::thread::sleep(delay - elapsed);
            }
        }
    }
}

/// Builder for PoliteClient with optional User-Agent, delay override, and timeout.
#[derive(Debug)]
pub struct PoliteClientBuilder {
    user_agent: Option<String>,
    delay_ms: Option<u64>,
    timeout_secs: u64,
}

impl Default for PoliteClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            delay_ms: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PoliteClientBuilder {
    /// Set a custom User-Agent. If not set, a browser-like default is used.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Fix the delay between requests, overriding whatever each plugin asks for.
    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }

    /// Set request timeout in seconds. Default 30.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<PoliteClient, reqwest::Error> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let inner = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .user_agent(user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(PoliteClient {
            inner,
            delay: Duration::ZERO,
            delay_override: self.delay_ms.map(Duration::from_millis),
            last_request: None,
        })
    }
}
