use std::thread;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, RETRY_AFTER, USER_AGENT};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("http {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("invalid json from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("retries exhausted for {url}")]
    Exhausted { url: String },
}

/// The seam between the pipeline and the network. Production uses
/// `NhlClient`; tests substitute a scripted fake.
pub trait Upstream {
    fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 7,
            initial_delay: Duration::from_millis(600),
            max_delay: Duration::from_secs(12),
        }
    }
}

impl RetryPolicy {
    pub fn start(&self) -> Backoff {
        Backoff {
            attempt: 0,
            delay: self.initial_delay,
        }
    }
}

/// Outcome of one throttled attempt: wait and go again, or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    Retry { delay: Duration },
    GiveUp,
}

/// Backoff progression for one logical request. The delay doubles per
/// throttled attempt up to the policy cap; an upstream `Retry-After` hint
/// overrides the wait for that attempt without resetting the progression.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    attempt: u32,
    delay: Duration,
}

impl Backoff {
    pub fn on_throttled(&mut self, policy: &RetryPolicy, hint: Option<Duration>) -> RetryStep {
        self.attempt += 1;
        if self.attempt >= policy.max_attempts {
            return RetryStep::GiveUp;
        }
        let wait = hint.unwrap_or(self.delay);
        self.delay = (self.delay * 2).min(policy.max_delay);
        RetryStep::Retry { delay: wait }
    }
}

/// Blocking client for the upstream REST source. Paces every request with the
/// configured politeness delay and absorbs 429s via `Backoff`; any other
/// failure is a hard error for the caller.
pub struct NhlClient {
    client: Client,
    call_delay: Duration,
    policy: RetryPolicy,
}

impl NhlClient {
    pub fn new(cfg: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            call_delay: Duration::from_millis(cfg.call_delay_ms),
            policy: RetryPolicy::default(),
        })
    }
}

impl Upstream for NhlClient {
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        thread::sleep(self.call_delay);

        let mut backoff = self.policy.start();
        loop {
            let resp = self
                .client
                .get(url)
                .header(USER_AGENT, "sog_board/0.1")
                .send()
                .map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                })?;
            let status = resp.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let hint = retry_after_hint(resp.headers());
                match backoff.on_throttled(&self.policy, hint) {
                    RetryStep::Retry { delay } => {
                        warn!(url, delay_ms = delay.as_millis() as u64, "rate limited, backing off");
                        thread::sleep(delay);
                        continue;
                    }
                    RetryStep::GiveUp => {
                        return Err(FetchError::Exhausted {
                            url: url.to_string(),
                        });
                    }
                }
            }

            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = resp.text().map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
            return serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            });
        }
    }
}

/// `Retry-After` is honored only when it parses as whole seconds.
fn retry_after_hint(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
