//! Adapter configuration.

use std::fmt;
use std::time::Duration;

use crate::provider::DEFAULT_TIMEOUT;
use crate::retry::RetryPolicy;

/// Settings an adapter is constructed from. Immutable once the adapter owns it.
#[derive(Clone, PartialEq)]
pub struct AdapterConfig {
    api_key: String,
    api_url: Option<String>,
    timeout: Duration,
    retry: Option<RetryPolicy>,
}

impl AdapterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: None,
            timeout: DEFAULT_TIMEOUT,
            retry: None,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Overrides the provider base URL derived from the key.
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Overrides the adapter's own retry defaults.
    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        self.retry
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("api_key", &mask(&self.api_key))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Keeps only the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*********".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("*********{}", tail)
}
