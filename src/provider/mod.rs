//! Email service provider client abstraction.
//!
//! The adapter only talks to a provider through [`MailchimpApi`], so the
//! bundled reqwest client can be swapped for any other implementation.

mod mailchimp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use mailchimp::{DEFAULT_TIMEOUT, MailchimpClient};

/// Status reported for failures that carry no provider status code.
pub const UNCLASSIFIED_STATUS: u16 = 500;

/// A failed provider call, tagged by what went wrong.
#[derive(Debug)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    Api { status: u16, detail: String },
    /// The request or the response read timed out at the transport level.
    Timeout(String),
    /// Anything else: connection failures, malformed payloads, bugs.
    Other(anyhow::Error),
}

impl ProviderError {
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        ProviderError::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Most specific status known for this failure.
    pub fn status(&self) -> u16 {
        match self {
            ProviderError::Api { status, .. } => *status,
            _ => UNCLASSIFIED_STATUS,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Api { status, detail } => {
                write!(f, "provider API error (HTTP {}): {}", status, detail)
            }
            ProviderError::Timeout(detail) => write!(f, "request timed out: {}", detail),
            ProviderError::Other(e) => write!(f, "{:#}", e),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Other(e) => {
                let source: &(dyn std::error::Error + 'static) = e.as_ref();
                Some(source)
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            ProviderError::api(status.as_u16(), e.to_string())
        } else {
            ProviderError::Other(anyhow::Error::from(e))
        }
    }
}

/// Response of the "get all lists" call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ListsResponse {
    #[serde(default)]
    pub lists: Vec<RawList>,
    pub total_items: Option<u64>,
}

/// A newsletter list as returned by the provider.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct RawList {
    pub id: Option<String>,
    pub name: Option<String>,
    pub stats: Option<RawStats>,
}

/// Aggregated list statistics as returned by the provider.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct RawStats {
    pub member_count: Option<u64>,
    pub open_rate: Option<f64>,
    pub click_rate: Option<f64>,
    pub last_sub_date: Option<String>,
}

/// Operations the adapter needs from the provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailchimpApi: Send + Sync {
    /// Fetch all newsletter lists of the account.
    async fn get_all_lists(&self) -> Result<ListsResponse, ProviderError>;

    /// Fetch a single list, including its stats.
    async fn get_list(&self, list_id: &str) -> Result<RawList, ProviderError>;
}
