//! ESP adapter abstraction.
//!
//! An adapter wraps one provider client and exposes newsletter lists and
//! per-list metrics under a uniform retry and error contract.

mod mailchimp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AdapterError;
use crate::provider::{RawList, RawStats};

pub use mailchimp::{DEFAULT_RETRY_POLICY, MailchimpAdapter, MAXIMUM_RETRIES, RETRY_DELAY};

/// One newsletter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListSummary {
    pub name: String,
}

/// Engagement metrics of a single list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListMetrics {
    pub subscriber_count: u64,
    pub average_open_rate: f64,
    pub click_rate: f64,
    /// ISO date, empty when the provider has none.
    pub last_send_date: String,
}

impl From<RawList> for ListSummary {
    fn from(list: RawList) -> Self {
        ListSummary {
            name: list.name.unwrap_or_default(),
        }
    }
}

impl From<RawStats> for ListMetrics {
    fn from(stats: RawStats) -> Self {
        ListMetrics {
            subscriber_count: stats.member_count.unwrap_or_default(),
            average_open_rate: stats.open_rate.unwrap_or_default(),
            click_rate: stats.click_rate.unwrap_or_default(),
            last_send_date: stats.last_sub_date.unwrap_or_default(),
        }
    }
}

/// Capability every email service provider adapter offers.
///
/// Calls either fully succeed or fail with an [`AdapterError`]; there are
/// no partial results.
#[async_trait]
pub trait EspAdapter: Send + Sync {
    /// All newsletter lists, in provider order.
    async fn lists(&self) -> Result<Vec<ListSummary>, AdapterError>;

    /// Metrics of the list with the given provider id.
    async fn list_metrics(&self, list_id: &str) -> Result<ListMetrics, AdapterError>;
}
