//! Mailchimp adapter.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use super::{EspAdapter, ListMetrics, ListSummary};
use crate::config::AdapterConfig;
use crate::errors::AdapterError;
use crate::provider::{MailchimpApi, MailchimpClient};
use crate::retry::{RetryPolicy, with_retry};

pub const MAXIMUM_RETRIES: usize = 1;
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Retry policy used unless the config overrides it.
pub const DEFAULT_RETRY_POLICY: RetryPolicy = RetryPolicy::new(MAXIMUM_RETRIES, RETRY_DELAY);

/// Adapter over the Mailchimp Marketing API.
pub struct MailchimpAdapter<C = MailchimpClient> {
    config: AdapterConfig,
    client: C,
    policy: RetryPolicy,
}

impl MailchimpAdapter<MailchimpClient> {
    /// Creates an adapter with default settings for the given API key.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(AdapterConfig::new(api_key))
    }

    pub fn with_config(config: AdapterConfig) -> Result<Self> {
        let client = MailchimpClient::with_options(
            config.api_key(),
            config.api_url(),
            config.timeout(),
        )?;
        Ok(Self::from_client(config, client))
    }
}

impl<C: MailchimpApi> MailchimpAdapter<C> {
    /// Wraps an existing provider client.
    pub fn from_client(config: AdapterConfig, client: C) -> Self {
        let policy = config.retry_policy().unwrap_or(DEFAULT_RETRY_POLICY);
        Self {
            config,
            client,
            policy,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<C: MailchimpApi> EspAdapter for MailchimpAdapter<C> {
    #[tracing::instrument(skip(self))]
    async fn lists(&self) -> Result<Vec<ListSummary>, AdapterError> {
        let response = with_retry(&self.policy, "Mailchimp get all lists", || {
            self.client.get_all_lists()
        })
        .await?;

        let returned = response.lists.len() as u64;
        if let Some(total) = response.total_items.filter(|total| *total > returned) {
            debug!(
                "Mailchimp reported {} lists, {} returned in this page",
                total, returned
            );
        }

        Ok(response.lists.into_iter().map(ListSummary::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn list_metrics(&self, list_id: &str) -> Result<ListMetrics, AdapterError> {
        let list = with_retry(&self.policy, "Mailchimp get list", || {
            self.client.get_list(list_id)
        })
        .await?;

        Ok(list.stats.map(ListMetrics::from).unwrap_or_default())
    }
}
