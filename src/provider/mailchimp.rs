//! Mailchimp Marketing API v3 client.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{ListsResponse, MailchimpApi, ProviderError, RawList};

/// Per-request transport timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Server used when the API key carries no data-center suffix.
const FALLBACK_SERVER: &str = "invalid-server";

/// Mailchimp ignores the basic-auth user name; only the key matters.
const AUTH_USER: &str = "anystring";

/// Error document Mailchimp returns with non-2xx responses.
#[derive(Deserialize, Debug)]
struct Problem {
    title: Option<String>,
    detail: Option<String>,
}

/// Minimal Mailchimp client covering the list endpoints.
#[derive(Clone)]
pub struct MailchimpClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl MailchimpClient {
    /// Creates a client for the data center encoded in the API key.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_options(api_key, None, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom base URL and request timeout.
    pub fn with_options(api_key: &str, api_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("esp-adapter/", env!("ESP_ADAPTER_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Mailchimp")?;

        let api_url = match api_url {
            Some(url) => url.to_string(),
            None => default_api_url(api_key),
        };
        let base_url = Url::parse(&api_url)
            .with_context(|| format!("Invalid Mailchimp API URL: {}", api_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Mailchimp API URL cannot carry a path: {}", api_url);
        }

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url,
        })
    }

    pub fn api_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Other(anyhow!("Base URL {} has no path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ProviderError> {
        let url = self.endpoint(segments)?;
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .basic_auth(AUTH_USER, Some(&self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), problem_detail(&body)));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MailchimpApi for MailchimpClient {
    #[tracing::instrument(skip(self))]
    async fn get_all_lists(&self) -> Result<ListsResponse, ProviderError> {
        self.get_json(&["lists"]).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_list(&self, list_id: &str) -> Result<RawList, ProviderError> {
        // These never name a single list and would resolve to the collection.
        if matches!(list_id, "" | "." | "..") {
            return Err(ProviderError::api(
                404,
                format!("List id {:?} does not address a list", list_id),
            ));
        }
        self.get_json(&["lists", list_id]).await
    }
}

/// Data center of an API key: the segment after the first `-`.
fn server_for_key(api_key: &str) -> &str {
    api_key
        .split('-')
        .nth(1)
        .filter(|dc| !dc.is_empty())
        .unwrap_or(FALLBACK_SERVER)
}

fn default_api_url(api_key: &str) -> String {
    format!("https://{}.api.mailchimp.com/3.0", server_for_key(api_key))
}

fn problem_detail(body: &str) -> String {
    serde_json::from_str::<Problem>(body)
        .ok()
        .and_then(|p| p.detail.filter(|d| !d.is_empty()).or(p.title))
        .unwrap_or_else(|| body.trim().to_string())
}
