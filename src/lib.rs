//! Resilience layer over email service provider (ESP) API clients.
//!
//! ```no_run
//! use esp_adapter::{EspAdapter, MailchimpAdapter};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let adapter = MailchimpAdapter::new("79bf390c0e16020d7b18d7fe5dd60a55-us18")?;
//! for list in adapter.lists().await? {
//!     println!("{}", list.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod errors;
pub mod provider;
pub mod retry;

pub use adapter::{EspAdapter, ListMetrics, ListSummary, MailchimpAdapter};
pub use config::AdapterConfig;
pub use errors::AdapterError;
pub use retry::RetryPolicy;
