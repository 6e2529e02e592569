//! User-facing error taxonomy.

pub mod mailchimp;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier prepended to every rendered message.
pub const MESSAGE_PREFIX: &str = "ESP Adapter";

/// The only error shape adapter operations surface to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterError {
    pub message: String,
    pub status: u16,
}

impl AdapterError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.status)
    }
}

impl std::error::Error for AdapterError {}
