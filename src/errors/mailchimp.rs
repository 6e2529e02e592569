//! Human-readable messages for Mailchimp status codes.

use super::{AdapterError, MESSAGE_PREFIX};
use crate::provider::ProviderError;

/// Message for a status code, without the adapter prefix.
pub fn describe(status: u16) -> &'static str {
    match status {
        400 => "Bad request. Please ensure your request is valid and try again.",
        401 => "Unauthorized. Please provide valid credentials and try again.",
        403 => "Forbidden. Ensure you have the necessary permissions.",
        404 => "Resource not found. Please verify the provided list ID.",
        405 => "Method not allowed. Please check your HTTP request method.",
        414 => "URI too long. Please ensure the URI length is within the allowed limit.",
        422 => "Unprocessable entity. Request cannot be processed due to semantic errors.",
        426 => "Upgrade required. Please upgrade to a newer version of the protocol.",
        429 => "Too many requests. Please wait and try again later.",
        500 => "Server encountered an unexpected error. Please try again later.",
        _ => "An unexpected error occurred. Please try again later.",
    }
}

/// Prefixed message for a status code.
pub fn render(status: u16) -> String {
    format!("{}: {}", MESSAGE_PREFIX, describe(status))
}

impl From<ProviderError> for AdapterError {
    fn from(error: ProviderError) -> Self {
        let status = error.status();
        AdapterError::new(render(status), status)
    }
}
