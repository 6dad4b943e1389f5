//! Error types for the Jitbit client.
//!
//! `JitbitError` is returned by every fallible operation in the crate.
//! Remote failures of individual endpoints are deliberately *not* errors:
//! they are reported through [`Diagnostics`](crate::diagnostics::Diagnostics)
//! and surface as `None` or `false` (see [`JitbitClient`](crate::client::JitbitClient)).
//!
//! # Security
//!
//! The account password must never appear in logs or error messages.
//! Use `sanitize_message()` when building messages from external text.

use thiserror::Error;

/// Unified error type for Jitbit client operations.
#[derive(Error, Debug)]
pub enum JitbitError {
    /// Configuration error - missing or invalid settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The authentication probe at construction time did not succeed.
    #[error("authentication failed: {reason}")]
    Authentication {
        /// Why the probe was rejected (status code or transport failure).
        reason: String,
    },

    /// Arguments were rejected before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),
}

impl JitbitError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        JitbitError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        JitbitError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        JitbitError::Validation(message.into())
    }

    /// Creates an authentication error.
    pub fn authentication(reason: impl Into<String>) -> Self {
        JitbitError::Authentication {
            reason: reason.into(),
        }
    }

    /// Returns true if the caller can fix this error by changing its arguments.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, JitbitError::Validation(_))
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// Display message with `secret` redacted.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
