//! Error types for the Freshdesk client.
//!
//! This module defines `FreshdeskError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! All error messages are sanitized to ensure API keys are never leaked
//! in logs or error responses. Use `sanitize_message()` when constructing
//! error messages from external sources.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all Freshdesk operations.
///
/// Local validation failures (`Validation`, `InvalidModel`, `FieldNotSet`)
/// are raised before any network call. Remote failures carry the status and
/// body returned by the helpdesk.
#[derive(Error, Debug)]
pub enum FreshdeskError {
    /// Configuration error - missing or invalid helpdesk name, API key or URL.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// Request timed out (only when a timeout was configured).
    #[error("request timed out after {duration:?} - the helpdesk may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (401/403) - likely an invalid API key.
    #[error("authentication failed ({status}) - check FRESHDESK_API_KEY: {body}")]
    Authentication {
        /// 401 or 403.
        status: reqwest::StatusCode,
        /// Response body (sanitized).
        body: String,
    },

    /// A value was rejected by a model setter or façade argument check.
    #[error("validation error: {0}")]
    Validation(String),

    /// A model failed its `is_valid` check before being sent.
    #[error("invalid freshdesk {kind}")]
    InvalidModel {
        /// The kind of model ("contact", "ticket", "note", "ticket reply").
        kind: &'static str,
    },

    /// A named status or priority was read but never populated from metadata.
    #[error("{kind} {name} not set. Possibly deleted on the Freshdesk")]
    FieldNotSet {
        /// "status" or "priority".
        kind: &'static str,
        /// The accessor that was read (e.g. "Pending").
        name: &'static str,
    },

    /// The ticket field metadata does not define the requested field.
    #[error("ticket field '{name}' not present in helpdesk metadata")]
    MissingTicketField {
        /// Name of the missing field ("status" or "priority").
        name: String,
    },

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl FreshdeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        FreshdeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        FreshdeskError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        FreshdeskError::Validation(message.into())
    }

    /// Creates an error for a model that failed `is_valid`.
    pub fn invalid_model(kind: &'static str) -> Self {
        FreshdeskError::InvalidModel { kind }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        FreshdeskError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        FreshdeskError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if the error was raised locally, before any request was sent.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            FreshdeskError::Config(_)
                | FreshdeskError::Validation(_)
                | FreshdeskError::InvalidModel { .. }
                | FreshdeskError::FieldNotSet { .. }
        )
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// API keys must never appear in logs, error messages, or tool responses.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_error() {
        let err = FreshdeskError::missing_env("FRESHDESK_API_KEY");
        assert!(err.to_string().contains("FRESHDESK_API_KEY"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_validation_error() {
        let err = FreshdeskError::validation("Invalid ticket subject");
        assert_eq!(err.to_string(), "validation error: Invalid ticket subject");
        assert!(err.is_local());
    }

    #[test]
    fn test_invalid_model_error() {
        let err = FreshdeskError::invalid_model("contact");
        assert_eq!(err.to_string(), "invalid freshdesk contact");
    }

    #[test]
    fn test_field_not_set_mentions_remote_deletion() {
        let err = FreshdeskError::FieldNotSet {
            kind: "status",
            name: "Pending",
        };
        let msg = err.to_string();
        assert!(msg.contains("Pending"));
        assert!(msg.contains("Possibly deleted"));
        assert!(err.is_local());
    }

    #[test]
    fn test_timeout_error() {
        let err = FreshdeskError::timeout(Duration::from_secs(30), "GET /tickets//1");
        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("30s"));
        assert!(!err.is_local());
    }

    #[test]
    fn test_http_status_is_not_local() {
        let err = FreshdeskError::HttpStatus {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "{\"description\":\"Validation failed\"}".to_string(),
        };
        assert!(!err.is_local());
        assert!(err.to_string().starts_with("HTTP 400"));
    }

    #[test]
    fn test_sanitize_message_removes_api_key() {
        let api_key = "super_secret_key_12345";
        let message = format!("Error connecting with key {} to server", api_key);
        let sanitized = FreshdeskError::sanitize_message(&message, api_key);
        assert!(!sanitized.contains(api_key));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_key() {
        let message = "Some error message";
        let sanitized = FreshdeskError::sanitize_message(message, "");
        assert_eq!(sanitized, message);
    }

    #[test]
    fn test_sanitized_display() {
        let err = FreshdeskError::connection_test("key abc123 rejected");
        let msg = err.sanitized_display("abc123");
        assert!(msg.contains("connection test failed"));
        assert!(!msg.contains("abc123"));
    }
}
