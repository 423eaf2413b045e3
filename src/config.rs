//! Configuration management for the Freshdesk client.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::FreshdeskError;

/// Builds the default API root for a helpdesk subdomain.
pub fn default_base_url(helpdesk_name: &str) -> String {
    format!("https://{}.freshdesk.com/api/v2", helpdesk_name)
}

/// Configuration for connecting to a Freshdesk helpdesk.
///
/// The API key is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Helpdesk subdomain. In `https://acme.freshdesk.com`, this is `acme`.
    pub helpdesk_name: String,

    /// API key used as the Basic auth username.
    /// This value must never be logged or included in error messages.
    api_key: String,

    /// API root, `https://{helpdesk_name}.freshdesk.com/api/v2` unless overridden.
    pub base_url: String,

    /// Optional per-request timeout. No timeout is applied when `None`.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Creates a configuration for the given helpdesk and API key.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if either value is missing or invalid.
    pub fn new(
        helpdesk_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, FreshdeskError> {
        let helpdesk_name = Self::validate_helpdesk_name(helpdesk_name.into())?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FreshdeskError::invalid_config(
                "Freshdesk api key not provided on initialization",
            ));
        }
        Self::validate_api_key(&api_key)?;

        Ok(Config {
            base_url: default_base_url(&helpdesk_name),
            helpdesk_name,
            api_key,
            timeout: None,
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `FRESHDESK_HELPDESK_NAME`: the helpdesk subdomain
    /// - `FRESHDESK_API_KEY`: the agent API key
    ///
    /// # Optional Environment Variables
    ///
    /// - `FRESHDESK_BASE_URL`: overrides the API root (proxies, test servers)
    /// - `FRESHDESK_TIMEOUT_SECS`: per-request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, FreshdeskError> {
        let helpdesk_name = Self::get_required_env("FRESHDESK_HELPDESK_NAME")?;
        let api_key = Self::get_required_env("FRESHDESK_API_KEY")?;

        let mut config = Self::new(helpdesk_name, api_key)?;

        if let Some(base_url) = Self::get_optional_env("FRESHDESK_BASE_URL") {
            config = config.with_base_url(base_url)?;
        }

        if let Some(secs) = Self::get_optional_env("FRESHDESK_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                FreshdeskError::invalid_config("FRESHDESK_TIMEOUT_SECS must be a whole number")
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Overrides the API root.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if the URL is not an http(s) URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, FreshdeskError> {
        self.base_url = Self::validate_base_url(base_url.into())?;
        Ok(self)
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the API key. Never log the returned value.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, FreshdeskError> {
        env::var(name)
            .map_err(|_| FreshdeskError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(FreshdeskError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }

    /// Validates the helpdesk name is a usable subdomain label.
    fn validate_helpdesk_name(name: String) -> Result<String, FreshdeskError> {
        let name = name.trim().to_string();

        if name.is_empty() {
            return Err(FreshdeskError::invalid_config(
                "Freshdesk api not configured. Helpdesk name not provided",
            ));
        }

        let is_label = name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
            && !name.starts_with('-')
            && !name.ends_with('-');
        if !is_label {
            return Err(FreshdeskError::invalid_config(format!(
                "helpdesk name must be a subdomain label, got: {:?}",
                name.chars().take(50).collect::<String>()
            )));
        }

        Ok(name)
    }

    /// Validates and normalizes a base URL override.
    fn validate_base_url(url: String) -> Result<String, FreshdeskError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&url)
            .map_err(|e| FreshdeskError::invalid_config(format!("invalid base URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(FreshdeskError::invalid_config(
                "FRESHDESK_BASE_URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), FreshdeskError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(FreshdeskError::invalid_config(
                    "FRESHDESK_API_KEY appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("helpdesk_name", &self.helpdesk_name)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
