//! REST client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use folio_core::config::ClientSettings;

/// Configuration for the REST client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Base URL for API requests.
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum retry attempts for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Maximum retry delay in milliseconds.
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

fn default_max_retry_delay_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("Folio/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            max_retry_delay_ms: default_max_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl RestConfig {
    /// Creates a new builder for `RestConfig`.
    #[must_use]
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::default()
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Calculates the retry delay for a given attempt using exponential
    /// backoff.
    #[must_use]
    pub fn calculate_retry_delay(&self, attempt: u32) -> Duration {
        let delay = self.retry_delay_ms as f64 * 2.0_f64.powi(attempt as i32);
        let capped_delay = delay.min(self.max_retry_delay_ms as f64) as u64;
        Duration::from_millis(capped_delay)
    }

    /// Returns whether a retry should be attempted.
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

impl From<&ClientSettings> for RestConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout_ms: settings.timeout_ms,
            max_retries: settings.max_retries,
            retry_delay_ms: settings.retry_delay_ms,
            max_retry_delay_ms: settings.max_retry_delay_ms,
            user_agent: default_user_agent(),
        }
    }
}

/// Builder for `RestConfig`.
#[derive(Debug, Default)]
pub struct RestConfigBuilder {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    max_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
    max_retry_delay_ms: Option<u64>,
    user_agent: Option<String>,
}

impl RestConfigBuilder {
    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Sets the maximum retry attempts.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the initial retry delay.
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = Some(delay.as_millis() as u64);
        self
    }

    /// Sets the maximum retry delay.
    #[must_use]
    pub fn max_retry_delay(mut self, delay: Duration) -> Self {
        self.max_retry_delay_ms = Some(delay.as_millis() as u64);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the `RestConfig`.
    #[must_use]
    pub fn build(self) -> RestConfig {
        RestConfig {
            base_url: self.base_url.unwrap_or_default(),
            timeout_ms: self.timeout_ms.unwrap_or_else(default_timeout_ms),
            max_retries: self.max_retries.unwrap_or_else(default_max_retries),
            retry_delay_ms: self.retry_delay_ms.unwrap_or_else(default_retry_delay_ms),
            max_retry_delay_ms: self
                .max_retry_delay_ms
                .unwrap_or_else(default_max_retry_delay_ms),
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = RestConfig::builder()
            .base_url("https://api.example.com")
            .timeout(Duration::from_secs(15))
            .max_retries(5)
            .build();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_exponential_backoff() {
        let config = RestConfig::builder()
            .retry_delay(Duration::from_secs(1))
            .max_retry_delay(Duration::from_secs(30))
            .build();

        assert_eq!(config.calculate_retry_delay(0), Duration::from_secs(1));
        assert_eq!(config.calculate_retry_delay(1), Duration::from_secs(2));
        assert_eq!(config.calculate_retry_delay(2), Duration::from_secs(4));
        // Should cap at max
        assert_eq!(config.calculate_retry_delay(10), Duration::from_secs(30));
    }

    #[test]
    fn test_should_retry() {
        let config = RestConfig::builder().max_retries(3).build();
        assert!(config.should_retry(0));
        assert!(config.should_retry(2));
        assert!(!config.should_retry(3));
    }

    #[test]
    fn test_from_settings() {
        let settings = ClientSettings {
            base_url: "https://api.example.com".to_string(),
            timeout_ms: 5_000,
            ..ClientSettings::default()
        };
        let config = RestConfig::from(&settings);
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_ms, 5_000);
    }
}
