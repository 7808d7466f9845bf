//! HTTP client configuration module
//!
//! Centralized timeouts and connection settings for the clients that talk
//! to the calendar API and the OAuth token endpoint. There is no retry
//! policy: a failed request surfaces once as a notification.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
    /// Idle connections are dropped after this long
    pub pool_idle_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(45),
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl HttpConfig {
    /// Create default HTTP config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create HTTP config for calendar API calls
    pub fn calendar_api() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            pool_idle_timeout: Duration::from_secs(90),
        }
    }

    /// Create HTTP config for OAuth operations
    pub fn oauth() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(30),
        }
    }

    /// Build a reqwest client with this configuration
    pub fn build_client(&self) -> reqwest::Result<Client> {
        ClientBuilder::new()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(2)
            .user_agent(concat!("calpicker/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(HttpConfig::oauth().timeout < HttpConfig::calendar_api().timeout);
        assert_eq!(HttpConfig::new().connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_build_client() {
        assert!(HttpConfig::calendar_api().build_client().is_ok());
    }
}
