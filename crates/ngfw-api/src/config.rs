//! API client configuration
//!
//! Connection settings shared by all per-kind clients. Authentication is
//! handled by the transport layer and does not appear here.

use serde::{Deserialize, Serialize};

/// Settings for reaching one regional API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// AWS region the API endpoint lives in. Also a component of firewall
    /// composite identifiers.
    pub region: String,

    /// Override for the API host. When absent, the well-known regional
    /// endpoint is derived from `region`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_read_timeout() -> u64 {
    60
}

impl ApiConfig {
    /// Create a configuration for the given region with default timeouts.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint: None,
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
        }
    }

    /// Set an explicit endpoint host.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Set the read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, secs: u64) -> Self {
        self.read_timeout_secs = secs;
        self
    }

    /// Get the connection timeout as a `Duration`.
    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connect_timeout_secs)
    }

    /// Get the read timeout as a `Duration`.
    pub fn read_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.read_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ApiConfig::new("us-east-1");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.read_timeout_secs, 60);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = ApiConfig::new("eu-west-1")
            .with_endpoint("api.example.test")
            .with_connect_timeout(5)
            .with_read_timeout(10);
        assert_eq!(config.endpoint.as_deref(), Some("api.example.test"));
        assert_eq!(config.connect_timeout().as_secs(), 5);
        assert_eq!(config.read_timeout().as_secs(), 10);
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"region":"us-west-2"}"#).unwrap();
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.read_timeout_secs, 60);
    }
}
