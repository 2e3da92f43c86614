use crate::error::{AnfGateError, Result};
use reqwest::Client;
use std::time::Duration;

/// Configuration for HTTP client with proper timeouts
pub struct NetworkConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
            user_agent: format!("anfgate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a properly configured HTTP client with timeouts
pub fn create_http_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| AnfGateError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Map a reqwest transport failure to a user-facing network error
pub fn classify_network_error(error: &reqwest::Error, url: &str) -> AnfGateError {
    if error.is_timeout() {
        return AnfGateError::network(format!("Request to {} timed out", url));
    }

    if error.is_connect() {
        return AnfGateError::network(format!(
            "Failed to connect to {}. Please check your network connection.",
            url
        ));
    }

    if error.is_request() {
        return AnfGateError::network(format!("Invalid request to {}: {}", url, error));
    }

    AnfGateError::network(format!("Network error when accessing {}: {}", url, error))
}
