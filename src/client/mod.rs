//! Thin gateway client
//!
//! A consumer-side HTTP wrapper for the gateway's own REST surface. Every
//! request carries the x-api-key header; any non-success response raises a
//! typed error with the remote status and body. No retries, no caching.

use reqwest::{Client, Method};
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{AnfGateError, Result};
use crate::netapp::{AccountCreateRequest, PoolSpec, PoolUpdate};
use crate::utils::network::{classify_network_error, create_http_client, NetworkConfig};

/// HTTP client for the anfgate REST API
pub struct GatewayClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let network_config = NetworkConfig::default();
        let http_client = create_http_client(&network_config)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http_client,
        })
    }

    /// Issue a request and decode the JSON payload
    ///
    /// Fails with `ApiError { status, body }` for any response outside the
    /// success range.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http_client
            .request(method, &url)
            .header("x-api-key", &self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AnfGateError::api(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            AnfGateError::serialization(format!("Failed to parse gateway response: {}", e))
        })
    }

    /// GET /health
    pub async fn health(&self) -> Result<Value> {
        self.request(Method::GET, "/health", None).await
    }

    /// GET /accounts
    pub async fn list_accounts(&self) -> Result<Value> {
        self.request(Method::GET, "/accounts", None).await
    }

    /// POST /accounts
    pub async fn create_account(
        &self,
        request: &AccountCreateRequest,
        wait: bool,
    ) -> Result<Value> {
        let body = serde_json::to_value(request)?;
        self.request(
            Method::POST,
            &format!("/accounts?wait={}", wait),
            Some(&body),
        )
        .await
    }

    /// DELETE /accounts/{name}
    pub async fn delete_account(&self, name: &str, wait: bool) -> Result<Value> {
        self.request(
            Method::DELETE,
            &format!("/accounts/{}?wait={}", name, wait),
            None,
        )
        .await
    }

    /// GET /pools?account=
    pub async fn list_pools(&self, account: &str) -> Result<Value> {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("account", account)
            .finish();
        self.request(Method::GET, &format!("/pools?{}", query), None)
            .await
    }

    /// POST /pools
    pub async fn create_pool(&self, spec: &PoolSpec, wait: bool) -> Result<Value> {
        let body = serde_json::to_value(spec)?;
        self.request(Method::POST, &format!("/pools?wait={}", wait), Some(&body))
            .await
    }

    /// PATCH /pools?account=&pool=
    pub async fn update_pool(
        &self,
        account: &str,
        pool: &str,
        update: &PoolUpdate,
        wait: bool,
    ) -> Result<Value> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("account", account);
        query.append_pair("pool", pool);
        if let Some(size_tb) = update.new_size_tb {
            query.append_pair("new_size_tb", &size_tb.to_string());
        }
        if let Some(level) = update.service_level {
            query.append_pair("service_level", level.as_str());
        }
        query.append_pair("wait", &wait.to_string());

        self.request(Method::PATCH, &format!("/pools?{}", query.finish()), None)
            .await
    }

    /// DELETE /pools?account=&pool=
    pub async fn delete_pool(&self, account: &str, pool: &str, wait: bool) -> Result<Value> {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("account", account)
            .append_pair("pool", pool)
            .append_pair("wait", &wait.to_string())
            .finish();
        self.request(Method::DELETE, &format!("/pools?{}", query), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GatewayClient::new("http://localhost:8080/", "key").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
