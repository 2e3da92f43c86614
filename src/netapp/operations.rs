//! NetApp control-plane operations
//!
//! This module implements account and capacity pool operations against the
//! Azure Resource Manager REST API, including submission of long-running
//! mutations and polling of their status endpoints.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::models::{
    AccountCreateRequest, CapacityPool, NetAppAccount, OperationHandle, OperationStatus, PoolSpec,
    PoolUpdate, Submission,
};
use crate::auth::provider::AzureAuthProvider;
use crate::error::{AnfGateError, Result};
use crate::utils::network::{classify_network_error, create_http_client, NetworkConfig};

const ARM_API_VERSION: &str = "2023-07-01";
const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Trait for NetApp control-plane operations
///
/// The external collaborator seam: one implementation talks to ARM, test
/// doubles stand in for it. Every method issues at most one remote call;
/// retry policy, if any, is the implementation's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetAppOperations: Send + Sync {
    /// List NetApp accounts in the configured resource group
    async fn list_accounts(&self) -> Result<Vec<NetAppAccount>>;

    /// Submit an account create-or-update
    async fn create_account(&self, request: &AccountCreateRequest) -> Result<Submission>;

    /// Submit an account delete
    async fn delete_account(&self, account: &str) -> Result<Submission>;

    /// List capacity pools under an account
    async fn list_pools(&self, account: &str) -> Result<Vec<CapacityPool>>;

    /// Submit a pool create-or-update
    async fn create_pool(&self, spec: &PoolSpec) -> Result<Submission>;

    /// Submit a pool resize/retier
    async fn update_pool(&self, account: &str, pool: &str, update: &PoolUpdate)
        -> Result<Submission>;

    /// Submit a pool delete
    async fn delete_pool(&self, account: &str, pool: &str) -> Result<Submission>;

    /// Poll a long-running operation once
    async fn poll(&self, handle: &OperationHandle) -> Result<OperationStatus>;

    /// Fetch the current resource representation behind a URL
    async fn fetch(&self, resource_url: &str) -> Result<Value>;
}

/// Azure NetApp Files operations implementation
pub struct AzureNetAppOperations {
    auth_provider: Arc<dyn AzureAuthProvider>,
    http_client: Client,
    management_endpoint: String,
    subscription_id: String,
    resource_group: String,
}

impl AzureNetAppOperations {
    /// Create a new Azure NetApp operations instance
    pub fn new(
        auth_provider: Arc<dyn AzureAuthProvider>,
        subscription_id: String,
        resource_group: String,
    ) -> Result<Self> {
        let network_config = NetworkConfig::default();
        let http_client = create_http_client(&network_config)?;

        Ok(Self {
            auth_provider,
            http_client,
            management_endpoint: DEFAULT_MANAGEMENT_ENDPOINT.to_string(),
            subscription_id,
            resource_group,
        })
    }

    /// Use a non-default ARM endpoint (sovereign clouds, local stubs)
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.management_endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Get access token for Azure Resource Manager
    async fn get_management_token(&self) -> Result<String> {
        let token = self
            .auth_provider
            .get_token(&["https://management.azure.com/.default"])
            .await?;
        Ok(token.token.secret().to_string())
    }

    /// Create authorized headers for Azure REST API
    async fn create_headers(&self) -> Result<HeaderMap> {
        let token = self.get_management_token().await?;
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", token).parse().map_err(|e| {
                AnfGateError::authentication(format!("Invalid token format: {}", e))
            })?,
        );
        headers.insert("Content-Type", "application/json".parse().unwrap());
        Ok(headers)
    }

    /// Build Azure Resource Manager URL with the pinned api-version
    fn build_arm_url(&self, path: &str) -> String {
        format!(
            "{}{}?api-version={}",
            self.management_endpoint, path, ARM_API_VERSION
        )
    }

    fn accounts_path(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.NetApp/netAppAccounts",
            self.subscription_id, self.resource_group
        )
    }

    fn account_path(&self, account: &str) -> String {
        format!("{}/{}", self.accounts_path(), account)
    }

    fn pool_path(&self, account: &str, pool: &str) -> String {
        format!("{}/capacityPools/{}", self.account_path(account), pool)
    }

    /// Parse Azure error response, keeping the remote status and message
    fn parse_arm_error(&self, status: u16, body: &str) -> AnfGateError {
        if let Ok(error_json) = serde_json::from_str::<Value>(body) {
            if let Some(message) = error_json
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return AnfGateError::azure_api(status, message);
            }
        }
        AnfGateError::azure_api(status, body)
    }

    /// Turn a mutating response into a Submission, capturing the LRO
    /// polling reference from the Azure-AsyncOperation or Location header
    async fn read_submission(
        &self,
        response: reqwest::Response,
        resource_url: Option<String>,
    ) -> Result<Submission> {
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.parse_arm_error(status.as_u16(), &error_body));
        }

        let status_url = response
            .headers()
            .get("azure-asyncoperation")
            .or_else(|| response.headers().get("location"))
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let text = response.text().await.unwrap_or_default();
        let resource = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        Ok(Submission {
            resource,
            handle: status_url.map(|url| OperationHandle {
                status_url: url,
                resource_url,
            }),
        })
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let headers = self.create_headers().await?;
        let response = self
            .http_client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, url))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.parse_arm_error(status_code, &error_body));
        }

        response.json().await.map_err(|e| {
            AnfGateError::serialization(format!("Failed to parse ARM response: {}", e))
        })
    }
}

#[async_trait]
impl NetAppOperations for AzureNetAppOperations {
    async fn list_accounts(&self) -> Result<Vec<NetAppAccount>> {
        let url = self.build_arm_url(&self.accounts_path());
        let response_data = self.get_json(&url).await?;

        let accounts = response_data
            .get("value")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| NetAppAccount::from_arm(entry).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(accounts)
    }

    async fn create_account(&self, request: &AccountCreateRequest) -> Result<Submission> {
        let url = self.build_arm_url(&self.account_path(&request.name));
        debug!(account = %request.name, "submitting account create");

        let active_directories = match &request.active_directory {
            Some(ad) => json!([ad]),
            None => json!([]),
        };
        let body = json!({
            "location": request.location,
            "properties": {
                "activeDirectories": active_directories
            }
        });

        let headers = self.create_headers().await?;
        let response = self
            .http_client
            .put(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        self.read_submission(response, Some(url)).await
    }

    async fn delete_account(&self, account: &str) -> Result<Submission> {
        let url = self.build_arm_url(&self.account_path(account));
        debug!(account = %account, "submitting account delete");

        let headers = self.create_headers().await?;
        let response = self
            .http_client
            .delete(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        self.read_submission(response, None).await
    }

    async fn list_pools(&self, account: &str) -> Result<Vec<CapacityPool>> {
        let url = self.build_arm_url(&format!("{}/capacityPools", self.account_path(account)));
        let response_data = self.get_json(&url).await?;

        let pools = response_data
            .get("value")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| CapacityPool::from_arm(entry).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(pools)
    }

    async fn create_pool(&self, spec: &PoolSpec) -> Result<Submission> {
        let url = self.build_arm_url(&self.pool_path(&spec.account, &spec.pool));
        debug!(account = %spec.account, pool = %spec.pool, "submitting pool create");

        let body = json!({
            "location": spec.location,
            "properties": {
                "serviceLevel": spec.service_level,
                "size": spec.size_bytes()
            }
        });

        let headers = self.create_headers().await?;
        let response = self
            .http_client
            .put(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        self.read_submission(response, Some(url)).await
    }

    async fn update_pool(
        &self,
        account: &str,
        pool: &str,
        update: &PoolUpdate,
    ) -> Result<Submission> {
        let url = self.build_arm_url(&self.pool_path(account, pool));
        debug!(account = %account, pool = %pool, "submitting pool update");

        let mut properties = serde_json::Map::new();
        if let Some(size) = update.size_bytes() {
            properties.insert("size".to_string(), json!(size));
        }
        if let Some(level) = update.service_level {
            properties.insert("serviceLevel".to_string(), json!(level));
        }
        let body = json!({ "properties": properties });

        let headers = self.create_headers().await?;
        let response = self
            .http_client
            .patch(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        self.read_submission(response, Some(url)).await
    }

    async fn delete_pool(&self, account: &str, pool: &str) -> Result<Submission> {
        let url = self.build_arm_url(&self.pool_path(account, pool));
        debug!(account = %account, pool = %pool, "submitting pool delete");

        let headers = self.create_headers().await?;
        let response = self
            .http_client
            .delete(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        self.read_submission(response, None).await
    }

    async fn poll(&self, handle: &OperationHandle) -> Result<OperationStatus> {
        let headers = self.create_headers().await?;
        let response = self
            .http_client
            .get(&handle.status_url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &handle.status_url))?;

        let status_code = response.status();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        if !status_code.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.parse_arm_error(status_code.as_u16(), &error_body));
        }

        // A bare 202 means the operation is still running
        if status_code.as_u16() == 202 {
            return Ok(OperationStatus::InProgress { retry_after });
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(_) => return Ok(OperationStatus::InProgress { retry_after }),
        };

        // Azure-AsyncOperation bodies report "status"; Location-header
        // polling returns the resource itself with a provisioningState.
        let state = body
            .get("status")
            .and_then(|s| s.as_str())
            .or_else(|| {
                body.pointer("/properties/provisioningState")
                    .and_then(|s| s.as_str())
            })
            .unwrap_or("InProgress");

        match state {
            "Succeeded" => Ok(OperationStatus::Succeeded),
            "Failed" | "Canceled" => {
                let message = body
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("Long-running operation failed")
                    .to_string();
                // The terminal poll body carries no HTTP status of its own
                Ok(OperationStatus::Failed {
                    status: 500,
                    message,
                })
            }
            _ => Ok(OperationStatus::InProgress { retry_after }),
        }
    }

    async fn fetch(&self, resource_url: &str) -> Result<Value> {
        self.get_json(resource_url).await
    }
}
