//! NetApp data models and types
//!
//! This module defines the data structures used for account and capacity
//! pool management, including request payloads, typed resource DTOs mapped
//! from the ARM wire shape, and the long-running-operation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::{AnfGateError, Result};

/// One tebibyte in bytes; ARM sizes capacity pools in bytes.
pub const BYTES_PER_TIB: i64 = 1 << 40;

/// Performance tier of a capacity pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceLevel {
    Standard,
    Premium,
    Ultra,
    #[serde(rename = "StandardZRS")]
    StandardZrs,
}

impl ServiceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceLevel::Standard => "Standard",
            ServiceLevel::Premium => "Premium",
            ServiceLevel::Ultra => "Ultra",
            ServiceLevel::StandardZrs => "StandardZRS",
        }
    }
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceLevel {
    type Err = AnfGateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Standard" => Ok(ServiceLevel::Standard),
            "Premium" => Ok(ServiceLevel::Premium),
            "Ultra" => Ok(ServiceLevel::Ultra),
            "StandardZRS" => Ok(ServiceLevel::StandardZrs),
            other => Err(AnfGateError::validation(format!(
                "Unknown service level: {}",
                other
            ))),
        }
    }
}

/// Request payload for creating a NetApp account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreateRequest {
    pub name: String,
    pub location: String,
    /// Optional Active Directory connection block, forwarded to ARM verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_directory: Option<Value>,
}

impl AccountCreateRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AnfGateError::validation("Account name must not be empty"));
        }
        if self.location.trim().is_empty() {
            return Err(AnfGateError::validation("Location must not be empty"));
        }
        Ok(())
    }
}

/// Request payload for creating a capacity pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSpec {
    pub account: String,
    pub pool: String,
    pub location: String,
    pub size_tb: i64,
    pub service_level: ServiceLevel,
}

impl PoolSpec {
    pub fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() || self.pool.trim().is_empty() {
            return Err(AnfGateError::validation(
                "Account and pool names must not be empty",
            ));
        }
        if self.size_tb <= 0 {
            return Err(AnfGateError::validation(
                "Pool size must be a positive number of TiB",
            ));
        }
        Ok(())
    }

    pub fn size_bytes(&self) -> i64 {
        self.size_tb * BYTES_PER_TIB
    }
}

/// Partial update of a capacity pool: resize, retier, or both
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolUpdate {
    pub new_size_tb: Option<i64>,
    pub service_level: Option<ServiceLevel>,
}

impl PoolUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.new_size_tb.is_none() && self.service_level.is_none() {
            return Err(AnfGateError::validation(
                "Specify new_size_tb or service_level",
            ));
        }
        if let Some(size_tb) = self.new_size_tb {
            if size_tb <= 0 {
                return Err(AnfGateError::validation(
                    "Pool size must be a positive number of TiB",
                ));
            }
        }
        Ok(())
    }

    pub fn size_bytes(&self) -> Option<i64> {
        self.new_size_tb.map(|tb| tb * BYTES_PER_TIB)
    }
}

/// Reference to an in-flight asynchronous control-plane mutation
///
/// Created at submission time, consumed by the poll loop, and discarded
/// once the operation is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationHandle {
    /// Polling URL from the Azure-AsyncOperation or Location header
    pub status_url: String,
    /// Where to fetch the final resource representation, if the mutation
    /// leaves one behind (deletes do not)
    pub resource_url: Option<String>,
}

/// What a mutating control-plane call handed back at submission time
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Resource body returned synchronously, if any
    pub resource: Option<Value>,
    /// Handle to the long-running operation, absent when ARM completed
    /// the mutation synchronously
    pub handle: Option<OperationHandle>,
}

/// State of a polled long-running operation
#[derive(Debug, Clone)]
pub enum OperationStatus {
    InProgress { retry_after: Option<Duration> },
    Succeeded,
    Failed { status: u16, message: String },
}

/// Result of a mutating call, discriminated by the caller's wait flag
#[derive(Debug, Clone)]
pub enum MutationOutcome {
    /// The mutation reached a terminal success state; carries the final
    /// resource representation
    Completed(Value),
    /// The mutation was acknowledged and is still running
    Pending(OperationHandle),
}

/// NetApp account resource, mapped from the ARM wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetAppAccount {
    pub id: String,
    pub name: String,
    pub location: String,
    pub provisioning_state: Option<String>,
    pub active_directories: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub tags: HashMap<String, String>,
}

impl NetAppAccount {
    /// Parse an ARM netAppAccounts response entry
    pub fn from_arm(account_data: &Value) -> Result<NetAppAccount> {
        let id = arm_string(account_data, "id");
        let name = arm_string(account_data, "name");
        let location = arm_string(account_data, "location");

        if name.is_empty() {
            return Err(AnfGateError::serialization(
                "Missing name in account response",
            ));
        }

        let properties = account_data.get("properties");

        Ok(NetAppAccount {
            id,
            name,
            location,
            provisioning_state: properties
                .and_then(|p| p.get("provisioningState"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            active_directories: properties
                .and_then(|p| p.get("activeDirectories"))
                .cloned(),
            created_at: arm_created_at(account_data),
            tags: arm_tags(account_data),
        })
    }
}

/// Capacity pool resource, mapped from the ARM wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityPool {
    pub id: String,
    /// Short pool name; ARM reports nested resources as "account/pool"
    pub name: String,
    pub location: String,
    pub pool_id: Option<String>,
    pub service_level: Option<ServiceLevel>,
    /// Provisioned size in bytes
    pub size: Option<i64>,
    pub provisioning_state: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub tags: HashMap<String, String>,
}

impl CapacityPool {
    /// Parse an ARM capacityPools response entry
    pub fn from_arm(pool_data: &Value) -> Result<CapacityPool> {
        let id = arm_string(pool_data, "id");
        let full_name = arm_string(pool_data, "name");
        let location = arm_string(pool_data, "location");

        if full_name.is_empty() {
            return Err(AnfGateError::serialization("Missing name in pool response"));
        }

        // "account/pool" for nested resources
        let name = full_name
            .rsplit('/')
            .next()
            .unwrap_or(&full_name)
            .to_string();

        let properties = pool_data.get("properties");

        Ok(CapacityPool {
            id,
            name,
            location,
            pool_id: properties
                .and_then(|p| p.get("poolId"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            service_level: properties
                .and_then(|p| p.get("serviceLevel"))
                .and_then(|v| v.as_str())
                .and_then(|s| s.parse().ok()),
            size: properties.and_then(|p| p.get("size")).and_then(|v| v.as_i64()),
            provisioning_state: properties
                .and_then(|p| p.get("provisioningState"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            created_at: arm_created_at(pool_data),
            tags: arm_tags(pool_data),
        })
    }
}

fn arm_string(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn arm_created_at(data: &Value) -> Option<DateTime<Utc>> {
    data.get("systemData")
        .and_then(|s| s.get("createdAt"))
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

fn arm_tags(data: &Value) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    if let Some(tags_obj) = data.get("tags").and_then(|v| v.as_object()) {
        for (key, value) in tags_obj {
            if let Some(val_str) = value.as_str() {
                tags.insert(key.clone(), val_str.to_string());
            }
        }
    }
    tags
}
