//! Configuration settings management
//!
//! This module handles loading process configuration from the environment
//! and validating it at startup.

use crate::error::{AnfGateError, Result};
use serde::{Deserialize, Serialize};

fn default_api_key() -> String {
    "changeme".to_string()
}

/// Process configuration, loaded once at startup and shared read-only
/// across request handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Shared secret checked against the x-api-key header
    #[serde(rename = "mcp_api_key", default = "default_api_key")]
    pub api_key: String,

    /// Target subscription for all control-plane calls
    #[serde(rename = "azure_subscription_id", default)]
    pub subscription_id: String,

    /// Resource group containing the NetApp accounts
    #[serde(rename = "azure_resource_group", default)]
    pub resource_group: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            subscription_id: String::new(),
            resource_group: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// Reads MCP_API_KEY, AZURE_SUBSCRIPTION_ID and AZURE_RESOURCE_GROUP.
    /// Missing subscription or resource group is a fatal startup condition.
    pub fn load() -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.subscription_id.is_empty() || self.resource_group.is_empty() {
            return Err(AnfGateError::config(
                "AZURE_SUBSCRIPTION_ID and AZURE_RESOURCE_GROUP must be set in the environment",
            ));
        }

        Ok(())
    }
}
