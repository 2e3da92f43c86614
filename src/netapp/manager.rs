//! NetApp management facade
//!
//! This module provides the high-level interface the HTTP handlers call
//! into: it validates caller input, submits exactly one mutating call per
//! invocation to the control-plane collaborator, and normalizes the
//! wait/no-wait dichotomy into a tagged [`MutationOutcome`].

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use super::models::{
    AccountCreateRequest, CapacityPool, MutationOutcome, NetAppAccount, OperationStatus, PoolSpec,
    PoolUpdate, Submission,
};
use super::operations::NetAppOperations;
use crate::error::{AnfGateError, Result};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// What a finished mutation should hand back to the caller
enum Completion {
    Account,
    Pool,
    Deleted,
}

/// High-level NetApp manager
pub struct NetAppManager {
    ops: Arc<dyn NetAppOperations>,
    poll_interval: Duration,
}

impl NetAppManager {
    /// Create a new NetApp manager over a control-plane collaborator
    pub fn new(ops: Arc<dyn NetAppOperations>) -> Self {
        Self {
            ops,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the pacing used when ARM omits a Retry-After header
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// List NetApp accounts in the configured resource group
    pub async fn list_accounts(&self) -> Result<Vec<NetAppAccount>> {
        self.ops.list_accounts().await
    }

    /// Create a NetApp account
    pub async fn create_account(
        &self,
        request: &AccountCreateRequest,
        wait: bool,
    ) -> Result<MutationOutcome> {
        request.validate()?;
        info!(account = %request.name, wait, "creating NetApp account");

        let submission = self.ops.create_account(request).await?;
        self.resolve(submission, wait, Completion::Account).await
    }

    /// Delete a NetApp account
    pub async fn delete_account(&self, account: &str, wait: bool) -> Result<MutationOutcome> {
        info!(account = %account, wait, "deleting NetApp account");

        let submission = self.ops.delete_account(account).await?;
        self.resolve(submission, wait, Completion::Deleted).await
    }

    /// List capacity pools under an account
    pub async fn list_pools(&self, account: &str) -> Result<Vec<CapacityPool>> {
        self.ops.list_pools(account).await
    }

    /// Create a capacity pool
    pub async fn create_pool(&self, spec: &PoolSpec, wait: bool) -> Result<MutationOutcome> {
        spec.validate()?;
        info!(account = %spec.account, pool = %spec.pool, wait, "creating capacity pool");

        let submission = self.ops.create_pool(spec).await?;
        self.resolve(submission, wait, Completion::Pool).await
    }

    /// Resize or retier a capacity pool
    pub async fn update_pool(
        &self,
        account: &str,
        pool: &str,
        update: &PoolUpdate,
        wait: bool,
    ) -> Result<MutationOutcome> {
        update.validate()?;
        info!(account = %account, pool = %pool, wait, "updating capacity pool");

        let submission = self.ops.update_pool(account, pool, update).await?;
        self.resolve(submission, wait, Completion::Pool).await
    }

    /// Delete a capacity pool
    pub async fn delete_pool(&self, account: &str, pool: &str, wait: bool) -> Result<MutationOutcome> {
        info!(account = %account, pool = %pool, wait, "deleting capacity pool");

        let submission = self.ops.delete_pool(account, pool).await?;
        self.resolve(submission, wait, Completion::Deleted).await
    }

    /// The wait/no-wait branch around a submitted mutation
    ///
    /// With `wait == false` the operation handle is returned as-is. With
    /// `wait == true` the handle is polled until terminal; the suspension
    /// stays confined to the calling task.
    async fn resolve(
        &self,
        submission: Submission,
        wait: bool,
        completion: Completion,
    ) -> Result<MutationOutcome> {
        let Submission { resource, handle } = submission;

        if !wait {
            return Ok(match handle {
                Some(handle) => MutationOutcome::Pending(handle),
                // ARM finished synchronously; there is no operation to report
                None => MutationOutcome::Completed(final_body(completion, resource)?),
            });
        }

        let resource = match handle {
            None => resource,
            Some(handle) => {
                loop {
                    match self.ops.poll(&handle).await? {
                        OperationStatus::InProgress { retry_after } => {
                            sleep(retry_after.unwrap_or(self.poll_interval)).await;
                        }
                        OperationStatus::Succeeded => break,
                        OperationStatus::Failed { status, message } => {
                            return Err(AnfGateError::azure_api(status, message));
                        }
                    }
                }

                match &handle.resource_url {
                    Some(url) => Some(self.ops.fetch(url).await?),
                    None => resource,
                }
            }
        };

        Ok(MutationOutcome::Completed(final_body(completion, resource)?))
    }
}

fn final_body(completion: Completion, resource: Option<Value>) -> Result<Value> {
    match completion {
        Completion::Deleted => Ok(json!({"status": "deleted"})),
        Completion::Account => match resource {
            Some(raw) => Ok(serde_json::to_value(NetAppAccount::from_arm(&raw)?)?),
            None => Ok(json!({"status": "succeeded"})),
        },
        Completion::Pool => match resource {
            Some(raw) => Ok(serde_json::to_value(CapacityPool::from_arm(&raw)?)?),
            None => Ok(json!({"status": "succeeded"})),
        },
    }
}
