//! ARM operations tests
//!
//! Runs the management client against a stubbed ARM endpoint with a fixed
//! token provider: bearer header propagation, LRO handle capture, error
//! passthrough, and status polling.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use anfgate::auth::StaticTokenProvider;
use anfgate::error::AnfGateError;
use anfgate::netapp::{
    AzureNetAppOperations, NetAppOperations, OperationHandle, OperationStatus, PoolSpec,
    ServiceLevel,
};

const ACCOUNTS_PATH: &str =
    "/subscriptions/test-sub/resourceGroups/test-rg/providers/Microsoft.NetApp/netAppAccounts";

fn arm_ops(endpoint: String) -> AzureNetAppOperations {
    AzureNetAppOperations::new(
        Arc::new(StaticTokenProvider::new("test-token")),
        "test-sub".to_string(),
        "test-rg".to_string(),
    )
    .unwrap()
    .with_endpoint(endpoint)
}

fn pool_spec() -> PoolSpec {
    PoolSpec {
        account: "acct1".to_string(),
        pool: "pool1".to_string(),
        location: "eastus".to_string(),
        size_tb: 4,
        service_level: ServiceLevel::Premium,
    }
}

#[tokio::test]
async fn list_accounts_sends_bearer_token_and_parses_value_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACCOUNTS_PATH))
        .and(query_param("api-version", "2023-07-01"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {
                    "id": format!("{}/acct1", ACCOUNTS_PATH),
                    "name": "acct1",
                    "location": "eastus",
                    "properties": {"provisioningState": "Succeeded"}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ops = arm_ops(server.uri());
    let accounts = ops.list_accounts().await.unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "acct1");
}

#[tokio::test]
async fn pool_create_captures_async_operation_header() {
    let server = MockServer::start().await;
    let operation_url = format!("{}/operations/op-1", server.uri());

    Mock::given(method("PUT"))
        .and(path(format!("{}/acct1/capacityPools/pool1", ACCOUNTS_PATH)))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Azure-AsyncOperation", operation_url.as_str())
                .set_body_json(json!({
                    "name": "acct1/pool1",
                    "location": "eastus",
                    "properties": {"provisioningState": "Creating"}
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ops = arm_ops(server.uri());
    let submission = ops.create_pool(&pool_spec()).await.unwrap();

    let handle = submission.handle.expect("expected an operation handle");
    assert_eq!(handle.status_url, operation_url);
    let resource_url = handle.resource_url.expect("expected a resource URL");
    assert!(resource_url.contains("/capacityPools/pool1"));
    assert!(submission.resource.is_some());
}

#[tokio::test]
async fn arm_rejection_passes_status_and_message_through() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/acct1/capacityPools/pool1", ACCOUNTS_PATH)))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"code": "Conflict", "message": "Another operation is in progress"}
        })))
        .mount(&server)
        .await;

    let ops = arm_ops(server.uri());
    let err = ops.create_pool(&pool_spec()).await.unwrap_err();

    match err {
        AnfGateError::AzureApiError { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Another operation is in progress");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn poll_reads_status_and_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operations/op-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Retry-After", "7")
                .set_body_json(json!({"status": "InProgress"})),
        )
        .mount(&server)
        .await;

    let ops = arm_ops(server.uri());
    let handle = OperationHandle {
        status_url: format!("{}/operations/op-1", server.uri()),
        resource_url: None,
    };

    match ops.poll(&handle).await.unwrap() {
        OperationStatus::InProgress { retry_after } => {
            assert_eq!(retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("unexpected status: {other:?}"),
    }
}

#[tokio::test]
async fn poll_reports_terminal_failure_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operations/op-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Failed",
            "error": {"code": "PoolSizeTooSmall", "message": "Requested size is below the minimum"}
        })))
        .mount(&server)
        .await;

    let ops = arm_ops(server.uri());
    let handle = OperationHandle {
        status_url: format!("{}/operations/op-2", server.uri()),
        resource_url: None,
    };

    match ops.poll(&handle).await.unwrap() {
        OperationStatus::Failed { message, .. } => {
            assert_eq!(message, "Requested size is below the minimum");
        }
        other => panic!("unexpected status: {other:?}"),
    }
}

#[tokio::test]
async fn delete_uses_location_header_when_async_operation_absent() {
    let server = MockServer::start().await;
    let operation_url = format!("{}/operations/op-3", server.uri());

    Mock::given(method("DELETE"))
        .and(path(format!("{}/acct1", ACCOUNTS_PATH)))
        .respond_with(ResponseTemplate::new(202).insert_header("Location", operation_url.as_str()))
        .expect(1)
        .mount(&server)
        .await;

    let ops = arm_ops(server.uri());
    let submission = ops.delete_account("acct1").await.unwrap();

    let handle = submission.handle.expect("expected an operation handle");
    assert_eq!(handle.status_url, operation_url);
    assert!(handle.resource_url.is_none());
}
