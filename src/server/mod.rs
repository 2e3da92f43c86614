//! HTTP server module
//!
//! This module wires the gateway's REST surface: health probe, account and
//! pool routes behind the API-key check, and the mapping from mutation
//! outcomes and errors to HTTP responses.

pub mod accounts;
pub mod api_key;
pub mod error;
pub mod pools;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{middleware, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::config::Settings;
use crate::netapp::{MutationOutcome, NetAppManager};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub manager: Arc<NetAppManager>,
}

/// Query flag shared by all mutating routes
#[derive(Debug, Deserialize)]
pub struct WaitQuery {
    /// Wait for the long-running operation to finish
    #[serde(default)]
    pub wait: bool,
}

/// Create the gateway router
///
/// The original deployment used trailing-slash routes; both spellings are
/// registered so existing callers keep working.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route("/accounts/", get(accounts::list).post(accounts::create))
        .route("/accounts/{name}", delete(accounts::remove))
        .route(
            "/pools",
            get(pools::list)
                .post(pools::create)
                .patch(pools::update)
                .delete(pools::remove),
        )
        .route(
            "/pools/",
            get(pools::list)
                .post(pools::create)
                .patch(pools::update)
                .delete(pools::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_key::require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .with_state(state)
}

/// Liveness probe; never requires auth
async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// Shape a mutation outcome into the wire response
///
/// Pending operations answer 202 with a polling reference; completed ones
/// answer 200 with the final resource representation.
pub(crate) fn mutation_response(outcome: MutationOutcome) -> Response {
    match outcome {
        MutationOutcome::Completed(body) => (StatusCode::OK, Json(body)).into_response(),
        MutationOutcome::Pending(handle) => (
            StatusCode::ACCEPTED,
            Json(json!({"operation": handle.status_url})),
        )
            .into_response(),
    }
}
