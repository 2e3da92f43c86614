//! Capacity pool route handlers

use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::{mutation_response, AppState, WaitQuery};
use crate::error::AnfGateError;
use crate::netapp::{CapacityPool, PoolSpec, PoolUpdate, ServiceLevel};

#[derive(Debug, Deserialize)]
pub(crate) struct PoolListQuery {
    pub account: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PoolUpdateQuery {
    pub account: String,
    pub pool: String,
    pub new_size_tb: Option<i64>,
    pub service_level: Option<ServiceLevel>,
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PoolDeleteQuery {
    pub account: String,
    pub pool: String,
    #[serde(default)]
    pub wait: bool,
}

/// GET /pools?account= - List pools under an account
pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<PoolListQuery>,
) -> Result<Json<Vec<CapacityPool>>, AnfGateError> {
    let pools = state.manager.list_pools(&query.account).await?;
    Ok(Json(pools))
}

/// POST /pools - Create a capacity pool
pub(crate) async fn create(
    State(state): State<AppState>,
    Query(WaitQuery { wait }): Query<WaitQuery>,
    Json(spec): Json<PoolSpec>,
) -> Result<Response, AnfGateError> {
    let outcome = state.manager.create_pool(&spec, wait).await?;
    Ok(mutation_response(outcome))
}

/// PATCH /pools?account=&pool= - Resize or change tier
pub(crate) async fn update(
    State(state): State<AppState>,
    Query(query): Query<PoolUpdateQuery>,
) -> Result<Response, AnfGateError> {
    let update = PoolUpdate {
        new_size_tb: query.new_size_tb,
        service_level: query.service_level,
    };

    let outcome = state
        .manager
        .update_pool(&query.account, &query.pool, &update, query.wait)
        .await?;
    Ok(mutation_response(outcome))
}

/// DELETE /pools?account=&pool= - Delete a capacity pool
pub(crate) async fn remove(
    State(state): State<AppState>,
    Query(query): Query<PoolDeleteQuery>,
) -> Result<Response, AnfGateError> {
    let outcome = state
        .manager
        .delete_pool(&query.account, &query.pool, query.wait)
        .await?;
    Ok(mutation_response(outcome))
}
