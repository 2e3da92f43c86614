//! Account route handlers

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use super::{mutation_response, AppState, WaitQuery};
use crate::error::AnfGateError;
use crate::netapp::{AccountCreateRequest, NetAppAccount};

/// GET /accounts - List NetApp accounts
pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<NetAppAccount>>, AnfGateError> {
    let accounts = state.manager.list_accounts().await?;
    Ok(Json(accounts))
}

/// POST /accounts - Create a NetApp account
pub(crate) async fn create(
    State(state): State<AppState>,
    Query(WaitQuery { wait }): Query<WaitQuery>,
    Json(body): Json<AccountCreateRequest>,
) -> Result<Response, AnfGateError> {
    let outcome = state.manager.create_account(&body, wait).await?;
    Ok(mutation_response(outcome))
}

/// DELETE /accounts/{name} - Delete a NetApp account
pub(crate) async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(WaitQuery { wait }): Query<WaitQuery>,
) -> Result<Response, AnfGateError> {
    let outcome = state.manager.delete_account(&name, wait).await?;
    Ok(mutation_response(outcome))
}
