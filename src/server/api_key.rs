//! API key verification middleware
//!
//! Every non-health route requires the x-api-key header to match the
//! process-configured secret. The comparison is constant-time.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use super::AppState;
use crate::error::AnfGateError;

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AnfGateError> {
    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AnfGateError::authentication("Missing API Key"))?;

    let expected = state.settings.api_key.as_bytes();
    if presented.as_bytes().ct_eq(expected).unwrap_u8() != 1 {
        return Err(AnfGateError::authentication("Invalid API Key"));
    }

    Ok(next.run(request).await)
}
