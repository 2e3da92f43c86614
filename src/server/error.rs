//! Error-to-response mapping
//!
//! Error responses carry a machine-readable status and a human-readable
//! detail string; control-plane failures keep their remote status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::error::AnfGateError;

pub(crate) fn status_for(error: &AnfGateError) -> StatusCode {
    match error {
        AnfGateError::ValidationError(_) => StatusCode::BAD_REQUEST,
        AnfGateError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
        AnfGateError::AzureApiError { status, .. } | AnfGateError::ApiError { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        AnfGateError::NetworkError(_) | AnfGateError::HttpError(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AnfGateError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        // Remote failures are passed through verbatim; everything else uses
        // the error's own rendering.
        let detail = match &self {
            AnfGateError::AzureApiError { message, .. } => message.clone(),
            AnfGateError::ApiError { body, .. } => body.clone(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            warn!(%status, %detail, "request failed");
        }

        (status, Json(json!({"detail": detail}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&AnfGateError::validation("bad size")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AnfGateError::authentication("Invalid API Key")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&AnfGateError::azure_api(409, "conflict")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&AnfGateError::network("unreachable")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&AnfGateError::unknown("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
