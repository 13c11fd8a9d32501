//! HTTP mapping for `TempestError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use tempest_core::error::TempestError;

/// Handler error; wraps the core error so it can implement `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub TempestError);

impl From<TempestError> for ApiError {
    fn from(e: TempestError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            // The dashboard script reads only `error` from a 200 map lookup.
            TempestError::UnknownSession => {
                return (StatusCode::OK, Json(json!({ "error": "Invalid map ID" }))).into_response();
            }
            TempestError::BadConfig(_) => StatusCode::BAD_REQUEST,
            TempestError::FetchFailed(_)
            | TempestError::UpstreamStatus(_)
            | TempestError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            TempestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.0.to_string(),
            "code": self.0.client_code().as_str(),
        }));
        (status, body).into_response()
    }
}
