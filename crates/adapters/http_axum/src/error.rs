//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homegraph_domain::error::HomeGraphError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeGraphError`] to an HTTP response with appropriate status code.
pub struct ApiError(HomeGraphError);

impl From<HomeGraphError> for ApiError {
    fn from(err: HomeGraphError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HomeGraphError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HomeGraphError::Unsupported(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HomeGraphError::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HomeGraphError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HomeGraphError::Serialization(err) => {
                tracing::error!(error = %err, "serialization error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
