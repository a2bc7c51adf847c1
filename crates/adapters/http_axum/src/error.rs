//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smartpanel_domain::error::PanelError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PanelError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(PanelError);

impl From<PanelError> for ApiError {
    fn from(err: PanelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PanelError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PanelError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PanelError::Unsupported(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PanelError::Closed => {
                tracing::error!("panel actor unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "panel unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
