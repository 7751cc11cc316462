pub mod events;
pub mod profiles;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use zonemeet_core::SchedError;

/// Standard API error response. `code` carries the error category so clients
/// can branch without parsing the message.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

/// Maps the service error taxonomy to HTTP responses.
pub struct ApiError(SchedError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SchedError::MissingField(_)
            | SchedError::InvalidTimezone(_)
            | SchedError::InvalidTimeFormat(_)
            | SchedError::InvalidRange => StatusCode::BAD_REQUEST,
            SchedError::ProfileNotFound(_) | SchedError::EventNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            SchedError::Config(_) | SchedError::Io(_) | SchedError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "internal failure");
        }

        let body = Json(ErrorResponse {
            code: self.0.code(),
            message: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<SchedError> for ApiError {
    fn from(err: SchedError) -> Self {
        ApiError(err)
    }
}
