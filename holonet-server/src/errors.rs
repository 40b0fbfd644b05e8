//! Transport level errors
//!
//! Only failures that never reach the GraphQL engine end up here. Anything
//! the engine sees is answered with a `{ data, errors }` envelope instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use holonet_interfaces::RepositoryError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },
}

pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "BAD_REQUEST",
            WebError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
        }
    }
}

impl From<RepositoryError> for WebError {
    fn from(error: RepositoryError) -> Self {
        Self::ServiceUnavailable {
            message: error.to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        });

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code() {
        let error = WebError::bad_request("query is required");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_code(), "BAD_REQUEST");
        assert_eq!(error.to_string(), "Bad request: query is required");

        let error = WebError::from(RepositoryError::Unavailable {
            message: "store offline".to_string(),
        });
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.error_code(), "SERVICE_UNAVAILABLE");
        assert!(error.to_string().contains("store offline"));
    }
}
