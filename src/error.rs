use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::agent::AgentError;

/// Errors returned by API handlers.
///
/// Agent failures carry the underlying error for logging only; the client
/// sees a fixed message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("agent execution failed: {0}")]
    Agent(AgentError),

    #[error("agent unavailable: {0}")]
    AgentUnavailable(AgentError),

    #[error("not found")]
    NotFound,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Agent(_) | ApiError::AgentUnavailable(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to send to the client.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Agent(_) => "agent failed to process the request".to_string(),
            ApiError::AgentUnavailable(_) => "agent is unavailable".to_string(),
            ApiError::NotFound => "not found".to_string(),
            ApiError::Internal => "internal error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            error!("{}", self);
        }
        let body = json!({
            "error": self.public_message(),
            "success": false,
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_errors_are_sanitized() {
        let err = ApiError::Agent(AgentError::Service("Traceback: secret at /srv/app.py".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("secret"));
        // The full error is still available for logs.
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn bad_request_keeps_message() {
        let err = ApiError::BadRequest("message is required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "message is required");
    }
}
