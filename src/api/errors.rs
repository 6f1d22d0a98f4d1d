use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::errors::{
    CreateResourceError, DeleteResourceError, InteractionError, LeaderboardError,
    ResourceQueryError,
};
use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}

/// Store failures are logged in full and surfaced generically
fn store_failure(err: RepositoryError) -> ApiError {
    tracing::error!(error = %err, "repository operation failed");
    ApiError::internal_error("Internal server error")
}

fn domain_failure(err: DomainError) -> ApiError {
    match err {
        DomainError::UploaderBanned => ApiError::forbidden("Banned"),
        DomainError::UploaderRestricted => ApiError::forbidden("Restricted"),
        other => ApiError::bad_request(other.to_string()),
    }
}

// Convert use case errors to API errors

impl From<InteractionError> for ApiError {
    fn from(err: InteractionError) -> Self {
        match err {
            InteractionError::InvalidRequest(msg) => ApiError::bad_request(msg),
            InteractionError::Domain(e) => domain_failure(e),
            InteractionError::NotFound(_) => ApiError::not_found("Resource not found"),
            InteractionError::Repository(e) => store_failure(e),
        }
    }
}

impl From<ResourceQueryError> for ApiError {
    fn from(err: ResourceQueryError) -> Self {
        match err {
            ResourceQueryError::InvalidRequest(msg) => ApiError::bad_request(msg),
            ResourceQueryError::Domain(e) => domain_failure(e),
            ResourceQueryError::NotFound(_) => ApiError::not_found("Resource not found"),
            ResourceQueryError::Repository(e) => store_failure(e),
        }
    }
}

impl From<CreateResourceError> for ApiError {
    fn from(err: CreateResourceError) -> Self {
        match err {
            CreateResourceError::InvalidRequest(msg) => ApiError::bad_request(msg),
            CreateResourceError::Domain(e) => domain_failure(e),
            CreateResourceError::UploaderNotFound(_) => ApiError::not_found("User not found"),
            CreateResourceError::Repository(e) => store_failure(e),
        }
    }
}

impl From<DeleteResourceError> for ApiError {
    fn from(err: DeleteResourceError) -> Self {
        match err {
            DeleteResourceError::Domain(e) => domain_failure(e),
            DeleteResourceError::NotFound(_) => ApiError::not_found("Resource not found"),
            DeleteResourceError::Forbidden(msg) => ApiError::forbidden(msg),
            DeleteResourceError::Repository(e) => store_failure(e),
        }
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(err: LeaderboardError) -> Self {
        match err {
            LeaderboardError::Repository(e) => store_failure(e),
        }
    }
}
