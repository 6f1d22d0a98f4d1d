//! Error types for use cases
//!
//! Each family of use cases gets one enum; the API layer maps them to HTTP
//! statuses.

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

/// Errors from recording an interaction
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors from read-only resource views (catalogue, saved, uploads)
#[derive(Debug, Error)]
pub enum ResourceQueryError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors from uploading a resource
#[derive(Debug, Error)]
pub enum CreateResourceError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("User not found: {0}")]
    UploaderNotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors from deleting a resource
#[derive(Debug, Error)]
pub enum DeleteResourceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors from building the leaderboard
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
