use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Resource;
use crate::domain::reconciler::InteractionDelta;
use crate::domain::value_objects::{ResourceId, ResourceKind, UserId};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Typed catalogue filter. Every `Some` field narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub kind: Option<ResourceKind>,
    pub branch: Option<String>,
    pub course: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    /// Accepted spellings of the year, any of which matches
    pub years: Vec<String>,
    pub exam_year: Option<String>,
    /// Case-insensitive substring of the unit
    pub unit: Option<String>,
    /// Case-insensitive substring of title, description, subject or uploader
    pub search: Option<String>,
    pub limit: i64,
}

/// Port for resource persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Insert a newly uploaded resource
    async fn insert(&self, resource: &Resource) -> Result<(), RepositoryError>;

    /// Find resource by ID in any status
    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Resource>, RepositoryError>;

    /// Apply `delta` for `user` as one atomic store operation.
    ///
    /// Returns the post-update resource, or `None` when it does not exist (in
    /// which case nothing was written).
    async fn apply_interaction(
        &self,
        id: &ResourceId,
        user: &UserId,
        delta: &InteractionDelta,
    ) -> Result<Option<Resource>, RepositoryError>;

    /// Approved resources matching `filter`, newest first
    async fn list_approved(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, RepositoryError>;

    /// Approved resources saved by `user`, newest first
    async fn list_saved_by(&self, user: &UserId) -> Result<Vec<Resource>, RepositoryError>;

    /// Resources uploaded by `user` in any status, newest first
    async fn list_uploaded_by(&self, user: &UserId) -> Result<Vec<Resource>, RepositoryError>;

    /// Number of approved resources per uploader
    async fn count_approved_by_uploaders(
        &self,
        uploaders: &[UserId],
    ) -> Result<HashMap<UserId, u64>, RepositoryError>;

    /// Delete resource; returns false if it did not exist
    async fn delete(&self, id: &ResourceId) -> Result<bool, RepositoryError>;
}
