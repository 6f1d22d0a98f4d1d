use std::sync::Arc;

use tracing::info;

use crate::application::dto::MessageResponse;
use crate::application::errors::DeleteResourceError;
use crate::application::ports::ResourceRepository;
use crate::domain::authorization::{AuthorizationResult, UserContext};
use crate::domain::value_objects::ResourceId;

/// Use case: Remove a resource
pub struct DeleteResourceUseCase {
    resource_repo: Arc<dyn ResourceRepository>,
}

impl DeleteResourceUseCase {
    pub fn new(resource_repo: Arc<dyn ResourceRepository>) -> Self {
        Self { resource_repo }
    }

    pub async fn execute(
        &self,
        user: &UserContext,
        id: &str,
    ) -> Result<MessageResponse, DeleteResourceError> {
        let resource_id: ResourceId = id.parse()?;

        let resource = self
            .resource_repo
            .find_by_id(&resource_id)
            .await?
            .ok_or_else(|| DeleteResourceError::NotFound(resource_id.to_string()))?;

        if let AuthorizationResult::Forbidden(reason) = user.can_delete(&resource) {
            return Err(DeleteResourceError::Forbidden(reason));
        }

        if !self.resource_repo.delete(&resource_id).await? {
            return Err(DeleteResourceError::NotFound(resource_id.to_string()));
        }

        info!(resource_id = %resource_id, user_id = %user.user_id, "resource_deleted");

        Ok(MessageResponse {
            message: "Deleted".to_string(),
        })
    }
}
