use std::sync::Arc;

use crate::application::dto::{ResourceDto, UploadsResponse};
use crate::application::errors::ResourceQueryError;
use crate::application::ports::ResourceRepository;
use crate::domain::value_objects::UserId;

/// Use case: Everything a user has uploaded, in any status
pub struct ListUploadsUseCase {
    resource_repo: Arc<dyn ResourceRepository>,
}

impl ListUploadsUseCase {
    pub fn new(resource_repo: Arc<dyn ResourceRepository>) -> Self {
        Self { resource_repo }
    }

    pub async fn execute(&self, user: &UserId) -> Result<UploadsResponse, ResourceQueryError> {
        let resources = self.resource_repo.list_uploaded_by(user).await?;

        Ok(UploadsResponse {
            uploads: resources
                .iter()
                .map(|r| ResourceDto::for_viewer(r, Some(user)))
                .collect(),
        })
    }
}
