use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::application::dto::{CreateResourceRequest, CreateResourceResponse, ResourceDto};
use crate::application::errors::CreateResourceError;
use crate::application::ports::{ResourceRepository, UserRepository};
use crate::application::validation::{describe_validation_errors, non_blank};
use crate::domain::authorization::UserContext;
use crate::domain::entities::{Resource, ResourceDetails, UPLOAD_REPUTATION_REWARD};
use crate::domain::value_objects::ResourceKind;

const DEFAULT_COURSE: &str = "B.Tech";
const DEFAULT_YEAR: &str = "1";

/// Use case: Publish metadata for a new resource
pub struct CreateResourceUseCase {
    resource_repo: Arc<dyn ResourceRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl CreateResourceUseCase {
    pub fn new(
        resource_repo: Arc<dyn ResourceRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            resource_repo,
            user_repo,
        }
    }

    pub async fn execute(
        &self,
        user: &UserContext,
        request: CreateResourceRequest,
    ) -> Result<CreateResourceResponse, CreateResourceError> {
        // 1. Validate payload
        request
            .validate()
            .map_err(|e| CreateResourceError::InvalidRequest(describe_validation_errors(&e)))?;
        let kind: ResourceKind = request.resource_type.trim().parse()?;

        // 2. Check the uploader's standing
        let uploader = self
            .user_repo
            .find_by_id(&user.user_id)
            .await?
            .ok_or_else(|| CreateResourceError::UploaderNotFound(user.user_id.to_string()))?;

        // 3. Build and persist
        let year = request
            .year_num
            .map(|n| n.to_string())
            .or_else(|| non_blank(request.year))
            .unwrap_or_else(|| DEFAULT_YEAR.to_string());

        let details = ResourceDetails {
            title: request.title.trim().to_string(),
            description: non_blank(request.description).unwrap_or_default(),
            course: non_blank(request.course).unwrap_or_else(|| DEFAULT_COURSE.to_string()),
            branch: request.branch.trim().to_string(),
            year,
            semester: non_blank(request.semester).unwrap_or_default(),
            subject: request.subject.trim().to_string(),
            unit: non_blank(request.unit),
            exam_year: non_blank(request.exam_year),
            drive_link: request.drive_link.trim().to_string(),
        };

        let resource = Resource::new(kind, details, &uploader)?;
        self.resource_repo.insert(&resource).await?;

        info!(
            resource_id = %resource.id(),
            uploader_id = %user.user_id,
            status = %resource.status(),
            "resource_created"
        );

        // 4. Reward the uploader; the upload stands even if this fails
        if let Err(e) = self
            .user_repo
            .add_reputation(&user.user_id, UPLOAD_REPUTATION_REWARD)
            .await
        {
            warn!(uploader_id = %user.user_id, error = %e, "failed to award upload reputation");
        }

        Ok(CreateResourceResponse {
            message: "Resource uploaded successfully".to_string(),
            resource_id: resource.id().to_string(),
            resource: ResourceDto::for_viewer(&resource, Some(&user.user_id)),
        })
    }
}
