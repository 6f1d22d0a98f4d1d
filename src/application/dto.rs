use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    entities::{EngagementView, Resource},
    value_objects::{ResourceKind, ResourceStatus, UserId},
};

/// Body of an interaction request.
///
/// Identifiers are optional at the serde level so that a missing field is
/// reported as a malformed request rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    pub resource_id: Option<String>,
    /// One of like, dislike, save, flag, download
    pub action: Option<String>,
    /// Desired membership for like/dislike/save; defaults to true
    pub value: Option<bool>,
}

/// Response to a successful interaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InteractionResponse {
    pub success: bool,
    pub resource: EngagementView,
}

/// DTO for resource responses, annotated for the requesting user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub course: String,
    pub branch: String,
    pub year: String,
    pub semester: String,
    pub subject: String,
    pub unit: Option<String>,
    pub exam_year: Option<String>,
    pub resource_type: ResourceKind,
    pub drive_link: String,
    pub status: ResourceStatus,
    pub uploader: String,
    pub uploader_id: String,
    #[serde(flatten)]
    pub engagement: EngagementView,
    pub created_at: String,
    pub updated_at: String,
}

impl ResourceDto {
    pub fn for_viewer(resource: &Resource, viewer: Option<&UserId>) -> Self {
        let details = resource.details();
        Self {
            id: resource.id().to_string(),
            title: details.title.clone(),
            description: details.description.clone(),
            course: details.course.clone(),
            branch: details.branch.clone(),
            year: details.year.clone(),
            semester: details.semester.clone(),
            subject: details.subject.clone(),
            unit: details.unit.clone(),
            exam_year: details.exam_year.clone(),
            resource_type: resource.kind(),
            drive_link: details.drive_link.clone(),
            status: resource.status(),
            uploader: resource.uploader().to_string(),
            uploader_id: resource.uploader_id().to_string(),
            engagement: resource.engagement().view_for(viewer),
            created_at: resource.created_at().to_rfc3339(),
            updated_at: resource.updated_at().to_rfc3339(),
        }
    }
}

/// DTO for resource list responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceListResponse {
    pub resources: Vec<ResourceDto>,
}

/// DTO for the caller's uploads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadsResponse {
    pub uploads: Vec<ResourceDto>,
}

/// Catalogue query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListResourcesQuery {
    /// notes, pyq or formula-sheet
    #[serde(alias = "type")]
    pub resource_type: Option<String>,
    pub branch: Option<String>,
    pub course: Option<String>,
    /// Year of study; "2", "2nd Year" and "year 2" all match the same resources
    pub year: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
    pub exam_year: Option<String>,
    /// Substring match on the unit
    pub unit: Option<String>,
    /// Substring match on title, description, subject and uploader
    pub search: Option<String>,
    /// Results per page (default and max come from configuration)
    pub limit: Option<i64>,
}

/// DTO for upload request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub course: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Branch is required"))]
    pub branch: String,
    pub year: Option<String>,
    pub year_num: Option<u8>,
    pub semester: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,
    pub unit: Option<String>,
    #[validate(length(min = 1, message = "Resource type is required"))]
    pub resource_type: String,
    #[validate(url(message = "Drive link must be a valid URL"))]
    pub drive_link: String,
    pub exam_year: Option<String>,
}

/// DTO for upload response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceResponse {
    pub message: String,
    pub resource_id: String,
    pub resource: ResourceDto,
}

/// One row of the reputation leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub points: i64,
    pub uploads: u64,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
