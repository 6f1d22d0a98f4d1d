use std::sync::Arc;

use crate::application::dto::{ListResourcesQuery, ResourceDto, ResourceListResponse};
use crate::application::errors::ResourceQueryError;
use crate::application::ports::{ResourceFilter, ResourceRepository};
use crate::application::validation::{clamp_limit, non_blank, unit_fragment, year_candidates};
use crate::domain::value_objects::{ResourceId, ResourceKind, UserId};

/// Use case: Browse the approved catalogue
pub struct ListResourcesUseCase {
    resource_repo: Arc<dyn ResourceRepository>,
    default_limit: i64,
    max_limit: i64,
}

impl ListResourcesUseCase {
    pub fn new(resource_repo: Arc<dyn ResourceRepository>, default_limit: i64, max_limit: i64) -> Self {
        Self {
            resource_repo,
            default_limit,
            max_limit,
        }
    }

    /// List approved resources matching `query`, annotated for `viewer`
    pub async fn execute(
        &self,
        query: ListResourcesQuery,
        viewer: Option<&UserId>,
    ) -> Result<ResourceListResponse, ResourceQueryError> {
        let filter = self.build_filter(query)?;
        let resources = self.resource_repo.list_approved(&filter).await?;

        Ok(ResourceListResponse {
            resources: resources
                .iter()
                .map(|r| ResourceDto::for_viewer(r, viewer))
                .collect(),
        })
    }

    /// Fetch one resource.
    ///
    /// Unapproved resources are only visible to their uploader.
    pub async fn get(
        &self,
        id: &str,
        viewer: Option<&UserId>,
    ) -> Result<ResourceDto, ResourceQueryError> {
        let resource_id: ResourceId = id.parse()?;

        let resource = self
            .resource_repo
            .find_by_id(&resource_id)
            .await?
            .filter(|r| r.is_listed() || viewer.is_some_and(|v| r.is_uploaded_by(v)))
            .ok_or_else(|| ResourceQueryError::NotFound(resource_id.to_string()))?;

        Ok(ResourceDto::for_viewer(&resource, viewer))
    }

    fn build_filter(&self, query: ListResourcesQuery) -> Result<ResourceFilter, ResourceQueryError> {
        let kind = non_blank(query.resource_type)
            .map(|k| k.parse::<ResourceKind>())
            .transpose()
            .map_err(|e| ResourceQueryError::InvalidRequest(e.to_string()))?;

        let exam_year = non_blank(query.exam_year);
        // Question papers are catalogued by exam year, which supersedes the unit filter
        let unit = if exam_year.is_some() {
            None
        } else {
            non_blank(query.unit).map(|u| unit_fragment(&u)).filter(|u| !u.is_empty())
        };

        Ok(ResourceFilter {
            kind,
            branch: non_blank(query.branch),
            course: non_blank(query.course),
            semester: non_blank(query.semester),
            subject: non_blank(query.subject),
            years: non_blank(query.year)
                .map(|y| year_candidates(&y))
                .unwrap_or_default(),
            exam_year,
            unit,
            search: non_blank(query.search),
            limit: clamp_limit(query.limit, self.default_limit, self.max_limit),
        })
    }
}
