use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{RepositoryError, ResourceFilter, ResourceRepository};
use crate::domain::entities::Resource;
use crate::domain::reconciler::InteractionDelta;
use crate::domain::value_objects::{ResourceId, UserId};

/// Process-local resource store.
///
/// Interactions mutate the entry under its shard lock, so concurrent
/// interactions on one resource serialize the same way the conditional
/// UPDATE does in Postgres.
#[derive(Default)]
pub struct InMemoryResourceRepository {
    resources: DashMap<ResourceId, Resource>,
}

impl InMemoryResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(mut resources: Vec<Resource>) -> Vec<Resource> {
        resources.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        resources
    }

    fn collect_where(&self, keep: impl Fn(&Resource) -> bool) -> Vec<Resource> {
        let matching = self
            .resources
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        Self::newest_first(matching)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_filter(resource: &Resource, filter: &ResourceFilter) -> bool {
    let details = resource.details();

    resource.is_listed()
        && filter.kind.is_none_or(|k| resource.kind() == k)
        && filter.branch.as_ref().is_none_or(|b| &details.branch == b)
        && filter.course.as_ref().is_none_or(|c| &details.course == c)
        && filter.semester.as_ref().is_none_or(|s| &details.semester == s)
        && filter.subject.as_ref().is_none_or(|s| &details.subject == s)
        && (filter.years.is_empty() || filter.years.contains(&details.year))
        && filter
            .exam_year
            .as_ref()
            .is_none_or(|y| details.exam_year.as_ref() == Some(y))
        && filter.unit.as_ref().is_none_or(|u| {
            details
                .unit
                .as_deref()
                .is_some_and(|unit| contains_ci(unit, u))
        })
        && filter.search.as_ref().is_none_or(|q| {
            contains_ci(&details.title, q)
                || contains_ci(&details.description, q)
                || contains_ci(&details.subject, q)
                || contains_ci(resource.uploader(), q)
        })
}

#[async_trait]
impl ResourceRepository for InMemoryResourceRepository {
    async fn insert(&self, resource: &Resource) -> Result<(), RepositoryError> {
        self.resources.insert(*resource.id(), resource.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ResourceId) -> Result<Option<Resource>, RepositoryError> {
        Ok(self.resources.get(id).map(|r| r.value().clone()))
    }

    async fn apply_interaction(
        &self,
        id: &ResourceId,
        user: &UserId,
        delta: &InteractionDelta,
    ) -> Result<Option<Resource>, RepositoryError> {
        Ok(self.resources.get_mut(id).map(|mut entry| {
            entry.apply_interaction(user, delta);
            entry.value().clone()
        }))
    }

    async fn list_approved(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, RepositoryError> {
        let limit = usize::try_from(filter.limit.max(0)).unwrap_or(usize::MAX);
        let mut resources = self.collect_where(|r| matches_filter(r, filter));
        resources.truncate(limit);
        Ok(resources)
    }

    async fn list_saved_by(&self, user: &UserId) -> Result<Vec<Resource>, RepositoryError> {
        Ok(self.collect_where(|r| r.is_listed() && r.engagement().has_saved(user)))
    }

    async fn list_uploaded_by(&self, user: &UserId) -> Result<Vec<Resource>, RepositoryError> {
        Ok(self.collect_where(|r| r.is_uploaded_by(user)))
    }

    async fn count_approved_by_uploaders(
        &self,
        uploaders: &[UserId],
    ) -> Result<HashMap<UserId, u64>, RepositoryError> {
        let mut counts = HashMap::new();
        for entry in self.resources.iter() {
            let resource = entry.value();
            if resource.is_listed() && uploaders.contains(resource.uploader_id()) {
                *counts.entry(resource.uploader_id().clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn delete(&self, id: &ResourceId) -> Result<bool, RepositoryError> {
        Ok(self.resources.remove(id).is_some())
    }
}
