use std::sync::Arc;

use crate::application::dto::{ResourceDto, ResourceListResponse};
use crate::application::errors::ResourceQueryError;
use crate::application::ports::ResourceRepository;
use crate::domain::value_objects::UserId;

/// Use case: Resources a user has saved
pub struct ListSavedResourcesUseCase {
    resource_repo: Arc<dyn ResourceRepository>,
}

impl ListSavedResourcesUseCase {
    pub fn new(resource_repo: Arc<dyn ResourceRepository>) -> Self {
        Self { resource_repo }
    }

    /// Approved resources saved by `user`, newest first.
    ///
    /// Pure projection: no interaction state is modified.
    pub async fn execute(&self, user: &UserId) -> Result<ResourceListResponse, ResourceQueryError> {
        let mut resources = self.resource_repo.list_saved_by(user).await?;
        resources.retain(|r| r.is_listed() && r.engagement().has_saved(user));
        resources.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(ResourceListResponse {
            resources: resources
                .iter()
                .map(|r| ResourceDto::for_viewer(r, Some(user)))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockResourceRepository;
    use crate::application::use_cases::test_utils::{resource, user};
    use crate::domain::entities::{Counters, Engagement};

    fn saved_by(users: &[&str]) -> Engagement {
        Engagement::from_membership(
            Counters::default(),
            vec![user("u1")],
            vec![],
            users.iter().map(|u| user(u)),
            vec![],
        )
    }

    #[tokio::test]
    async fn test_saved_view_is_newest_first_and_annotated() {
        let older = resource("owner", 60, saved_by(&["u1"]));
        let newer = resource("owner", 5, saved_by(&["u1"]));
        let newer_id = newer.id().to_string();

        let mut repo = MockResourceRepository::new();
        let rows = vec![older, newer];
        repo.expect_list_saved_by()
            .times(1)
            .returning(move |_| Ok(rows.clone()));
        let use_case = ListSavedResourcesUseCase::new(Arc::new(repo));

        let response = use_case.execute(&user("u1")).await.unwrap();

        assert_eq!(response.resources.len(), 2);
        assert_eq!(response.resources[0].id, newer_id);
        assert!(response.resources.iter().all(|r| r.engagement.user_saved));
        assert!(response.resources.iter().all(|r| r.engagement.user_liked));
    }

    #[tokio::test]
    async fn test_saved_view_drops_rows_not_saved_by_user() {
        let mut repo = MockResourceRepository::new();
        let rows = vec![resource("owner", 0, saved_by(&["someone-else"]))];
        repo.expect_list_saved_by()
            .times(1)
            .returning(move |_| Ok(rows.clone()));
        let use_case = ListSavedResourcesUseCase::new(Arc::new(repo));

        let response = use_case.execute(&user("u1")).await.unwrap();
        assert!(response.resources.is_empty());
    }
}
