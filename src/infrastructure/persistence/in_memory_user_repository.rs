use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::entities::UserProfile;
use crate::domain::value_objects::UserId;

/// Process-local user store, seeded through [`InMemoryUserRepository::upsert`]
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, UserProfile>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, profile: UserProfile) {
        self.users.insert(profile.id().clone(), profile);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn add_reputation(&self, id: &UserId, points: i64) -> Result<(), RepositoryError> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        entry.reputation += points;
        Ok(())
    }

    async fn top_by_reputation(&self, limit: i64) -> Result<Vec<UserProfile>, RepositoryError> {
        let mut users: Vec<UserProfile> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| b.reputation.cmp(&a.reputation).then_with(|| a.id.cmp(&b.id)));
        users.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(users)
    }
}
