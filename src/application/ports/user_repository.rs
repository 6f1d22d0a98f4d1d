use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::UserProfile;
use crate::domain::value_objects::UserId;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for reading user accounts.
///
/// Accounts are created by the authentication flow; this service only reads
/// them and adjusts reputation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;

    /// Atomically add `points` to the user's reputation
    async fn add_reputation(&self, id: &UserId, points: i64) -> Result<(), RepositoryError>;

    /// Users ordered by reputation, highest first
    async fn top_by_reputation(&self, limit: i64) -> Result<Vec<UserProfile>, RepositoryError>;
}
