use std::sync::Arc;

use crate::application::dto::{LeaderboardEntry, LeaderboardResponse};
use crate::application::errors::LeaderboardError;
use crate::application::ports::{ResourceRepository, UserRepository};
use crate::domain::value_objects::UserId;

pub const LEADERBOARD_SIZE: i64 = 50;

/// Use case: Rank contributors by reputation
pub struct LeaderboardUseCase {
    user_repo: Arc<dyn UserRepository>,
    resource_repo: Arc<dyn ResourceRepository>,
}

impl LeaderboardUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, resource_repo: Arc<dyn ResourceRepository>) -> Self {
        Self {
            user_repo,
            resource_repo,
        }
    }

    pub async fn execute(&self) -> Result<LeaderboardResponse, LeaderboardError> {
        let top_users = self.user_repo.top_by_reputation(LEADERBOARD_SIZE).await?;
        if top_users.is_empty() {
            return Ok(LeaderboardResponse {
                leaderboard: Vec::new(),
            });
        }

        let ids: Vec<UserId> = top_users.iter().map(|u| u.id().clone()).collect();
        let uploads = self.resource_repo.count_approved_by_uploaders(&ids).await?;

        let leaderboard = top_users
            .iter()
            .enumerate()
            .map(|(index, user)| LeaderboardEntry {
                rank: index + 1,
                name: user.display_name().to_string(),
                points: user.reputation,
                uploads: uploads.get(user.id()).copied().unwrap_or(0),
                avatar: user.avatar_or_default().to_string(),
            })
            .collect();

        Ok(LeaderboardResponse { leaderboard })
    }
}
