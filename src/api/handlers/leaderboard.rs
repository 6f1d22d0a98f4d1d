use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::dto::LeaderboardResponse;
use crate::application::use_cases::LeaderboardUseCase;

/// GET /api/leaderboard
/// Top contributors by reputation
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "profile",
    responses(
        (status = 200, description = "Leaderboard", body = LeaderboardResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn leaderboard_handler(
    State(use_case): State<Arc<LeaderboardUseCase>>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let response = use_case.execute().await?;
    Ok(Json(response))
}
