use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::CurrentUser;
use crate::application::dto::UploadsResponse;
use crate::application::use_cases::ListUploadsUseCase;

/// GET /api/profile/uploads
#[utoipa::path(
    get,
    path = "/api/profile/uploads",
    tag = "profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's uploads in any status", body = UploadsResponse),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn my_uploads_handler(
    State(use_case): State<Arc<ListUploadsUseCase>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UploadsResponse>, ApiError> {
    let response = use_case.execute(&user.user_id).await?;
    Ok(Json(response))
}
