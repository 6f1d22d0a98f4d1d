use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::CurrentUser;
use crate::application::dto::ResourceListResponse;
use crate::application::use_cases::ListSavedResourcesUseCase;

/// GET /api/resources/saved
/// Approved resources the caller has saved, newest first
#[utoipa::path(
    get,
    path = "/api/resources/saved",
    tag = "interactions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved resources", body = ResourceListResponse),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn saved_resources_handler(
    State(use_case): State<Arc<ListSavedResourcesUseCase>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ResourceListResponse>, ApiError> {
    let response = use_case.execute(&user.user_id).await?;
    Ok(Json(response))
}
