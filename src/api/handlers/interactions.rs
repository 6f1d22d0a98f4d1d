use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::CurrentUser;
use crate::application::dto::{InteractionRequest, InteractionResponse};
use crate::application::use_cases::InteractWithResourceUseCase;

/// POST /api/resource-interactions
/// Like, dislike, save, flag or download a resource
#[utoipa::path(
    post,
    path = "/api/resource-interactions",
    tag = "interactions",
    request_body = InteractionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Interaction applied", body = InteractionResponse),
        (status = 400, description = "Malformed request or unknown action"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Resource not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn interaction_handler(
    State(use_case): State<Arc<InteractWithResourceUseCase>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<InteractionRequest>, JsonRejection>,
) -> Result<Json<InteractionResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let response = use_case.execute(&user, request).await?;

    Ok(Json(response))
}
