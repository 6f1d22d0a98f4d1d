use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::application::dto::{
    CreateResourceRequest, CreateResourceResponse, ListResourcesQuery, MessageResponse,
    ResourceDto, ResourceListResponse,
};
use crate::application::use_cases::{
    CreateResourceUseCase, DeleteResourceUseCase, ListResourcesUseCase,
};

/// GET /api/resources
/// Browse approved resources
#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "resources",
    params(ListResourcesQuery),
    responses(
        (status = 200, description = "Resources retrieved", body = ResourceListResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_resources_handler(
    State(use_case): State<Arc<ListResourcesUseCase>>,
    viewer: MaybeUser,
    query: Result<Query<ListResourcesQuery>, QueryRejection>,
) -> Result<Json<ResourceListResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let response = use_case.execute(query, viewer.user_id()).await?;

    Ok(Json(response))
}

/// GET /api/resources/{id}
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    tag = "resources",
    params(("id" = String, Path, description = "Resource UUID")),
    responses(
        (status = 200, description = "Resource found", body = ResourceDto),
        (status = 400, description = "Invalid resource ID"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn get_resource_handler(
    State(use_case): State<Arc<ListResourcesUseCase>>,
    viewer: MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<ResourceDto>, ApiError> {
    let resource = use_case.get(&id, viewer.user_id()).await?;
    Ok(Json(resource))
}

/// POST /api/resources
/// Publish a resource link
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "resources",
    request_body = CreateResourceRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Resource created", body = CreateResourceResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Uploader is banned or restricted"),
        (status = 404, description = "Uploader not found")
    )
)]
pub async fn create_resource_handler(
    State(use_case): State<Arc<CreateResourceUseCase>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResourceResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let response = use_case.execute(&user, request).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/resources/{id}
#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    tag = "resources",
    params(("id" = String, Path, description = "Resource UUID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Resource deleted", body = MessageResponse),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Only the uploader or an admin may delete"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn delete_resource_handler(
    State(use_case): State<Arc<DeleteResourceUseCase>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let response = use_case.execute(&user, &id).await?;
    Ok(Json(response))
}
