use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    CreateResourceRequest, CreateResourceResponse, InteractionRequest, InteractionResponse,
    LeaderboardEntry, LeaderboardResponse, ListResourcesQuery, MessageResponse, ResourceDto,
    ResourceListResponse, UploadsResponse,
};
use crate::domain::entities::EngagementView;
use crate::domain::value_objects::{ResourceKind, ResourceStatus};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI specification for the StudyShare API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StudyShare API",
        version = "1.0.0",
        description = "Student resource sharing: catalogue, uploads and reader interactions"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::interactions::interaction_handler,
        crate::api::handlers::saved::saved_resources_handler,
        crate::api::handlers::resources::list_resources_handler,
        crate::api::handlers::resources::get_resource_handler,
        crate::api::handlers::resources::create_resource_handler,
        crate::api::handlers::resources::delete_resource_handler,
        crate::api::handlers::profile::my_uploads_handler,
        crate::api::handlers::leaderboard::leaderboard_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadinessResponse,
            InteractionRequest,
            InteractionResponse,
            EngagementView,
            ResourceDto,
            ResourceKind,
            ResourceStatus,
            ResourceListResponse,
            UploadsResponse,
            ListResourcesQuery,
            CreateResourceRequest,
            CreateResourceResponse,
            MessageResponse,
            LeaderboardEntry,
            LeaderboardResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "interactions", description = "Likes, dislikes, saves, flags and downloads"),
        (name = "resources", description = "Resource catalogue and uploads"),
        (name = "profile", description = "Contributor views")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
