use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers::{
    create_resource_handler, delete_resource_handler, get_resource_handler, health_handler,
    interaction_handler, leaderboard_handler, list_resources_handler, my_uploads_handler,
    readiness_handler, saved_resources_handler,
};
use crate::api::middleware::{auth, cors, metrics, JwtVerifier};
use crate::api::openapi::swagger_ui;
use crate::application::use_cases::{
    CreateResourceUseCase, DeleteResourceUseCase, InteractWithResourceUseCase,
    LeaderboardUseCase, ListResourcesUseCase, ListSavedResourcesUseCase, ListUploadsUseCase,
};
use crate::config::Config;

/// Application state container
pub struct AppState {
    /// Present only with the Postgres backend
    pub pool: Option<Arc<PgPool>>,
    pub jwt: Arc<JwtVerifier>,
    pub interact_use_case: Arc<InteractWithResourceUseCase>,
    pub list_use_case: Arc<ListResourcesUseCase>,
    pub saved_use_case: Arc<ListSavedResourcesUseCase>,
    pub uploads_use_case: Arc<ListUploadsUseCase>,
    pub create_use_case: Arc<CreateResourceUseCase>,
    pub delete_use_case: Arc<DeleteResourceUseCase>,
    pub leaderboard_use_case: Arc<LeaderboardUseCase>,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let list_state = Arc::clone(&state.list_use_case);

    Router::new()
        // Health checks
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(state.pool.clone()),
        )
        // Public catalogue (user-relative flags when a token is present)
        .route(
            "/api/leaderboard",
            get(leaderboard_handler).with_state(state.leaderboard_use_case),
        )
        .route(
            "/api/resources",
            get(list_resources_handler).with_state(Arc::clone(&list_state)),
        )
        .route(
            "/api/resources/{id}",
            get(get_resource_handler).with_state(list_state),
        )
        // Authenticated routes
        .route(
            "/api/resources",
            post(create_resource_handler).with_state(state.create_use_case),
        )
        .route(
            "/api/resources/{id}",
            delete(delete_resource_handler).with_state(state.delete_use_case),
        )
        .route(
            "/api/resources/saved",
            get(saved_resources_handler).with_state(state.saved_use_case),
        )
        .route(
            "/api/resource-interactions",
            post(interaction_handler).with_state(state.interact_use_case),
        )
        .route(
            "/api/profile/uploads",
            get(my_uploads_handler).with_state(state.uploads_use_case),
        )
        .merge(swagger_ui())
        .layer(axum_middleware::from_fn_with_state(
            state.jwt,
            auth::auth_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes))
        .layer(cors::create_cors_layer_for(&state.config))
        .layer(axum_middleware::from_fn(metrics::metrics_middleware))
}
