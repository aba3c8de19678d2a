//! Route definitions and router setup

use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::presentation::controllers::{
    AppState,
    ai::{
        generate_article, generate_blog_title, generate_image, remove_image_background,
        remove_image_object, resume_review,
    },
    health::{health_check, liveness},
    user::{get_published_creations, get_user_creations, toggle_like_creation},
};
use crate::presentation::middleware::entitlement_middleware;
use crate::presentation::models::{
    ApiResponse, CreationDto, GenerateArticleRequest, GenerateBlogTitleRequest,
    GenerateImageRequest, ToggleLikeRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::ai::generate_article,
        crate::presentation::controllers::ai::generate_blog_title,
        crate::presentation::controllers::ai::generate_image,
        crate::presentation::controllers::ai::remove_image_background,
        crate::presentation::controllers::ai::remove_image_object,
        crate::presentation::controllers::ai::resume_review,
        crate::presentation::controllers::user::get_user_creations,
        crate::presentation::controllers::user::get_published_creations,
        crate::presentation::controllers::user::toggle_like_creation,
        crate::presentation::controllers::health::health_check
    ),
    components(
        schemas(
            ApiResponse,
            CreationDto,
            GenerateArticleRequest,
            GenerateBlogTitleRequest,
            GenerateImageRequest,
            ToggleLikeRequest,
            crate::presentation::controllers::health::HealthResponse,
            crate::domain::creation::CreationKind
        )
    ),
    tags(
        (name = "ai", description = "Metered AI generation endpoints"),
        (name = "user", description = "Creation listings and like-toggle"),
        (name = "health", description = "Service health endpoints")
    ),
    info(
        title = "Atelier API",
        version = "1.0.0",
        description = "AI creation studio backend: metered text and image generation with a shared creation library."
    )
)]
pub struct ApiDoc;

/// Create the application router with the middleware stack
pub fn create_router(state: AppState, config: &Config) -> Router {
    let ai_routes = Router::new()
        .route("/generate-article", post(generate_article))
        .route("/generate-blog-title", post(generate_blog_title))
        .route("/generate-image", post(generate_image))
        .route("/remove-image-background", post(remove_image_background))
        .route("/remove-image-object", post(remove_image_object))
        .route("/resume-review", post(resume_review));

    let user_routes = Router::new()
        .route("/get-user-creations", get(get_user_creations))
        .route("/get-published-creations", get(get_published_creations))
        .route("/toggle-like-creation", post(toggle_like_creation));

    // Every /api route runs behind the entitlement gate; the body limit is
    // raised above the default so a full-size resume reaches the handler's
    // own 5 MiB check.
    let protected_routes = Router::new()
        .nest("/api/ai", ai_routes)
        .nest("/api/user", user_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            entitlement_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes));

    let mut router = Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .merge(protected_routes);

    if config.server.enable_docs {
        router = router
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(Extension(state.auth.clone()))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
