//! Application setup and wiring

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use sqlx::postgres::PgPoolOptions;

use crate::application::creations::{
    GenerateArticleUseCase, GenerateBlogTitleUseCase, GenerateImageUseCase,
    ListPublishedCreationsUseCase, ListUserCreationsUseCase, RemoveBackgroundUseCase,
    RemoveObjectUseCase, ReviewResumeUseCase, ToggleLikeUseCase,
};
use crate::application::entitlement::{ResolveEntitlementUseCase, UsageMeter};
use crate::config::Config;
use crate::domain::creation::ICreationRepository;
use crate::domain::entitlement::{SubscriptionProvider, UsageStore};
use crate::infrastructure::auth::SessionVerifier;
use crate::infrastructure::clerk::ClerkClient;
use crate::infrastructure::llm::{GeminiProvider, LlmProvider};
use crate::infrastructure::media::{ClipdropClient, CloudinaryClient, ImageGenerator, MediaStore};
use crate::infrastructure::repositories::SqlxCreationRepository;
use crate::infrastructure::resume::{PdfResumeParser, ResumeParser};
use crate::presentation::controllers::AppState;
use crate::presentation::extractors::AuthState;
use crate::presentation::routes::create_router;

/// Handle returned from create_app
pub struct AppHandle {
    pub router: Router,
}

/// Create the application router with all collaborators wired up
pub async fn create_app(
    config: Config,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let startup_time = Instant::now();
    let config_arc = Arc::new(config.clone());

    // Initialize database pool
    tracing::info!("Initializing PostgreSQL database pool");
    let db_pool = Arc::new(
        PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_idle.unwrap_or(0))
            .acquire_timeout(std::time::Duration::from_secs(
                config.database.connect_timeout_seconds,
            ))
            .max_lifetime(
                config
                    .database
                    .max_lifetime_seconds
                    .map(std::time::Duration::from_secs),
            )
            .idle_timeout(
                config
                    .database
                    .idle_timeout_seconds
                    .map(std::time::Duration::from_secs),
            )
            .connect(&config.database.url)
            .await?,
    );

    // External collaborators
    let clerk = Arc::new(ClerkClient::new(&config.subscription));
    let subscription: Arc<dyn SubscriptionProvider> = clerk.clone();
    let usage: Arc<dyn UsageStore> = clerk;
    let llm: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::new(&config.llm));
    let generator: Arc<dyn ImageGenerator> = Arc::new(ClipdropClient::new(&config.image));
    let media: Arc<dyn MediaStore> = Arc::new(CloudinaryClient::new(&config.media));
    let resume_parser: Arc<dyn ResumeParser> = Arc::new(PdfResumeParser);
    let creations: Arc<dyn ICreationRepository> =
        Arc::new(SqlxCreationRepository::new(db_pool.clone()));

    // Entitlement gate and metering
    let entitlement = Arc::new(ResolveEntitlementUseCase::new(subscription, usage.clone()));
    let meter = Arc::new(UsageMeter::new(usage, config.quota.free_limit));

    // Creation use cases
    let generate_article = Arc::new(GenerateArticleUseCase::new(
        llm.clone(),
        creations.clone(),
        meter.clone(),
    ));
    let generate_blog_title = Arc::new(GenerateBlogTitleUseCase::new(
        llm.clone(),
        creations.clone(),
        meter.clone(),
    ));
    let generate_image = Arc::new(GenerateImageUseCase::new(
        generator,
        media.clone(),
        creations.clone(),
    ));
    let remove_background = Arc::new(RemoveBackgroundUseCase::new(
        media.clone(),
        creations.clone(),
    ));
    let remove_object = Arc::new(RemoveObjectUseCase::new(media, creations.clone()));
    let review_resume = Arc::new(ReviewResumeUseCase::new(
        llm,
        resume_parser,
        creations.clone(),
        config.quota.max_resume_bytes,
    ));
    let list_user_creations = Arc::new(ListUserCreationsUseCase::new(creations.clone()));
    let list_published_creations = Arc::new(ListPublishedCreationsUseCase::new(creations.clone()));
    let toggle_like = Arc::new(ToggleLikeUseCase::new(creations));

    // Session verification state for the auth extractor
    let auth = AuthState {
        verifier: Arc::new(SessionVerifier::new(&config.auth)),
    };

    let state = AppState {
        entitlement,
        generate_article,
        generate_blog_title,
        generate_image,
        remove_background,
        remove_object,
        review_resume,
        list_user_creations,
        list_published_creations,
        toggle_like,
        auth,
        config: config_arc,
        startup_time,
    };

    let router = create_router(state, &config);

    Ok(AppHandle { router })
}
