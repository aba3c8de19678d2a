//! HTTP controllers and shared handler state

pub mod ai;
pub mod health;
pub mod user;

use std::sync::Arc;
use std::time::Instant;

use crate::application::creations::{
    GenerateArticleUseCase, GenerateBlogTitleUseCase, GenerateImageUseCase,
    ListPublishedCreationsUseCase, ListUserCreationsUseCase, RemoveBackgroundUseCase,
    RemoveObjectUseCase, ReviewResumeUseCase, ToggleLikeUseCase,
};
use crate::application::entitlement::ResolveEntitlementUseCase;
use crate::config::Config;
use crate::presentation::extractors::AuthState;

/// Shared application state threaded through all handlers
#[derive(Clone)]
pub struct AppState {
    pub entitlement: Arc<ResolveEntitlementUseCase>,
    pub generate_article: Arc<GenerateArticleUseCase>,
    pub generate_blog_title: Arc<GenerateBlogTitleUseCase>,
    pub generate_image: Arc<GenerateImageUseCase>,
    pub remove_background: Arc<RemoveBackgroundUseCase>,
    pub remove_object: Arc<RemoveObjectUseCase>,
    pub review_resume: Arc<ReviewResumeUseCase>,
    pub list_user_creations: Arc<ListUserCreationsUseCase>,
    pub list_published_creations: Arc<ListPublishedCreationsUseCase>,
    pub toggle_like: Arc<ToggleLikeUseCase>,
    pub auth: AuthState,
    pub config: Arc<Config>,
    pub startup_time: Instant,
}
