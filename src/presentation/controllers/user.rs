//! Creation listing and like-toggle controllers

use axum::{Extension, Json, extract::State};
use uuid::Uuid;

use crate::application::errors::ApplicationError;
use crate::domain::creation::CreationId;
use crate::domain::entitlement::Entitlement;
use crate::presentation::controllers::AppState;
use crate::presentation::middleware::failure_response;
use crate::presentation::models::{ApiResponse, ToggleLikeRequest};

/// GET /api/user/get-user-creations - the caller's rows, newest first
#[utoipa::path(
    get,
    path = "/api/user/get-user-creations",
    responses(
        (status = 200, description = "Envelope with the caller's creations", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "user"
)]
pub async fn get_user_creations(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
) -> Json<ApiResponse> {
    match state
        .list_user_creations
        .execute(&entitlement.user_id)
        .await
    {
        Ok(creations) => Json(ApiResponse::creations(creations)),
        Err(e) => failure_response(e),
    }
}

/// GET /api/user/get-published-creations - published rows, newest first
#[utoipa::path(
    get,
    path = "/api/user/get-published-creations",
    responses(
        (status = 200, description = "Envelope with published creations", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "user"
)]
pub async fn get_published_creations(State(state): State<AppState>) -> Json<ApiResponse> {
    match state.list_published_creations.execute().await {
        Ok(creations) => Json(ApiResponse::creations(creations)),
        Err(e) => failure_response(e),
    }
}

/// POST /api/user/toggle-like-creation - flip like membership
#[utoipa::path(
    post,
    path = "/api/user/toggle-like-creation",
    request_body = ToggleLikeRequest,
    responses(
        (status = 200, description = "Envelope with the toggle outcome", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "user"
)]
pub async fn toggle_like_creation(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
    Json(request): Json<ToggleLikeRequest>,
) -> Json<ApiResponse> {
    let result = async {
        let id = request
            .id
            .parse::<Uuid>()
            .map_err(|_| ApplicationError::Validation("Invalid creation id".to_string()))?;
        state
            .toggle_like
            .execute(&entitlement.user_id, CreationId::from(id))
            .await
    }
    .await;

    match result {
        Ok(outcome) => Json(ApiResponse::outcome(outcome.message())),
        Err(e) => failure_response(e),
    }
}
