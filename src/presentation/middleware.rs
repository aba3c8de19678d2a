//! Request middleware

use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::errors::ApplicationError;
use crate::presentation::controllers::AppState;
use crate::presentation::extractors::AuthUser;
use crate::presentation::models::ApiResponse;

/// Entitlement gate: resolves `(plan, free_usage)` for the authenticated
/// identity and attaches it to the request before any handler runs.
///
/// A provider or metadata-store failure fails the whole request; no partial
/// entitlement state is assumed and nothing is retried.
pub async fn entitlement_middleware(
    State(state): State<AppState>,
    user: AuthUser,
    mut request: Request,
    next: Next,
) -> Response {
    match state.entitlement.execute(user.user_id).await {
        Ok(entitlement) => {
            request.extensions_mut().insert(entitlement);
            next.run(request).await
        }
        Err(e) => {
            tracing::error!("Entitlement resolution failed: {}", e);
            Json(ApiResponse::failure(e.to_string())).into_response()
        }
    }
}

/// Collapse an application error into the wire envelope, logging expected
/// rejections at warn and upstream faults at error.
pub fn failure_response(error: ApplicationError) -> Json<ApiResponse> {
    if error.is_expected() {
        tracing::warn!("Request rejected: {}", error);
    } else {
        tracing::error!("Request failed: {}", error);
    }
    Json(ApiResponse::failure(error.to_string()))
}
