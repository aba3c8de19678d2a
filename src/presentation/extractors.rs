//! Authentication extractors for Axum (bearer-token sessions)

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::identity::UserId;
use crate::infrastructure::auth::{AuthError, SessionVerifier};
use crate::presentation::models::ApiResponse;

/// State for the authentication extractor, injected via request extensions
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<SessionVerifier>,
}

/// Authenticated user information from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or_else(|| AuthErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Auth state not found in request extensions".to_string(),
            })?;

        let token = bearer_token(parts).ok_or_else(|| AuthErrorResponse {
            status: StatusCode::UNAUTHORIZED,
            message: AuthError::MissingToken.to_string(),
        })?;

        let user_id = auth_state
            .verifier
            .verify(token)
            .map_err(|e| AuthErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                message: e.to_string(),
            })?;

        Ok(AuthUser { user_id })
    }
}

/// Rejection for unauthenticated access; this is the collaborator boundary,
/// so unlike handler failures it does use the HTTP status.
#[derive(Debug)]
pub struct AuthErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for AuthErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::failure(self.message))).into_response()
    }
}
