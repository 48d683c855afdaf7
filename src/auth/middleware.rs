use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE, request::Parts},
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use serde_json::json;

use super::helpers::extract_session_token;
use super::jwt::{Claims, validate_token};
use crate::error::Error;
use crate::server::AppState;
use crate::types::User;

/// Extractor that requires a valid session belonging to an existing user.
pub struct RequireUser {
    pub claims: Claims,
    pub user: User,
}

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidToken,
    TokenExpired,
    UnknownUser,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingAuth => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::UnknownUser => (StatusCode::UNAUTHORIZED, "Unknown user"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer realm=\"scoutbook\""),
            );
        }

        response
    }
}

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw_token = extract_session_token(&parts.headers).ok_or(AuthError::MissingAuth)?;

        let claims = validate_token(&raw_token, &state.jwt).map_err(|e| match e {
            Error::Jwt(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                AuthError::TokenExpired
            }
            _ => AuthError::InvalidToken,
        })?;

        let user = state
            .store
            .get_user(claims.sub)
            .map_err(|e| {
                tracing::error!("Failed to load session user {}: {e}", claims.sub);
                AuthError::InternalError
            })?
            .ok_or(AuthError::UnknownUser)?;

        Ok(RequireUser { claims, user })
    }
}
