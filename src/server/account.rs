use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};

use crate::auth::{
    RequireUser, clear_session_cookie, hash_password, issue_token, session_cookie,
    verify_login,
};
use crate::server::AppState;
use crate::server::dto::{
    LoginRequest, MeResponse, MessageResponse, RegisterRequest, RegisterResponse,
};
use crate::server::extract::ValidJson;
use crate::server::response::{ApiError, StoreResultExt};
use crate::server::validation::{validate_display_name, validate_email, validate_password};
use crate::types::NewUser;

const DEFAULT_ROLE: &str = "user";

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let name = validate_display_name(&req.name, "Name")?;
    let email = validate_email(&req.email)?.to_lowercase();
    validate_password(&req.password)?;

    if store
        .get_user_by_email(&email)
        .api_err("Failed to check email")?
        .is_some()
    {
        return Err(ApiError::conflict("Email is already registered"));
    }

    let password_hash = hash_password(&req.password).api_err("Failed to hash password")?;

    let user = store
        .create_user(&NewUser {
            name,
            email,
            password_hash,
            role: DEFAULT_ROLE.to_string(),
        })
        .api_err("Failed to create user")?;

    let token = issue_token(&user, &state.jwt).api_err("Failed to issue session")?;

    tracing::info!(user_id = user.id, "user registered");

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        [(SET_COOKIE, session_cookie(&token, &state.jwt))],
        Json(RegisterResponse {
            message: "User created and signed in",
            user_id: user.id,
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> impl IntoResponse {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let user = state
        .store
        .get_user_by_email(&email)
        .api_err("Failed to look up user")?;

    let verified = verify_login(&req.password, user.as_ref().map(|u| u.password_hash.as_str()))
        .api_err("Failed to verify password")?;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            tracing::info!(user_id = user.id, "failed login");
            return Err(invalid_credentials());
        }
        None => return Err(invalid_credentials()),
    };

    let token = issue_token(&user, &state.jwt).api_err("Failed to issue session")?;

    Ok::<_, ApiError>((
        [(SET_COOKIE, session_cookie(&token, &state.jwt))],
        Json(MessageResponse {
            message: "Login successful",
        }),
    ))
}

pub async fn me(auth: RequireUser) -> impl IntoResponse {
    let user = auth.user;

    Json(MeResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    })
}

pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie(&state.jwt))],
        Json(MessageResponse {
            message: "Logout successful",
        }),
    )
}
