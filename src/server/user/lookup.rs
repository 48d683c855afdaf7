use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::response::{ApiError, StoreResultExt};

pub async fn list_pitch_types(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let types = state
        .store
        .list_pitch_types()
        .api_err("Failed to list pitch types")?;

    Ok::<_, ApiError>(Json(types))
}

pub async fn list_pitch_results(
    _auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let results = state
        .store
        .list_pitch_results()
        .api_err("Failed to list pitch results")?;

    Ok::<_, ApiError>(Json(results))
}
