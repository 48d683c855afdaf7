use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::{CreatePitchRequest, UpdatePitchRequest};
use crate::server::extract::{EntityId, ValidJson};
use crate::server::response::{ApiError, StoreResultExt};
use crate::server::validation::{normalize_optional, validate_inning, validate_velocity};
use crate::stats::zone::to_coordinates;
use crate::types::{InningHalf, NewPitch};

use super::access::{require_game_owner, require_pitch_owner, require_pitcher_owner};

fn parse_half(raw: &str) -> Result<InningHalf, ApiError> {
    InningHalf::parse(raw.trim())
        .ok_or_else(|| ApiError::bad_request("half must be 'top' or 'bottom'"))
}

/// Explicit `x` and `y` win and are kept as given; otherwise `zone` is
/// mapped onto the grid. `None` when neither is present.
fn resolve_location(zone: Option<i64>, x: Option<i64>, y: Option<i64>) -> Option<(i64, i64)> {
    match (x, y) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => zone.map(to_coordinates),
    }
}

pub async fn list_game_pitches(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(game_id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let game = require_game_owner(store, &auth.user, game_id)?;

    let pitches = store
        .list_game_pitches(game.id)
        .api_err("Failed to list pitches")?;

    Ok::<_, ApiError>(Json(pitches))
}

pub async fn create_pitch(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(game_id): EntityId,
    ValidJson(req): ValidJson<CreatePitchRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let game = require_game_owner(store, &auth.user, game_id)?;

    let half = parse_half(&req.half)?;
    validate_inning(req.inning)?;
    validate_velocity(req.velocity)?;

    let (pitcher, _team) = require_pitcher_owner(store, &auth.user, req.pitcher_id)?;

    let (x, y) = resolve_location(req.zone, req.x, req.y).unwrap_or_else(|| to_coordinates(0));

    let pitch = store
        .create_pitch(&NewPitch {
            game_id: game.id,
            pitcher_id: pitcher.id,
            type_id: req.type_id,
            result_id: req.result_id,
            velocity: req.velocity,
            x,
            y,
            inning: req.inning,
            half,
            comment: normalize_optional(req.comment),
        })
        .api_err("Failed to create pitch")?;

    tracing::debug!(pitch_id = pitch.id, game_id = game.id, x, y, "pitch recorded");

    Ok::<_, ApiError>((StatusCode::CREATED, Json(pitch)))
}

pub async fn update_pitch(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    ValidJson(req): ValidJson<UpdatePitchRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let (mut pitch, _game) = require_pitch_owner(store, &auth.user, id)?;

    if let Some(type_id) = req.type_id {
        pitch.type_id = type_id;
    }
    if let Some(result_id) = req.result_id {
        pitch.result_id = result_id;
    }
    if let Some(pitcher_id) = req.pitcher_id {
        if pitcher_id != pitch.pitcher_id {
            let (pitcher, _team) = require_pitcher_owner(store, &auth.user, pitcher_id)?;
            pitch.pitcher_id = pitcher.id;
        }
    }
    if let Some(inning) = req.inning {
        validate_inning(inning)?;
        pitch.inning = inning;
    }
    if let Some(half) = req.half {
        pitch.half = parse_half(&half)?;
    }
    if let Some(velocity) = req.velocity {
        validate_velocity(velocity)?;
        pitch.velocity = velocity;
    }
    if req.comment.is_some() {
        pitch.comment = normalize_optional(req.comment);
    }
    if let Some((x, y)) = resolve_location(req.zone, req.x, req.y) {
        pitch.x = x;
        pitch.y = y;
    }

    store.update_pitch(&pitch).api_err("Failed to update pitch")?;

    Ok::<_, ApiError>(Json(pitch))
}

pub async fn delete_pitch(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let (pitch, _game) = require_pitch_owner(store, &auth.user, id)?;

    store.delete_pitch(pitch.id).api_err("Failed to delete pitch")?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
