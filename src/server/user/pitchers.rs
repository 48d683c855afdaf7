use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::{CreatePitcherRequest, UpdatePitcherRequest};
use crate::server::extract::{EntityId, ValidJson};
use crate::server::response::{ApiError, StoreResultExt};
use crate::server::validation::validate_person_name;
use crate::stats::{AuthorizedScope, compute_stats};
use crate::types::{NewPitcher, PitcherWithTeam};

use super::access::{require_pitcher_owner, require_team_owner};

fn validate_optional_number(value: Option<i64>, field: &str) -> Result<(), ApiError> {
    match value {
        Some(n) if n < 0 => Err(ApiError::bad_request(format!(
            "{field} cannot be negative"
        ))),
        _ => Ok(()),
    }
}

pub async fn list_pitchers(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let pitchers = state
        .store
        .list_pitchers(auth.user.id)
        .api_err("Failed to list pitchers")?;

    Ok::<_, ApiError>(Json(pitchers))
}

pub async fn get_pitcher(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let (pitcher, team) = require_pitcher_owner(state.store.as_ref(), &auth.user, id)?;

    Ok::<_, ApiError>(Json(PitcherWithTeam {
        pitcher,
        team_name: team.name,
    }))
}

pub async fn create_pitcher(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreatePitcherRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let first_name = validate_person_name(&req.first_name, "First name")?;
    let last_name = validate_person_name(&req.last_name, "Last name")?;
    validate_optional_number(req.age, "Age")?;
    validate_optional_number(req.jersey_number, "Jersey number")?;

    let team = require_team_owner(store, &auth.user, req.team_id)?;

    let pitcher = store
        .create_pitcher(&NewPitcher {
            first_name,
            last_name,
            age: req.age,
            jersey_number: req.jersey_number,
            team_id: team.id,
        })
        .api_err("Failed to create pitcher")?;

    tracing::info!(pitcher_id = pitcher.id, team_id = team.id, "pitcher created");

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(PitcherWithTeam {
            pitcher,
            team_name: team.name,
        }),
    ))
}

pub async fn update_pitcher(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    ValidJson(req): ValidJson<UpdatePitcherRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let (mut pitcher, mut team) = require_pitcher_owner(store, &auth.user, id)?;

    if let Some(first_name) = req.first_name {
        pitcher.first_name = validate_person_name(&first_name, "First name")?;
    }
    if let Some(last_name) = req.last_name {
        pitcher.last_name = validate_person_name(&last_name, "Last name")?;
    }
    if let Some(age) = req.age {
        validate_optional_number(age, "Age")?;
        pitcher.age = age;
    }
    if let Some(jersey_number) = req.jersey_number {
        validate_optional_number(jersey_number, "Jersey number")?;
        pitcher.jersey_number = jersey_number;
    }
    if let Some(team_id) = req.team_id {
        if team_id != team.id {
            team = require_team_owner(store, &auth.user, team_id)?;
            pitcher.team_id = team.id;
        }
    }

    store
        .update_pitcher(&pitcher)
        .api_err("Failed to update pitcher")?;

    Ok::<_, ApiError>(Json(PitcherWithTeam {
        pitcher,
        team_name: team.name,
    }))
}

pub async fn delete_pitcher(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let (pitcher, _team) = require_pitcher_owner(store, &auth.user, id)?;

    store
        .delete_pitcher(pitcher.id)
        .api_err("Failed to delete pitcher")?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}

pub async fn pitcher_stats(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let (pitcher, team) = require_pitcher_owner(store, &auth.user, id)?;

    let scope = AuthorizedScope::pitcher(&auth.user, &pitcher, &team)
        .ok_or_else(|| ApiError::forbidden("Not authorized"))?;

    let stats = compute_stats(store, &scope).api_err("Failed to compute pitcher stats")?;

    Ok::<_, ApiError>(Json(stats))
}
