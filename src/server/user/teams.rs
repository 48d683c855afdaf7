use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::{CreateTeamRequest, UpdateTeamRequest};
use crate::server::extract::{EntityId, ValidJson};
use crate::server::response::{ApiError, StoreResultExt};
use crate::server::validation::{normalize_optional, validate_display_name};
use crate::stats::{AuthorizedScope, compute_stats};
use crate::types::{NewTeam, TeamSummary};

use super::access::require_team_owner;

pub async fn list_teams(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let teams = state
        .store
        .list_teams(auth.user.id)
        .api_err("Failed to list teams")?;

    Ok::<_, ApiError>(Json(teams))
}

pub async fn get_team(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let team = require_team_owner(store, &auth.user, id)?;

    let pitcher_count = store
        .count_team_pitchers(team.id)
        .api_err("Failed to count pitchers")?;

    Ok::<_, ApiError>(Json(TeamSummary {
        team,
        pitcher_count,
    }))
}

pub async fn create_team(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateTeamRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let name = validate_display_name(&req.name, "Team name")?;

    if store
        .get_team_by_name(&name)
        .api_err("Failed to check team name")?
        .is_some()
    {
        return Err(ApiError::conflict("A team with that name already exists"));
    }

    let team = store
        .create_team(&NewTeam {
            name,
            city: normalize_optional(req.city),
            owner_id: auth.user.id,
        })
        .api_err("Failed to create team")?;

    tracing::info!(team_id = team.id, user_id = auth.user.id, "team created");

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(TeamSummary {
            team,
            pitcher_count: 0,
        }),
    ))
}

pub async fn update_team(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    ValidJson(req): ValidJson<UpdateTeamRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let mut team = require_team_owner(store, &auth.user, id)?;

    if req.name.is_none() && req.city.is_none() {
        return Err(ApiError::bad_request("Nothing to update"));
    }

    if let Some(name) = req.name {
        let name = validate_display_name(&name, "Team name")?;

        if name != team.name
            && store
                .get_team_by_name(&name)
                .api_err("Failed to check team name")?
                .is_some()
        {
            return Err(ApiError::conflict("A team with that name already exists"));
        }
        team.name = name;
    }
    if req.city.is_some() {
        team.city = normalize_optional(req.city);
    }

    store.update_team(&team).api_err("Failed to update team")?;

    let pitcher_count = store
        .count_team_pitchers(team.id)
        .api_err("Failed to count pitchers")?;

    Ok::<_, ApiError>(Json(TeamSummary {
        team,
        pitcher_count,
    }))
}

pub async fn delete_team(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let team = require_team_owner(store, &auth.user, id)?;

    let pitcher_count = store
        .count_team_pitchers(team.id)
        .api_err("Failed to count pitchers")?;

    if pitcher_count > 0 {
        return Err(ApiError::conflict(
            "Team has pitchers. Move or delete them first",
        ));
    }

    store.delete_team(team.id).api_err("Failed to delete team")?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}

pub async fn team_stats(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let team = require_team_owner(store, &auth.user, id)?;

    let scope = AuthorizedScope::team(&auth.user, &team)
        .ok_or_else(|| ApiError::forbidden("Not authorized"))?;

    let stats = compute_stats(store, &scope).api_err("Failed to compute team stats")?;

    Ok::<_, ApiError>(Json(stats))
}
