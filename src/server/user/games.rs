use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::CreateGameRequest;
use crate::server::extract::{EntityId, ValidJson};
use crate::server::response::{ApiError, StoreResultExt};
use crate::server::validation::{normalize_optional, parse_schedule};
use crate::store::Store;
use crate::types::{GameDetail, GameState, GameTeam, NewGame, RosterEntry, Team};

use super::access::{require_game_owner, require_pitcher_owner, require_team_owner};

fn game_team(store: &dyn Store, team: Team) -> Result<GameTeam, ApiError> {
    let pitchers = store
        .list_team_pitchers(team.id)
        .api_err("Failed to list team pitchers")?;

    Ok(GameTeam {
        id: team.id,
        name: team.name,
        pitchers: pitchers.into_iter().map(RosterEntry::from).collect(),
    })
}

pub async fn list_games(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let games = state
        .store
        .list_games(auth.user.id)
        .api_err("Failed to list games")?;

    Ok::<_, ApiError>(Json(games))
}

pub async fn get_game(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let game = require_game_owner(store, &auth.user, id)?;

    let home_team = require_team_owner(store, &auth.user, game.home_team_id)?;
    let away_team = require_team_owner(store, &auth.user, game.away_team_id)?;
    let (home_pitcher, _) = require_pitcher_owner(store, &auth.user, game.home_pitcher_id)?;
    let (away_pitcher, _) = require_pitcher_owner(store, &auth.user, game.away_pitcher_id)?;

    Ok::<_, ApiError>(Json(GameDetail {
        home_team: game_team(store, home_team)?,
        away_team: game_team(store, away_team)?,
        home_pitcher: home_pitcher.into(),
        away_pitcher: away_pitcher.into(),
        game,
    }))
}

pub async fn create_game(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateGameRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let (scheduled_at, start_time) = parse_schedule(&req.date, &req.time)?;

    if req.home_team_id == req.away_team_id {
        return Err(ApiError::bad_request("Home and away teams must differ"));
    }

    let home_team = require_team_owner(store, &auth.user, req.home_team_id)?;
    let away_team = require_team_owner(store, &auth.user, req.away_team_id)?;
    let (home_pitcher, _) = require_pitcher_owner(store, &auth.user, req.home_pitcher_id)?;
    let (away_pitcher, _) = require_pitcher_owner(store, &auth.user, req.away_pitcher_id)?;

    if home_pitcher.team_id != home_team.id {
        return Err(ApiError::bad_request(
            "Home pitcher does not play for the home team",
        ));
    }
    if away_pitcher.team_id != away_team.id {
        return Err(ApiError::bad_request(
            "Away pitcher does not play for the away team",
        ));
    }

    let game = store
        .create_game(&NewGame {
            home_team_id: home_team.id,
            away_team_id: away_team.id,
            home_pitcher_id: home_pitcher.id,
            away_pitcher_id: away_pitcher.id,
            scheduled_at,
            start_time,
            field: normalize_optional(req.field),
            owner_id: auth.user.id,
        })
        .api_err("Failed to create game")?;

    tracing::info!(game_id = game.id, user_id = auth.user.id, "game scheduled");

    Ok::<_, ApiError>((StatusCode::CREATED, Json(game)))
}

pub async fn finish_game(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let mut game = require_game_owner(store, &auth.user, id)?;

    if game.state != GameState::Finished {
        store
            .set_game_state(game.id, GameState::Finished)
            .api_err("Failed to finish game")?;
        game.state = GameState::Finished;
    }

    Ok::<_, ApiError>(Json(game))
}

pub async fn delete_game(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let game = require_game_owner(store, &auth.user, id)?;

    store.delete_game(game.id).api_err("Failed to delete game")?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
