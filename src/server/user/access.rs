//! Ownership checks shared by the resource handlers.
//!
//! Every guard loads the entity, answers 404 when it does not exist and 403
//! when it belongs to another user. Handlers call these before touching
//! anything else.

use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::store::Store;
use crate::types::{Game, Pitch, Pitcher, Team, User};

fn not_owned() -> ApiError {
    ApiError::forbidden("Not authorized")
}

pub fn require_team_owner(store: &dyn Store, user: &User, id: i64) -> Result<Team, ApiError> {
    let team = store
        .get_team(id)
        .api_err("Failed to get team")?
        .or_not_found("Team not found")?;

    if team.owner_id != user.id {
        return Err(not_owned());
    }
    Ok(team)
}

/// Pitchers are owned through their team.
pub fn require_pitcher_owner(
    store: &dyn Store,
    user: &User,
    id: i64,
) -> Result<(Pitcher, Team), ApiError> {
    let pitcher = store
        .get_pitcher(id)
        .api_err("Failed to get pitcher")?
        .or_not_found("Pitcher not found")?;

    let team = store
        .get_team(pitcher.team_id)
        .api_err("Failed to get team")?
        .or_not_found("Team not found")?;

    if team.owner_id != user.id {
        return Err(not_owned());
    }
    Ok((pitcher, team))
}

pub fn require_game_owner(store: &dyn Store, user: &User, id: i64) -> Result<Game, ApiError> {
    let game = store
        .get_game(id)
        .api_err("Failed to get game")?
        .or_not_found("Game not found")?;

    if game.owner_id != user.id {
        return Err(not_owned());
    }
    Ok(game)
}

/// Pitches are owned through their game.
pub fn require_pitch_owner(
    store: &dyn Store,
    user: &User,
    id: i64,
) -> Result<(Pitch, Game), ApiError> {
    let pitch = store
        .get_pitch(id)
        .api_err("Failed to get pitch")?
        .or_not_found("Pitch not found")?;

    let game = store
        .get_game(pitch.game_id)
        .api_err("Failed to get game")?
        .or_not_found("Game not found")?;

    if game.owner_id != user.id {
        return Err(not_owned());
    }
    Ok((pitch, game))
}
