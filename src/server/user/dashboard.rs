use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;

use crate::auth::RequireUser;
use crate::server::AppState;
use crate::server::dto::{DashboardResponse, Kpis};
use crate::server::response::{ApiError, StoreResultExt};

const UPCOMING_LIMIT: i64 = 3;

pub async fn get_dashboard(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let owner_id = auth.user.id;

    let teams = store.count_teams(owner_id).api_err("Failed to count teams")?;
    let pitchers = store
        .count_pitchers(owner_id)
        .api_err("Failed to count pitchers")?;
    let games = store.count_games(owner_id).api_err("Failed to count games")?;

    let games_by_state = store
        .count_games_by_state(owner_id)
        .api_err("Failed to count games by state")?;
    let pitchers_per_team = store
        .count_pitchers_per_team(owner_id)
        .api_err("Failed to count pitchers per team")?;
    let upcoming_games = store
        .list_upcoming_games(owner_id, Utc::now(), UPCOMING_LIMIT)
        .api_err("Failed to list upcoming games")?;

    Ok::<_, ApiError>(Json(DashboardResponse {
        kpis: Kpis {
            teams,
            pitchers,
            games,
        },
        games_by_state,
        pitchers_per_team,
        upcoming_games,
    }))
}
