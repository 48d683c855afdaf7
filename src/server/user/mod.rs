pub mod access;
mod dashboard;
mod games;
mod lookup;
mod pitchers;
mod pitches;
mod teams;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::server::AppState;

pub fn user_router() -> Router<Arc<AppState>> {
    Router::new()
        // Teams
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/teams/{id}/stats", get(teams::team_stats))
        // Pitchers
        .route(
            "/pitchers",
            get(pitchers::list_pitchers).post(pitchers::create_pitcher),
        )
        .route(
            "/pitchers/{id}",
            get(pitchers::get_pitcher)
                .put(pitchers::update_pitcher)
                .delete(pitchers::delete_pitcher),
        )
        .route("/pitchers/{id}/stats", get(pitchers::pitcher_stats))
        // Games
        .route("/games", get(games::list_games).post(games::create_game))
        .route(
            "/games/{id}",
            get(games::get_game).delete(games::delete_game),
        )
        .route("/games/{id}/finish", patch(games::finish_game))
        // Pitches (listed and recorded under their game)
        .route(
            "/games/{id}/pitches",
            get(pitches::list_game_pitches).post(pitches::create_pitch),
        )
        .route(
            "/pitches/{id}",
            put(pitches::update_pitch).delete(pitches::delete_pitch),
        )
        // Lookups
        .route("/lookup/pitch-types", get(lookup::list_pitch_types))
        .route("/lookup/pitch-results", get(lookup::list_pitch_results))
        .route("/dashboard", get(dashboard::get_dashboard))
}
