mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::stats::{ScopeAggregates, ScopeFilter};
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    /// Creates the schema and seeds the lookup tables. Safe to call repeatedly.
    fn initialize(&self) -> Result<()>;

    // User operations
    fn create_user(&self, user: &NewUser) -> Result<User>;
    fn get_user(&self, id: i64) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // Team operations
    fn create_team(&self, team: &NewTeam) -> Result<Team>;
    fn get_team(&self, id: i64) -> Result<Option<Team>>;
    fn get_team_by_name(&self, name: &str) -> Result<Option<Team>>;
    fn list_teams(&self, owner_id: i64) -> Result<Vec<TeamSummary>>;
    fn update_team(&self, team: &Team) -> Result<()>;
    fn delete_team(&self, id: i64) -> Result<bool>;
    fn count_team_pitchers(&self, id: i64) -> Result<i64>;

    // Pitcher operations
    fn create_pitcher(&self, pitcher: &NewPitcher) -> Result<Pitcher>;
    fn get_pitcher(&self, id: i64) -> Result<Option<Pitcher>>;
    fn list_pitchers(&self, owner_id: i64) -> Result<Vec<PitcherWithTeam>>;
    fn list_team_pitchers(&self, team_id: i64) -> Result<Vec<Pitcher>>;
    fn update_pitcher(&self, pitcher: &Pitcher) -> Result<()>;
    fn delete_pitcher(&self, id: i64) -> Result<bool>;

    // Game operations
    fn create_game(&self, game: &NewGame) -> Result<Game>;
    fn get_game(&self, id: i64) -> Result<Option<Game>>;
    fn list_games(&self, owner_id: i64) -> Result<Vec<GameSummary>>;
    fn set_game_state(&self, id: i64, state: GameState) -> Result<()>;
    /// Deletes the game together with its pitches, atomically.
    fn delete_game(&self, id: i64) -> Result<bool>;

    // Pitch operations
    fn create_pitch(&self, pitch: &NewPitch) -> Result<Pitch>;
    fn get_pitch(&self, id: i64) -> Result<Option<Pitch>>;
    fn list_game_pitches(&self, game_id: i64) -> Result<Vec<PitchDetail>>;
    fn update_pitch(&self, pitch: &Pitch) -> Result<()>;
    fn delete_pitch(&self, id: i64) -> Result<bool>;

    // Lookup tables
    fn list_pitch_types(&self) -> Result<Vec<PitchType>>;
    fn list_pitch_results(&self) -> Result<Vec<PitchResult>>;

    // Aggregates
    fn pitch_aggregates(&self, filter: ScopeFilter) -> Result<ScopeAggregates>;
    fn count_teams(&self, owner_id: i64) -> Result<i64>;
    fn count_games(&self, owner_id: i64) -> Result<i64>;
    fn count_pitchers(&self, owner_id: i64) -> Result<i64>;
    fn count_games_by_state(&self, owner_id: i64) -> Result<Vec<StateCount>>;
    fn count_pitchers_per_team(&self, owner_id: i64) -> Result<Vec<TeamPitcherCount>>;
    fn list_upcoming_games(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<UpcomingGame>>;
}
