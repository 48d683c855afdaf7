use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub city: Option<String>,
    pub owner_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    #[serde(flatten)]
    pub team: Team,
    pub pitcher_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitcher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<i64>,
    pub team_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPitcher {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub jersey_number: Option<i64>,
    pub team_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PitcherWithTeam {
    #[serde(flatten)]
    pub pitcher: Pitcher,
    pub team_name: String,
}

/// Lifecycle of a game. A game starts scheduled and can only move to finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Scheduled,
    Finished,
}

impl GameState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Finished => "FINISHED",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SCHEDULED" => Some(Self::Scheduled),
            "FINISHED" => Some(Self::Finished),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_pitcher_id: i64,
    pub away_pitcher_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub state: GameState,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGame {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_pitcher_id: i64,
    pub away_pitcher_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub start_time: String,
    pub field: Option<String>,
    pub owner_id: i64,
}

/// A game row joined with the display names shown in game lists.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    #[serde(flatten)]
    pub game: Game,
    pub home_team: String,
    pub away_team: String,
    pub home_pitcher: String,
    pub away_pitcher: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<i64>,
}

impl From<Pitcher> for RosterEntry {
    fn from(p: Pitcher) -> Self {
        Self {
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            jersey_number: p.jersey_number,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameTeam {
    pub id: i64,
    pub name: String,
    pub pitchers: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: Game,
    pub home_team: GameTeam,
    pub away_team: GameTeam,
    pub home_pitcher: RosterEntry,
    pub away_pitcher: RosterEntry,
}

/// Which half of the inning a pitch was thrown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InningHalf {
    Top,
    Bottom,
}

impl InningHalf {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitch {
    pub id: i64,
    pub game_id: i64,
    pub pitcher_id: i64,
    pub type_id: i64,
    pub result_id: i64,
    pub velocity: Option<f64>,
    pub x: i64,
    pub y: i64,
    pub inning: i64,
    pub half: InningHalf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPitch {
    pub game_id: i64,
    pub pitcher_id: i64,
    pub type_id: i64,
    pub result_id: i64,
    pub velocity: Option<f64>,
    pub x: i64,
    pub y: i64,
    pub inning: i64,
    pub half: InningHalf,
    pub comment: Option<String>,
}

/// A pitch joined with the names of its type, result and pitcher.
#[derive(Debug, Clone, Serialize)]
pub struct PitchDetail {
    #[serde(flatten)]
    pub pitch: Pitch,
    pub type_name: String,
    pub result_name: String,
    pub pitcher_first_name: String,
    pub pitcher_last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchResult {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateCount {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamPitcherCount {
    pub name: String,
    pub pitchers: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingGame {
    pub id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
}
