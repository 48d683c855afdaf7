use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{StateCount, TeamPitcherCount, UpcomingGame};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Use together with `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reads a grid coordinate the way form clients send it: integers, integral
/// floats and numeric strings are accepted. Anything else is treated as absent
/// so the caller falls back to the zone index.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coordinate_from_value))
}

fn coordinate_from_value(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

// Account

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

// Teams

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// A blank string clears the city.
    #[serde(default)]
    pub city: Option<String>,
}

// Pitchers

#[derive(Debug, Deserialize)]
pub struct CreatePitcherRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub jersey_number: Option<i64>,
    pub team_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePitcherRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub jersey_number: Option<Option<i64>>,
    #[serde(default)]
    pub team_id: Option<i64>,
}

// Games

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_pitcher_id: i64,
    pub away_pitcher_id: i64,
    /// `dd/mm/yyyy`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    #[serde(default)]
    pub field: Option<String>,
}

// Pitches

#[derive(Debug, Deserialize)]
pub struct CreatePitchRequest {
    pub type_id: i64,
    pub result_id: i64,
    pub pitcher_id: i64,
    pub inning: i64,
    pub half: String,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub zone: Option<i64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub x: Option<i64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub y: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePitchRequest {
    #[serde(default)]
    pub type_id: Option<i64>,
    #[serde(default)]
    pub result_id: Option<i64>,
    #[serde(default)]
    pub pitcher_id: Option<i64>,
    #[serde(default)]
    pub inning: Option<i64>,
    #[serde(default)]
    pub half: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub velocity: Option<Option<f64>>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub zone: Option<i64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub x: Option<i64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub y: Option<i64>,
}

// Dashboard

#[derive(Debug, Serialize)]
pub struct Kpis {
    pub teams: i64,
    pub pitchers: i64,
    pub games: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub kpis: Kpis,
    pub games_by_state: Vec<StateCount>,
    pub pitchers_per_team: Vec<TeamPitcherCount>,
    pub upcoming_games: Vec<UpcomingGame>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub ts: DateTime<Utc>,
}
