use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Params, Row, ffi, params};

use super::Store;
use super::schema::{SCHEMA, SEED};
use crate::error::{Error, Result};
use crate::stats::{PitcherRow, ResultRow, ScopeAggregates, ScopeFilter, ZoneRow};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_game_state(s: &str) -> GameState {
    GameState::parse(s).unwrap_or_else(|| {
        tracing::error!("Invalid game state in database: '{}'", s);
        GameState::Scheduled
    })
}

fn parse_half(s: &str) -> InningHalf {
    InningHalf::parse(s).unwrap_or_else(|| {
        tracing::error!("Invalid inning half in database: '{}'", s);
        InningHalf::Top
    })
}

fn extended_code(e: &rusqlite::Error) -> Option<i32> {
    match e {
        rusqlite::Error::SqliteFailure(err, _) => Some(err.extended_code),
        _ => None,
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    extended_code(e) == Some(ffi::SQLITE_CONSTRAINT_UNIQUE)
}

fn is_foreign_key_violation(e: &rusqlite::Error) -> bool {
    extended_code(e) == Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

fn query_list<T, P, F>(conn: &Connection, sql: &str, params: P, f: F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, f)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

const TEAM_COLUMNS: &str = "t.id, t.name, t.city, t.owner_id, t.created_at";

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        owner_id: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
    })
}

const PITCHER_COLUMNS: &str =
    "pi.id, pi.first_name, pi.last_name, pi.age, pi.jersey_number, pi.team_id, pi.created_at";

fn pitcher_from_row(row: &Row<'_>) -> rusqlite::Result<Pitcher> {
    Ok(Pitcher {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        age: row.get(3)?,
        jersey_number: row.get(4)?,
        team_id: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

const GAME_COLUMNS: &str = "g.id, g.home_team_id, g.away_team_id, g.home_pitcher_id, g.away_pitcher_id, \
     g.scheduled_at, g.start_time, g.field, g.state, g.owner_id, g.created_at";

fn game_from_row(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        home_team_id: row.get(1)?,
        away_team_id: row.get(2)?,
        home_pitcher_id: row.get(3)?,
        away_pitcher_id: row.get(4)?,
        scheduled_at: parse_datetime(&row.get::<_, String>(5)?),
        start_time: row.get(6)?,
        field: row.get(7)?,
        state: parse_game_state(&row.get::<_, String>(8)?),
        owner_id: row.get(9)?,
        created_at: parse_datetime(&row.get::<_, String>(10)?),
    })
}

const PITCH_COLUMNS: &str = "p.id, p.game_id, p.pitcher_id, p.type_id, p.result_id, p.velocity, \
     p.x, p.y, p.inning, p.half, p.comment, p.created_at";

fn pitch_from_row(row: &Row<'_>) -> rusqlite::Result<Pitch> {
    Ok(Pitch {
        id: row.get(0)?,
        game_id: row.get(1)?,
        pitcher_id: row.get(2)?,
        type_id: row.get(3)?,
        result_id: row.get(4)?,
        velocity: row.get(5)?,
        x: row.get(6)?,
        y: row.get(7)?,
        inning: row.get(8)?,
        half: parse_half(&row.get::<_, String>(9)?),
        comment: row.get(10)?,
        created_at: parse_datetime(&row.get::<_, String>(11)?),
    })
}

fn fetch_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        user_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn fetch_team(conn: &Connection, id: i64) -> Result<Option<Team>> {
    conn.query_row(
        &format!("SELECT {TEAM_COLUMNS} FROM teams t WHERE t.id = ?1"),
        params![id],
        team_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn fetch_pitcher(conn: &Connection, id: i64) -> Result<Option<Pitcher>> {
    conn.query_row(
        &format!("SELECT {PITCHER_COLUMNS} FROM pitchers pi WHERE pi.id = ?1"),
        params![id],
        pitcher_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn fetch_game(conn: &Connection, id: i64) -> Result<Option<Game>> {
    conn.query_row(
        &format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.id = ?1"),
        params![id],
        game_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn fetch_pitch(conn: &Connection, id: i64) -> Result<Option<Pitch>> {
    conn.query_row(
        &format!("SELECT {PITCH_COLUMNS} FROM pitches p WHERE p.id = ?1"),
        params![id],
        pitch_from_row,
    )
    .optional()
    .map_err(Error::from)
}

/// WHERE clause over `pitches p` selecting the rows in scope. Bound to `?1`.
fn scope_clause(filter: ScopeFilter) -> (&'static str, i64) {
    match filter {
        ScopeFilter::Pitcher(id) => ("p.pitcher_id = ?1", id),
        ScopeFilter::Team(id) => (
            "p.pitcher_id IN (SELECT id FROM pitchers WHERE team_id = ?1)",
            id,
        ),
    }
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(SEED)?;
        Ok(())
    }

    // User operations

    fn create_user(&self, user: &NewUser) -> Result<User> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO users (name, email, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.name,
                user.email,
                user.password_hash,
                user.role,
                format_datetime(&Utc::now()),
            ],
        );

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(Error::AlreadyExists),
            Err(e) => return Err(Error::from(e)),
        }

        fetch_user(&conn, conn.last_insert_rowid())?.ok_or(Error::NotFound)
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        fetch_user(&self.conn(), id)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            params![email],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    // Team operations

    fn create_team(&self, team: &NewTeam) -> Result<Team> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO teams (name, city, owner_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                team.name,
                team.city,
                team.owner_id,
                format_datetime(&Utc::now()),
            ],
        );

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(Error::AlreadyExists),
            Err(e) => return Err(Error::from(e)),
        }

        fetch_team(&conn, conn.last_insert_rowid())?.ok_or(Error::NotFound)
    }

    fn get_team(&self, id: i64) -> Result<Option<Team>> {
        fetch_team(&self.conn(), id)
    }

    fn get_team_by_name(&self, name: &str) -> Result<Option<Team>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {TEAM_COLUMNS} FROM teams t WHERE t.name = ?1"),
            params![name],
            team_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_teams(&self, owner_id: i64) -> Result<Vec<TeamSummary>> {
        query_list(
            &self.conn(),
            &format!(
                "SELECT {TEAM_COLUMNS}, (SELECT COUNT(*) FROM pitchers pi WHERE pi.team_id = t.id)
                 FROM teams t WHERE t.owner_id = ?1 ORDER BY t.id"
            ),
            params![owner_id],
            |row| {
                Ok(TeamSummary {
                    team: team_from_row(row)?,
                    pitcher_count: row.get(5)?,
                })
            },
        )
    }

    fn update_team(&self, team: &Team) -> Result<()> {
        let result = self.conn().execute(
            "UPDATE teams SET name = ?1, city = ?2 WHERE id = ?3",
            params![team.name, team.city, team.id],
        );

        match result {
            Ok(0) => Err(Error::NotFound),
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(Error::AlreadyExists),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn delete_team(&self, id: i64) -> Result<bool> {
        let result = self
            .conn()
            .execute("DELETE FROM teams WHERE id = ?1", params![id]);

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(Error::Conflict(
                "team is referenced by pitchers or games".to_string(),
            )),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn count_team_pitchers(&self, id: i64) -> Result<i64> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pitchers WHERE team_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // Pitcher operations

    fn create_pitcher(&self, pitcher: &NewPitcher) -> Result<Pitcher> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO pitchers (first_name, last_name, age, jersey_number, team_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                pitcher.first_name,
                pitcher.last_name,
                pitcher.age,
                pitcher.jersey_number,
                pitcher.team_id,
                format_datetime(&Utc::now()),
            ],
        )?;

        fetch_pitcher(&conn, conn.last_insert_rowid())?.ok_or(Error::NotFound)
    }

    fn get_pitcher(&self, id: i64) -> Result<Option<Pitcher>> {
        fetch_pitcher(&self.conn(), id)
    }

    fn list_pitchers(&self, owner_id: i64) -> Result<Vec<PitcherWithTeam>> {
        query_list(
            &self.conn(),
            &format!(
                "SELECT {PITCHER_COLUMNS}, t.name
                 FROM pitchers pi
                 JOIN teams t ON t.id = pi.team_id
                 WHERE t.owner_id = ?1
                 ORDER BY pi.last_name, pi.first_name, pi.id"
            ),
            params![owner_id],
            |row| {
                Ok(PitcherWithTeam {
                    pitcher: pitcher_from_row(row)?,
                    team_name: row.get(7)?,
                })
            },
        )
    }

    fn list_team_pitchers(&self, team_id: i64) -> Result<Vec<Pitcher>> {
        query_list(
            &self.conn(),
            &format!(
                "SELECT {PITCHER_COLUMNS} FROM pitchers pi
                 WHERE pi.team_id = ?1 ORDER BY pi.last_name, pi.first_name, pi.id"
            ),
            params![team_id],
            pitcher_from_row,
        )
    }

    fn update_pitcher(&self, pitcher: &Pitcher) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE pitchers SET first_name = ?1, last_name = ?2, age = ?3, jersey_number = ?4, team_id = ?5
             WHERE id = ?6",
            params![
                pitcher.first_name,
                pitcher.last_name,
                pitcher.age,
                pitcher.jersey_number,
                pitcher.team_id,
                pitcher.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_pitcher(&self, id: i64) -> Result<bool> {
        let result = self
            .conn()
            .execute("DELETE FROM pitchers WHERE id = ?1", params![id]);

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(Error::Conflict(
                "pitcher is referenced by games or pitches".to_string(),
            )),
            Err(e) => Err(Error::from(e)),
        }
    }

    // Game operations

    fn create_game(&self, game: &NewGame) -> Result<Game> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO games (home_team_id, away_team_id, home_pitcher_id, away_pitcher_id,
                                scheduled_at, start_time, field, state, owner_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                game.home_team_id,
                game.away_team_id,
                game.home_pitcher_id,
                game.away_pitcher_id,
                format_datetime(&game.scheduled_at),
                game.start_time,
                game.field,
                GameState::Scheduled.as_str(),
                game.owner_id,
                format_datetime(&Utc::now()),
            ],
        )?;

        fetch_game(&conn, conn.last_insert_rowid())?.ok_or(Error::NotFound)
    }

    fn get_game(&self, id: i64) -> Result<Option<Game>> {
        fetch_game(&self.conn(), id)
    }

    fn list_games(&self, owner_id: i64) -> Result<Vec<GameSummary>> {
        query_list(
            &self.conn(),
            &format!(
                "SELECT {GAME_COLUMNS}, home.name, away.name,
                        hp.first_name || ' ' || hp.last_name,
                        ap.first_name || ' ' || ap.last_name
                 FROM games g
                 JOIN teams home ON home.id = g.home_team_id
                 JOIN teams away ON away.id = g.away_team_id
                 JOIN pitchers hp ON hp.id = g.home_pitcher_id
                 JOIN pitchers ap ON ap.id = g.away_pitcher_id
                 WHERE g.owner_id = ?1
                 ORDER BY g.scheduled_at DESC, g.id DESC"
            ),
            params![owner_id],
            |row| {
                Ok(GameSummary {
                    game: game_from_row(row)?,
                    home_team: row.get(11)?,
                    away_team: row.get(12)?,
                    home_pitcher: row.get(13)?,
                    away_pitcher: row.get(14)?,
                })
            },
        )
    }

    fn set_game_state(&self, id: i64, state: GameState) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE games SET state = ?1 WHERE id = ?2",
            params![state.as_str(), id],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_game(&self, id: i64) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM pitches WHERE game_id = ?1", params![id])?;
        let rows = tx.execute("DELETE FROM games WHERE id = ?1", params![id])?;

        tx.commit()?;
        Ok(rows > 0)
    }

    // Pitch operations

    fn create_pitch(&self, pitch: &NewPitch) -> Result<Pitch> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO pitches (game_id, pitcher_id, type_id, result_id, velocity, x, y,
                                  inning, half, comment, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                pitch.game_id,
                pitch.pitcher_id,
                pitch.type_id,
                pitch.result_id,
                pitch.velocity,
                pitch.x,
                pitch.y,
                pitch.inning,
                pitch.half.as_str(),
                pitch.comment,
                format_datetime(&Utc::now()),
            ],
        );

        match result {
            Ok(_) => {}
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(Error::BadRequest(
                    "Invalid pitch type, result or pitcher".to_string(),
                ));
            }
            Err(e) => return Err(Error::from(e)),
        }

        fetch_pitch(&conn, conn.last_insert_rowid())?.ok_or(Error::NotFound)
    }

    fn get_pitch(&self, id: i64) -> Result<Option<Pitch>> {
        fetch_pitch(&self.conn(), id)
    }

    fn list_game_pitches(&self, game_id: i64) -> Result<Vec<PitchDetail>> {
        query_list(
            &self.conn(),
            &format!(
                "SELECT {PITCH_COLUMNS}, pt.name, pr.name, pi.first_name, pi.last_name
                 FROM pitches p
                 JOIN pitch_types pt ON pt.id = p.type_id
                 JOIN pitch_results pr ON pr.id = p.result_id
                 JOIN pitchers pi ON pi.id = p.pitcher_id
                 WHERE p.game_id = ?1
                 ORDER BY p.inning, CASE p.half WHEN 'top' THEN 0 ELSE 1 END, p.id"
            ),
            params![game_id],
            |row| {
                Ok(PitchDetail {
                    pitch: pitch_from_row(row)?,
                    type_name: row.get(12)?,
                    result_name: row.get(13)?,
                    pitcher_first_name: row.get(14)?,
                    pitcher_last_name: row.get(15)?,
                })
            },
        )
    }

    fn update_pitch(&self, pitch: &Pitch) -> Result<()> {
        let result = self.conn().execute(
            "UPDATE pitches SET pitcher_id = ?1, type_id = ?2, result_id = ?3, velocity = ?4,
                                x = ?5, y = ?6, inning = ?7, half = ?8, comment = ?9
             WHERE id = ?10",
            params![
                pitch.pitcher_id,
                pitch.type_id,
                pitch.result_id,
                pitch.velocity,
                pitch.x,
                pitch.y,
                pitch.inning,
                pitch.half.as_str(),
                pitch.comment,
                pitch.id,
            ],
        );

        match result {
            Ok(0) => Err(Error::NotFound),
            Ok(_) => Ok(()),
            Err(e) if is_foreign_key_violation(&e) => Err(Error::BadRequest(
                "Invalid pitch type, result or pitcher".to_string(),
            )),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn delete_pitch(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM pitches WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Lookup tables

    fn list_pitch_types(&self) -> Result<Vec<PitchType>> {
        query_list(
            &self.conn(),
            "SELECT id, name FROM pitch_types ORDER BY name",
            [],
            |row| {
                Ok(PitchType {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
    }

    fn list_pitch_results(&self) -> Result<Vec<PitchResult>> {
        query_list(
            &self.conn(),
            "SELECT id, name FROM pitch_results ORDER BY id",
            [],
            |row| {
                Ok(PitchResult {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
    }

    // Aggregates

    fn pitch_aggregates(&self, filter: ScopeFilter) -> Result<ScopeAggregates> {
        let (clause, id) = scope_clause(filter);
        let conn = self.conn();

        let (total, avg_velocity) = conn.query_row(
            &format!("SELECT COUNT(*), AVG(p.velocity) FROM pitches p WHERE {clause}"),
            params![id],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<f64>>(1)?)),
        )?;

        let zones = query_list(
            &conn,
            &format!(
                "SELECT p.x, p.y, COUNT(*) FROM pitches p WHERE {clause}
                 GROUP BY p.x, p.y ORDER BY p.y, p.x"
            ),
            params![id],
            |row| {
                Ok(ZoneRow {
                    x: row.get(0)?,
                    y: row.get(1)?,
                    count: row.get(2)?,
                })
            },
        )?;

        let results = query_list(
            &conn,
            &format!(
                "SELECT p.result_id, pr.name, COUNT(*)
                 FROM pitches p
                 LEFT JOIN pitch_results pr ON pr.id = p.result_id
                 WHERE {clause}
                 GROUP BY p.result_id ORDER BY p.result_id"
            ),
            params![id],
            |row| {
                Ok(ResultRow {
                    result_id: row.get(0)?,
                    name: row.get(1)?,
                    count: row.get(2)?,
                })
            },
        )?;

        let pitchers = match filter {
            ScopeFilter::Team(_) => query_list(
                &conn,
                &format!(
                    "SELECT p.pitcher_id, pi.first_name, pi.last_name, COUNT(*), AVG(p.velocity)
                     FROM pitches p
                     LEFT JOIN pitchers pi ON pi.id = p.pitcher_id
                     WHERE {clause}
                     GROUP BY p.pitcher_id ORDER BY p.pitcher_id"
                ),
                params![id],
                |row| {
                    Ok(PitcherRow {
                        pitcher_id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        total: row.get(3)?,
                        avg_velocity: row.get(4)?,
                    })
                },
            )?,
            ScopeFilter::Pitcher(_) => Vec::new(),
        };

        Ok(ScopeAggregates {
            total,
            avg_velocity,
            zones,
            results,
            pitchers,
        })
    }

    fn count_teams(&self, owner_id: i64) -> Result<i64> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM teams WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn count_games(&self, owner_id: i64) -> Result<i64> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM games WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn count_pitchers(&self, owner_id: i64) -> Result<i64> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pitchers pi JOIN teams t ON t.id = pi.team_id WHERE t.owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn count_games_by_state(&self, owner_id: i64) -> Result<Vec<StateCount>> {
        query_list(
            &self.conn(),
            "SELECT state, COUNT(*) FROM games WHERE owner_id = ?1 GROUP BY state ORDER BY state",
            params![owner_id],
            |row| {
                Ok(StateCount {
                    name: row.get(0)?,
                    value: row.get(1)?,
                })
            },
        )
    }

    fn count_pitchers_per_team(&self, owner_id: i64) -> Result<Vec<TeamPitcherCount>> {
        query_list(
            &self.conn(),
            "SELECT t.name, COUNT(pi.id)
             FROM teams t
             LEFT JOIN pitchers pi ON pi.team_id = t.id
             WHERE t.owner_id = ?1
             GROUP BY t.id ORDER BY t.id",
            params![owner_id],
            |row| {
                Ok(TeamPitcherCount {
                    name: row.get(0)?,
                    pitchers: row.get(1)?,
                })
            },
        )
    }

    fn list_upcoming_games(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<UpcomingGame>> {
        query_list(
            &self.conn(),
            "SELECT g.id, g.scheduled_at, home.name, away.name
             FROM games g
             JOIN teams home ON home.id = g.home_team_id
             JOIN teams away ON away.id = g.away_team_id
             WHERE g.owner_id = ?1 AND g.state = ?2 AND g.scheduled_at >= ?3
             ORDER BY g.scheduled_at ASC
             LIMIT ?4",
            params![
                owner_id,
                GameState::Scheduled.as_str(),
                format_datetime(&from),
                limit
            ],
            |row| {
                Ok(UpcomingGame {
                    id: row.get(0)?,
                    scheduled_at: parse_datetime(&row.get::<_, String>(1)?),
                    home_team: row.get(2)?,
                    away_team: row.get(3)?,
                })
            },
        )
    }
}
