pub const SCHEMA: &str = r#"
-- Scouts; every other entity is owned by one of them
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2id PHC string
    role TEXT NOT NULL DEFAULT 'user',
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    city TEXT,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT DEFAULT (datetime('now'))
);

-- A team with pitchers cannot be deleted
CREATE TABLE IF NOT EXISTS pitchers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER,
    jersey_number INTEGER,
    team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE RESTRICT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    home_team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE RESTRICT,
    away_team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE RESTRICT,
    home_pitcher_id INTEGER NOT NULL REFERENCES pitchers(id) ON DELETE RESTRICT,
    away_pitcher_id INTEGER NOT NULL REFERENCES pitchers(id) ON DELETE RESTRICT,
    scheduled_at TEXT NOT NULL,
    start_time TEXT NOT NULL,      -- HH:MM as entered
    field TEXT,
    state TEXT NOT NULL DEFAULT 'SCHEDULED',
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Lookup tables, seeded below
CREATE TABLE IF NOT EXISTS pitch_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS pitch_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Pitch events. x/y are stored as given; off-grid values are excluded
-- from zone histograms at read time.
CREATE TABLE IF NOT EXISTS pitches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE RESTRICT,
    pitcher_id INTEGER NOT NULL REFERENCES pitchers(id) ON DELETE RESTRICT,
    type_id INTEGER NOT NULL REFERENCES pitch_types(id),
    result_id INTEGER NOT NULL REFERENCES pitch_results(id),
    velocity REAL,
    x INTEGER NOT NULL,
    y INTEGER NOT NULL,
    inning INTEGER NOT NULL,
    half TEXT NOT NULL,            -- 'top' | 'bottom'
    comment TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_teams_owner ON teams(owner_id);
CREATE INDEX IF NOT EXISTS idx_pitchers_team ON pitchers(team_id);
CREATE INDEX IF NOT EXISTS idx_games_owner ON games(owner_id);
CREATE INDEX IF NOT EXISTS idx_pitches_game ON pitches(game_id);
CREATE INDEX IF NOT EXISTS idx_pitches_pitcher ON pitches(pitcher_id);
"#;

pub const SEED: &str = r#"
INSERT OR IGNORE INTO pitch_types (name) VALUES ('Drop');
INSERT OR IGNORE INTO pitch_types (name) VALUES ('Riser');
INSERT OR IGNORE INTO pitch_types (name) VALUES ('Curve');
INSERT OR IGNORE INTO pitch_types (name) VALUES ('Changeup');

INSERT OR IGNORE INTO pitch_results (name) VALUES ('STRIKE');
INSERT OR IGNORE INTO pitch_results (name) VALUES ('BALL');
INSERT OR IGNORE INTO pitch_results (name) VALUES ('HIT');
INSERT OR IGNORE INTO pitch_results (name) VALUES ('OUT');
INSERT OR IGNORE INTO pitch_results (name) VALUES ('FOUL');
"#;
