//! # Scoutbook
//!
//! A backend for pitch-by-pitch baseball scouting, usable both as a standalone
//! binary and as a library.
//!
//! Scouts register, manage their teams, pitchers and games, record every pitch
//! (type, result, velocity, location on a 5x5 zone grid) and read aggregated
//! stats per pitcher or per team.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! scoutbook = { version = "0.0", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scoutbook::auth::JwtConfig;
//! use scoutbook::server::{AppState, create_router};
//! use scoutbook::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/scoutbook.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), JwtConfig::new("change-me")));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `scoutbook` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod stats;
pub mod store;
pub mod types;
