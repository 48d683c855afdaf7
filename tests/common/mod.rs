#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use scoutbook::auth::JwtConfig;
use scoutbook::server::{AppState, create_router};
use scoutbook::store::{SqliteStore, Store};

pub const PASSWORD: &str = "Fastball99";

pub struct TestApp {
    _temp: TempDir,
    pub router: Router,
    pub store: Arc<SqliteStore>,
}

/// Builds the real router over a fresh database in a temp dir.
pub fn build_test_app() -> TestApp {
    let temp = TempDir::new().expect("create temp dir");
    let store = SqliteStore::new(temp.path().join("scoutbook.db")).expect("open store");
    store.initialize().expect("initialize store");
    let store = Arc::new(store);

    let state = Arc::new(AppState::new(
        store.clone(),
        JwtConfig::new("integration-test-secret"),
    ));

    TestApp {
        _temp: temp,
        router: create_router(state),
        store,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, cookie: &str) -> Response {
        self.request(Method::GET, uri, Some(cookie), None).await
    }

    pub async fn post(&self, uri: &str, cookie: &str, body: Value) -> Response {
        self.request(Method::POST, uri, Some(cookie), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, cookie: &str, body: Value) -> Response {
        self.request(Method::PUT, uri, Some(cookie), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, cookie: &str) -> Response {
        self.request(Method::PATCH, uri, Some(cookie), None).await
    }

    pub async fn delete(&self, uri: &str, cookie: &str) -> Response {
        self.request(Method::DELETE, uri, Some(cookie), None).await
    }

    /// Registers a user and returns the `token=...` cookie pair.
    pub async fn register(&self, email: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": "Scout", "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        session_cookie(&response)
    }

    /// Creates a team through the API and returns its id.
    pub async fn create_team(&self, cookie: &str, name: &str) -> i64 {
        let response = self
            .post("/api/teams", cookie, json!({ "name": name }))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().expect("team id")
    }

    /// Creates a pitcher through the API and returns its id.
    pub async fn create_pitcher(&self, cookie: &str, team_id: i64, first_name: &str) -> i64 {
        let response = self
            .post(
                "/api/pitchers",
                cookie,
                json!({ "first_name": first_name, "last_name": "Lopez", "team_id": team_id }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().expect("pitcher id")
    }

    /// Schedules a game through the API and returns its id.
    pub async fn create_game(
        &self,
        cookie: &str,
        (home_team, home_pitcher): (i64, i64),
        (away_team, away_pitcher): (i64, i64),
        date: &str,
    ) -> i64 {
        let response = self
            .post(
                "/api/games",
                cookie,
                json!({
                    "home_team_id": home_team,
                    "away_team_id": away_team,
                    "home_pitcher_id": home_pitcher,
                    "away_pitcher_id": away_pitcher,
                    "date": date,
                    "time": "19:00",
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().expect("game id")
    }

    /// Records a pitch through the API and returns the response body.
    pub async fn create_pitch(&self, cookie: &str, game_id: i64, body: Value) -> Value {
        let response = self
            .post(&format!("/api/games/{game_id}/pitches"), cookie, body)
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

/// The `name=value` part of the session `Set-Cookie` header.
pub fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split(';').next())
        .expect("session cookie")
        .to_string()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}
