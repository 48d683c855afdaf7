//! HTTP-level tests driving the real router with `oneshot`.
//!
//! Every test builds its own app over a fresh SQLite database in a temp dir.

mod common;

use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{Method, Request, StatusCode};
use axum::body::Body;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{PASSWORD, TestApp, body_json, build_test_app, session_cookie};

const FUTURE: &str = "01/06/2099";

/// One user with two teams, one pitcher each and a game between them.
struct League {
    cookie: String,
    home_team: i64,
    home_pitcher: i64,
    away_team: i64,
    away_pitcher: i64,
    game: i64,
}

async fn league(app: &TestApp, email: &str) -> League {
    let cookie = app.register(email).await;
    let suffix = email.split('@').next().unwrap_or(email);

    let home_team = app.create_team(&cookie, &format!("Sultanes {suffix}")).await;
    let away_team = app.create_team(&cookie, &format!("Tigres {suffix}")).await;
    let home_pitcher = app.create_pitcher(&cookie, home_team, "Ana").await;
    let away_pitcher = app.create_pitcher(&cookie, away_team, "Eva").await;
    let game = app
        .create_game(
            &cookie,
            (home_team, home_pitcher),
            (away_team, away_pitcher),
            FUTURE,
        )
        .await;

    League {
        cookie,
        home_team,
        home_pitcher,
        away_team,
        away_pitcher,
        game,
    }
}

fn pitch(pitcher_id: i64, extra: Value) -> Value {
    let mut body = json!({
        "type_id": 1,
        "result_id": 1,
        "pitcher_id": pitcher_id,
        "inning": 1,
        "half": "top",
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        body.extend(extra.clone());
    }
    body
}

// ---------------------------------------------------------------------------
// Health and authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_is_public() {
    let app = build_test_app();

    let response = app.request(Method::GET, "/api/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "scoutbook");
}

#[tokio::test]
async fn test_missing_credentials_is_unauthorized() {
    let app = build_test_app();

    let response = app.request(Method::GET, "/api/teams", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(WWW_AUTHENTICATE));
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = build_test_app();

    let response = app.get("/api/teams/1/stats", "token=garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_me_logout() {
    let app = build_test_app();

    let response = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "  Marta ", "email": "Marta@Example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response.headers()[axum::http::header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    let cookie = session_cookie(&response);
    assert!(body_json(response).await["user_id"].is_i64());

    let me = body_json(app.get("/api/auth/me", &cookie).await).await;
    assert_eq!(me["name"], "Marta");
    assert_eq!(me["email"], "marta@example.com");
    assert_eq!(me["role"], "user");
    assert!(me.get("password_hash").is_none());

    let response = app
        .request(Method::POST, "/api/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).ends_with("token="));
}

#[tokio::test]
async fn test_login_and_bearer_header() {
    let app = build_test_app();
    app.register("scout@example.com").await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "scout@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let token = cookie.trim_start_matches("token=").to_string();

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = build_test_app();
    app.register("scout@example.com").await;

    for body in [
        json!({ "email": "scout@example.com", "password": "Wrong-password1" }),
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    ] {
        let response = app
            .request(Method::POST, "/api/auth/login", None, Some(body))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = build_test_app();
    app.register("scout@example.com").await;

    let cases = [
        (json!({ "name": "Scout", "email": "scout@example.com", "password": PASSWORD }), StatusCode::CONFLICT),
        (json!({ "name": "Scout", "email": "not-an-email", "password": PASSWORD }), StatusCode::BAD_REQUEST),
        (json!({ "name": "Scout", "email": "new@example.com", "password": "lowercase1" }), StatusCode::BAD_REQUEST),
        (json!({ "name": "S", "email": "new@example.com", "password": PASSWORD }), StatusCode::BAD_REQUEST),
        (json!({ "email": "new@example.com", "password": PASSWORD }), StatusCode::BAD_REQUEST),
    ];

    for (body, expected) in cases {
        let response = app
            .request(Method::POST, "/api/auth/register", None, Some(body))
            .await;
        assert_eq!(response.status(), expected);
    }
}

// ---------------------------------------------------------------------------
// Ownership and input errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_other_users_team_is_forbidden() {
    let app = build_test_app();
    let owner = league(&app, "owner@example.com").await;
    let intruder = app.register("intruder@example.com").await;

    for uri in [
        format!("/api/teams/{}", owner.home_team),
        format!("/api/teams/{}/stats", owner.home_team),
        format!("/api/pitchers/{}/stats", owner.home_pitcher),
        format!("/api/games/{}", owner.game),
        format!("/api/games/{}/pitches", owner.game),
    ] {
        let response = app.get(&uri, &intruder).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    let response = app.delete(&format!("/api/teams/{}", owner.away_team), &intruder).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_intruder_cannot_record_pitches_for_foreign_pitcher() {
    let app = build_test_app();
    let owner = league(&app, "owner@example.com").await;
    let intruder = league(&app, "intruder@example.com").await;

    let response = app
        .post(
            &format!("/api/games/{}/pitches", intruder.game),
            &intruder.cookie,
            pitch(owner.home_pitcher, json!({})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_intruder_cannot_write_to_foreign_records() {
    let app = build_test_app();
    let owner = league(&app, "owner@example.com").await;
    let intruder = league(&app, "intruder@example.com").await;

    let recorded = app
        .create_pitch(
            &owner.cookie,
            owner.game,
            pitch(owner.home_pitcher, json!({ "velocity": 90.0, "zone": 12 })),
        )
        .await;
    let pitch_uri = format!("/api/pitches/{}", recorded["id"]);
    let pitcher_uri = format!("/api/pitchers/{}", owner.home_pitcher);
    let game_uri = format!("/api/games/{}", owner.game);
    let team_uri = format!("/api/teams/{}", owner.home_team);

    let attempts = [
        (Method::PUT, pitch_uri.clone(), Some(json!({ "velocity": 50.0, "zone": 0 }))),
        (Method::DELETE, pitch_uri.clone(), None),
        (Method::PUT, pitcher_uri.clone(), Some(json!({ "first_name": "Hijacked" }))),
        (Method::DELETE, pitcher_uri.clone(), None),
        (Method::PUT, team_uri.clone(), Some(json!({ "city": "Elsewhere" }))),
        (Method::PATCH, format!("{game_uri}/finish"), None),
        (Method::DELETE, game_uri.clone(), None),
        (
            Method::POST,
            format!("{game_uri}/pitches"),
            Some(pitch(intruder.home_pitcher, json!({}))),
        ),
    ];

    for (method, uri, body) in attempts {
        let response = app
            .request(method.clone(), &uri, Some(&intruder.cookie), body)
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{method} {uri}");
    }

    let pitches = body_json(app.get(&format!("{game_uri}/pitches"), &owner.cookie).await).await;
    let pitches = pitches.as_array().unwrap();
    assert_eq!(pitches.len(), 1);
    assert_eq!(pitches[0]["velocity"], 90.0);
    assert_eq!((pitches[0]["x"].clone(), pitches[0]["y"].clone()), (json!(2), json!(2)));

    let pitcher = body_json(app.get(&pitcher_uri, &owner.cookie).await).await;
    assert_eq!(pitcher["first_name"], "Ana");

    let team = body_json(app.get(&team_uri, &owner.cookie).await).await;
    assert!(team.get("city").is_none());

    let game = body_json(app.get(&game_uri, &owner.cookie).await).await;
    assert_eq!(game["state"], "SCHEDULED");
}

#[tokio::test]
async fn test_absent_and_malformed_ids() {
    let app = build_test_app();
    let cookie = app.register("scout@example.com").await;

    let response = app.get("/api/teams/9999/stats", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    for uri in ["/api/teams/abc/stats", "/api/pitchers/0/stats", "/api/games/-4"] {
        let response = app.get(uri, &cookie).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["error"], "Invalid id");
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = build_test_app();
    let cookie = app.register("scout@example.com").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/teams")
        .header(axum::http::header::COOKIE, &cookie)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// Teams and pitchers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_team_lifecycle() {
    let app = build_test_app();
    let cookie = app.register("scout@example.com").await;

    let response = app
        .post("/api/teams", &cookie, json!({ "name": " Charros ", "city": "  " }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let team = body_json(response).await;
    assert_eq!(team["name"], "Charros");
    assert!(team.get("city").is_none());
    let id = team["id"].as_i64().unwrap();

    let response = app
        .post("/api/teams", &cookie, json!({ "name": "Charros" }))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.put(&format!("/api/teams/{id}"), &cookie, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .put(&format!("/api/teams/{id}"), &cookie, json!({ "city": "Jalisco" }))
        .await;
    assert_eq!(body_json(response).await["city"], "Jalisco");

    let pitcher = app.create_pitcher(&cookie, id, "Luis").await;

    let response = app.delete(&format!("/api/teams/{id}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let teams = body_json(app.get("/api/teams", &cookie).await).await;
    assert_eq!(teams[0]["pitcher_count"], 1);

    let response = app.delete(&format!("/api/pitchers/{pitcher}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.delete(&format!("/api/teams/{id}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/teams/{id}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pitcher_referenced_by_game_cannot_be_deleted() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let response = app
        .delete(&format!("/api/pitchers/{}", l.home_pitcher), &l.cookie)
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_pitcher_can_move_between_own_teams_only() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;
    let other = league(&app, "other@example.com").await;

    let response = app
        .put(
            &format!("/api/pitchers/{}", l.home_pitcher),
            &l.cookie,
            json!({ "team_id": other.home_team }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .put(
            &format!("/api/pitchers/{}", l.home_pitcher),
            &l.cookie,
            json!({ "team_id": l.away_team, "jersey_number": 21 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["team_id"], l.away_team);
    assert_eq!(body["jersey_number"], 21);
}

// ---------------------------------------------------------------------------
// Games and pitches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_game_creation_validation() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let base = json!({
        "home_team_id": l.home_team,
        "away_team_id": l.away_team,
        "home_pitcher_id": l.home_pitcher,
        "away_pitcher_id": l.away_pitcher,
        "date": "2099-06-01",
        "time": "19:00",
    });
    let response = app.post("/api/games", &l.cookie, base).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing = json!({ "home_team_id": l.home_team, "date": FUTURE, "time": "19:00" });
    let response = app.post("/api/games", &l.cookie, missing).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown_team = json!({
        "home_team_id": 9999,
        "away_team_id": l.away_team,
        "home_pitcher_id": l.home_pitcher,
        "away_pitcher_id": l.away_pitcher,
        "date": FUTURE,
        "time": "19:00",
    });
    let response = app.post("/api/games", &l.cookie, unknown_team).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_game_detail_and_finish() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let detail = body_json(app.get(&format!("/api/games/{}", l.game), &l.cookie).await).await;
    assert_eq!(detail["state"], "SCHEDULED");
    assert_eq!(detail["start_time"], "19:00");
    assert_eq!(detail["home_team"]["id"], l.home_team);
    assert_eq!(detail["home_team"]["pitchers"].as_array().unwrap().len(), 1);
    assert_eq!(detail["away_pitcher"]["first_name"], "Eva");

    let response = app
        .patch(&format!("/api/games/{}/finish", l.game), &l.cookie)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["state"], "FINISHED");

    let games = body_json(app.get("/api/games", &l.cookie).await).await;
    assert_eq!(games[0]["state"], "FINISHED");
    assert_eq!(games[0]["home_pitcher"], "Ana Lopez");
}

#[tokio::test]
async fn test_zone_is_stored_as_grid_coordinates() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let created = app
        .create_pitch(&l.cookie, l.game, pitch(l.home_pitcher, json!({ "zone": 12 })))
        .await;
    assert_eq!(created["x"], 2);
    assert_eq!(created["y"], 2);

    let stats = body_json(
        app.get(&format!("/api/pitchers/{}/stats", l.home_pitcher), &l.cookie)
            .await,
    )
    .await;
    let zones: Vec<i64> = stats["zoneCounts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(zones.len(), 25);
    assert_eq!(zones[12], 1);
    assert_eq!(zones.iter().sum::<i64>(), 1);
}

#[tokio::test]
async fn test_unreadable_coordinates_fall_back_to_zone() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let created = app
        .create_pitch(
            &l.cookie,
            l.game,
            pitch(l.home_pitcher, json!({ "zone": 12, "x": "abc", "y": 1 })),
        )
        .await;
    assert_eq!((created["x"].clone(), created["y"].clone()), (json!(2), json!(2)));

    let from_strings = app
        .create_pitch(
            &l.cookie,
            l.game,
            pitch(l.home_pitcher, json!({ "zone": 12, "x": "4", "y": 0.0 })),
        )
        .await;
    assert_eq!(
        (from_strings["x"].clone(), from_strings["y"].clone()),
        (json!(4), json!(0))
    );

    let updated = body_json(
        app.put(
            &format!("/api/pitches/{}", created["id"]),
            &l.cookie,
            json!({ "zone": 24, "x": 1, "y": {} }),
        )
        .await,
    )
    .await;
    assert_eq!((updated["x"].clone(), updated["y"].clone()), (json!(4), json!(4)));
}

#[tokio::test]
async fn test_pitch_location_fallbacks() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let no_location = app
        .create_pitch(&l.cookie, l.game, pitch(l.home_pitcher, json!({})))
        .await;
    assert_eq!((no_location["x"].clone(), no_location["y"].clone()), (json!(0), json!(0)));

    let clamped = app
        .create_pitch(&l.cookie, l.game, pitch(l.home_pitcher, json!({ "zone": 99 })))
        .await;
    assert_eq!((clamped["x"].clone(), clamped["y"].clone()), (json!(4), json!(4)));

    let explicit = app
        .create_pitch(
            &l.cookie,
            l.game,
            pitch(l.home_pitcher, json!({ "zone": 3, "x": 5, "y": 1 })),
        )
        .await;
    assert_eq!((explicit["x"].clone(), explicit["y"].clone()), (json!(5), json!(1)));

    let stats = body_json(
        app.get(&format!("/api/pitchers/{}/stats", l.home_pitcher), &l.cookie)
            .await,
    )
    .await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["zoneCounts"][0], 1);
    assert_eq!(stats["zoneCounts"][24], 1);
    let bucketed: i64 = stats["zoneCounts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .sum();
    assert_eq!(bucketed, 2);
}

#[tokio::test]
async fn test_pitch_validation() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;
    let uri = format!("/api/games/{}/pitches", l.game);

    let cases = [
        pitch(l.home_pitcher, json!({ "half": "middle" })),
        pitch(l.home_pitcher, json!({ "inning": 0 })),
        pitch(l.home_pitcher, json!({ "result_id": 999 })),
        pitch(l.home_pitcher, json!({ "type_id": 999 })),
        json!({ "type_id": 1, "result_id": 1, "inning": 1, "half": "top" }),
    ];
    for body in cases {
        let response = app.post(&uri, &l.cookie, body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }

    let response = app.post(&uri, &l.cookie, pitch(9999, json!({}))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pitch_update_velocity_semantics() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let created = app
        .create_pitch(
            &l.cookie,
            l.game,
            pitch(l.home_pitcher, json!({ "velocity": 88.0, "comment": "high" })),
        )
        .await;
    let uri = format!("/api/pitches/{}", created["id"]);

    let kept = body_json(app.put(&uri, &l.cookie, json!({ "inning": 2 })).await).await;
    assert_eq!(kept["velocity"], 88.0);
    assert_eq!(kept["inning"], 2);
    assert_eq!(kept["comment"], "high");

    let moved = body_json(app.put(&uri, &l.cookie, json!({ "zone": 24 })).await).await;
    assert_eq!((moved["x"].clone(), moved["y"].clone()), (json!(4), json!(4)));

    let cleared = body_json(
        app.put(&uri, &l.cookie, json!({ "velocity": null, "comment": "" }))
            .await,
    )
    .await;
    assert!(cleared["velocity"].is_null());
    assert!(cleared.get("comment").is_none());
}

#[tokio::test]
async fn test_pitches_listed_in_game_order() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    app.create_pitch(
        &l.cookie,
        l.game,
        pitch(l.away_pitcher, json!({ "inning": 2 })),
    )
    .await;
    app.create_pitch(
        &l.cookie,
        l.game,
        pitch(l.away_pitcher, json!({ "half": "bottom" })),
    )
    .await;
    app.create_pitch(&l.cookie, l.game, pitch(l.home_pitcher, json!({})))
        .await;

    let list = body_json(
        app.get(&format!("/api/games/{}/pitches", l.game), &l.cookie)
            .await,
    )
    .await;
    let order: Vec<(i64, String)> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["inning"].as_i64().unwrap(), p["half"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        order,
        [(1, "top".to_string()), (1, "bottom".to_string()), (2, "top".to_string())]
    );
    assert_eq!(list[0]["type_name"], "Drop");
    assert_eq!(list[0]["result_name"], "STRIKE");
}

#[tokio::test]
async fn test_deleting_game_removes_its_pitches() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let created = app
        .create_pitch(&l.cookie, l.game, pitch(l.home_pitcher, json!({})))
        .await;

    let response = app.delete(&format!("/api/games/{}", l.game), &l.cookie).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .delete(&format!("/api/pitches/{}", created["id"]), &l.cookie)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stats = body_json(
        app.get(&format!("/api/teams/{}/stats", l.home_team), &l.cookie)
            .await,
    )
    .await;
    assert_eq!(stats["total"], 0);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_empty_team_stats() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    let stats = body_json(
        app.get(&format!("/api/teams/{}/stats", l.home_team), &l.cookie)
            .await,
    )
    .await;

    assert_eq!(stats["total"], 0);
    assert!(stats["avgVel"].is_null());
    assert_eq!(stats["zoneCounts"], json!(vec![0; 25]));
    assert_eq!(stats["byResultado"], json!({}));
    assert_eq!(stats["pitchers"], json!([]));
}

#[tokio::test]
async fn test_team_stats_rollup() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;
    let reliever = app.create_pitcher(&l.cookie, l.home_team, "Bea").await;

    for (velocity, result) in [(json!(90.0), 1), (json!(92.0), 2), (Value::Null, 2)] {
        app.create_pitch(
            &l.cookie,
            l.game,
            pitch(
                l.home_pitcher,
                json!({ "velocity": velocity, "result_id": result, "zone": 6 }),
            ),
        )
        .await;
    }
    app.create_pitch(&l.cookie, l.game, pitch(l.away_pitcher, json!({ "velocity": 70.0 })))
        .await;

    let stats = body_json(
        app.get(&format!("/api/teams/{}/stats", l.home_team), &l.cookie)
            .await,
    )
    .await;

    assert_eq!(stats["total"], 3);
    assert_eq!(stats["avgVel"], 91.0);
    assert_eq!(stats["zoneCounts"][6], 3);
    assert_eq!(stats["byResultado"], json!({ "STRIKE": 1, "BALL": 2 }));

    let pitchers = stats["pitchers"].as_array().unwrap();
    assert_eq!(pitchers.len(), 1);
    assert_eq!(pitchers[0]["id"], l.home_pitcher);
    assert_eq!(pitchers[0]["firstName"], "Ana");
    assert_eq!(pitchers[0]["lastName"], "Lopez");
    assert_eq!(pitchers[0]["total"], 3);
    assert_eq!(pitchers[0]["avgVel"], 91.0);
    assert!(pitchers.iter().all(|p| p["id"] != reliever));
}

#[tokio::test]
async fn test_pitcher_stats_have_no_rollup() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;

    app.create_pitch(&l.cookie, l.game, pitch(l.away_pitcher, json!({ "velocity": 70.0 })))
        .await;

    let stats = body_json(
        app.get(&format!("/api/pitchers/{}/stats", l.away_pitcher), &l.cookie)
            .await,
    )
    .await;

    assert_eq!(stats["total"], 1);
    assert_eq!(stats["avgVel"], 70.0);
    assert!(stats.get("pitchers").is_none());
}

// ---------------------------------------------------------------------------
// Lookups and dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_lookups() {
    let app = build_test_app();
    let cookie = app.register("scout@example.com").await;

    let types = body_json(app.get("/api/lookup/pitch-types", &cookie).await).await;
    let names: Vec<&str> = types
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Changeup", "Curve", "Drop", "Riser"]);

    let results = body_json(app.get("/api/lookup/pitch-results", &cookie).await).await;
    assert_eq!(results.as_array().unwrap().len(), 5);
    assert_eq!(results[0]["name"], "STRIKE");
}

#[tokio::test]
async fn test_dashboard() {
    let app = build_test_app();
    let l = league(&app, "scout@example.com").await;
    app.create_game(
        &l.cookie,
        (l.away_team, l.away_pitcher),
        (l.home_team, l.home_pitcher),
        "01/01/2000",
    )
    .await;

    let dashboard = body_json(app.get("/api/dashboard", &l.cookie).await).await;

    assert_eq!(dashboard["kpis"], json!({ "teams": 2, "pitchers": 2, "games": 2 }));
    assert_eq!(
        dashboard["games_by_state"],
        json!([{ "name": "SCHEDULED", "value": 2 }])
    );
    assert_eq!(dashboard["pitchers_per_team"].as_array().unwrap().len(), 2);

    let upcoming = dashboard["upcoming_games"].as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["id"], l.game);
}
