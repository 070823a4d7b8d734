mod common;

use axum::http::StatusCode;
use gymlog::models::{ProgramDay, Unit};
use serde_json::json;

use common::{logged_set, skipped_set};

#[tokio::test]
async fn test_last_sets_requires_exercise_id() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let (status, body) = common::get_json(&app, "/api/workouts/last-sets").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "exerciseId is required" }));
}

#[tokio::test]
async fn test_last_sets_rejects_malformed_before_date() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let (status, _) =
        common::get_json(&app, "/api/workouts/last-sets?exerciseId=1&beforeDate=01/10/2024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_last_sets_without_history_defaults_to_lbs() {
    let pool = common::setup_test_db();
    let bench =
        common::create_test_exercise(&pool, "Bench Press", ProgramDay::A, 1, 3, false).await;
    let app = common::create_test_app(pool);

    let (status, body) = common::get_json(
        &app,
        &format!("/api/workouts/last-sets?exerciseId={}", bench.id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sets": [], "unit": "lbs" }));
}

#[tokio::test]
async fn test_last_sets_returns_latest_session() {
    let pool = common::setup_test_db();
    let bench =
        common::create_test_exercise(&pool, "Bench Press", ProgramDay::A, 1, 3, false).await;

    common::create_test_workout(
        &pool,
        "2024-01-05",
        ProgramDay::A,
        vec![logged_set(bench.id, 1, 90.0, 12, Unit::Lbs)],
    )
    .await;
    let latest = common::create_test_workout(
        &pool,
        "2024-01-10",
        ProgramDay::A,
        vec![
            logged_set(bench.id, 1, 40.0, 10, Unit::Kg),
            skipped_set(bench.id, 2),
        ],
    )
    .await;

    let app = common::create_test_app(pool);
    let (status, body) = common::get_json(
        &app,
        &format!("/api/workouts/last-sets?exerciseId={}", bench.id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], json!("2024-01-10"));
    assert_eq!(body["unit"], json!("kg"));

    let sets = body["sets"].as_array().unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["sessionId"], json!(latest.id));
    assert_eq!(sets[0]["setNumber"], json!(1));
    assert_eq!(sets[0]["weight"], json!(40.0));
    assert_eq!(sets[0]["reps"], json!(10));
    assert_eq!(sets[1]["skipped"], json!(true));
    assert_eq!(sets[1]["weight"], json!(null));
    assert_eq!(sets[1]["reps"], json!(null));
}

#[tokio::test]
async fn test_last_sets_never_returns_session_on_or_after_before_date() {
    let pool = common::setup_test_db();
    let bench =
        common::create_test_exercise(&pool, "Bench Press", ProgramDay::A, 1, 3, false).await;

    for (date, weight) in [("2024-01-05", 90.0), ("2024-01-10", 95.0), ("2024-01-15", 100.0)] {
        common::create_test_workout(
            &pool,
            date,
            ProgramDay::A,
            vec![logged_set(bench.id, 1, weight, 8, Unit::Lbs)],
        )
        .await;
    }

    let app = common::create_test_app(pool);

    let cases = [
        ("2024-01-16", Some("2024-01-15")),
        ("2024-01-15", Some("2024-01-10")),
        ("2024-01-11", Some("2024-01-10")),
        ("2024-01-10", Some("2024-01-05")),
        ("2024-01-05", None),
    ];
    for (before, expected) in cases {
        let (status, body) = common::get_json(
            &app,
            &format!(
                "/api/workouts/last-sets?exerciseId={}&beforeDate={}",
                bench.id, before
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        match expected {
            Some(date) => assert_eq!(body["date"], json!(date), "beforeDate={}", before),
            None => assert_eq!(body, json!({ "sets": [], "unit": "lbs" })),
        }
    }
}

#[tokio::test]
async fn test_last_sets_ignores_other_exercises() {
    let pool = common::setup_test_db();
    let bench =
        common::create_test_exercise(&pool, "Bench Press", ProgramDay::A, 1, 3, false).await;
    let squat =
        common::create_test_exercise(&pool, "Back Squat", ProgramDay::A, 2, 3, false).await;

    common::create_test_workout(
        &pool,
        "2024-01-05",
        ProgramDay::A,
        vec![logged_set(bench.id, 1, 90.0, 12, Unit::Lbs)],
    )
    .await;
    common::create_test_workout(
        &pool,
        "2024-01-10",
        ProgramDay::A,
        vec![logged_set(squat.id, 1, 185.0, 5, Unit::Lbs)],
    )
    .await;

    let app = common::create_test_app(pool);
    let (_, body) = common::get_json(
        &app,
        &format!("/api/workouts/last-sets?exerciseId={}", bench.id),
    )
    .await;

    assert_eq!(body["date"], json!("2024-01-05"));
    let sets = body["sets"].as_array().unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0]["exerciseId"], json!(bench.id));
}
