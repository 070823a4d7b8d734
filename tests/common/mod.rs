#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gymlog::db::{create_memory_pool, DbPool};
use gymlog::handlers::{exercises, progress, workouts};
use gymlog::migrations::run_migrations_for_tests;
use gymlog::models::{
    Exercise, NewSet, NewWorkout, ProgramDay, ProgramExercise, Unit, WorkoutSession,
};
use gymlog::repositories::{ExerciseRepository, WorkoutRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
        exercise_repo: exercise_repo.clone(),
    };
    let progress_state = progress::ProgressState {
        workout_repo: workout_repo.clone(),
    };

    gymlog::routes::create_router(exercises_state, workouts_state, progress_state)
}

// Test data creation helpers
pub async fn create_test_exercise(
    pool: &DbPool,
    name: &'static str,
    day: ProgramDay,
    order: i64,
    sets: i64,
    is_unilateral: bool,
) -> Exercise {
    let exercise_repo = ExerciseRepository::new(pool.clone());
    exercise_repo
        .create(
            ProgramExercise {
                name,
                day,
                sets,
                rep_range_min: 6,
                rep_range_max: 10,
                is_unilateral,
                notes: None,
            },
            order,
        )
        .await
        .unwrap()
}

pub async fn create_test_workout(
    pool: &DbPool,
    date: &str,
    day_type: ProgramDay,
    sets: Vec<NewSet>,
) -> WorkoutSession {
    let workout_repo = WorkoutRepository::new(pool.clone());
    workout_repo
        .create_workout(NewWorkout {
            date: chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            day_type,
            sets,
        })
        .await
        .unwrap()
}

pub fn logged_set(exercise_id: i64, set_number: i64, weight: f64, reps: i64, unit: Unit) -> NewSet {
    NewSet {
        exercise_id,
        set_number,
        weight: Some(weight),
        reps: Some(reps),
        skipped: false,
        side: None,
        unit: Some(unit),
    }
}

pub fn skipped_set(exercise_id: i64, set_number: i64) -> NewSet {
    NewSet {
        exercise_id,
        set_number,
        weight: None,
        reps: None,
        skipped: true,
        side: None,
        unit: None,
    }
}

// Request helpers
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
