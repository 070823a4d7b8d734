use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{exercises, health, progress, workouts};

pub fn create_router(
    exercises_state: exercises::ExercisesState,
    workouts_state: workouts::WorkoutsState,
    progress_state: progress::ProgressState,
) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Exercise catalog
        .route("/api/exercises", get(exercises::list))
        .with_state(exercises_state)
        // Workout routes
        .route(
            "/api/workouts",
            get(workouts::list)
                .post(workouts::create)
                .delete(workouts::delete),
        )
        .route("/api/workouts/{id}", put(workouts::replace))
        .route("/api/workouts/last-sets", get(workouts::last_sets))
        .route("/api/workouts/draft", get(workouts::draft))
        .with_state(workouts_state)
        // Progress routes
        .route("/api/progress", get(progress::exercise_progress))
        .with_state(progress_state)
        .layer(TraceLayer::new_for_http())
}
