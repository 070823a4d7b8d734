use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{optional_date, required_id};
use crate::error::{AppError, Result};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::{
    ExerciseDraft, LastSets, ProgramDay, SessionDraft, WorkoutPayload, WorkoutWithSets,
};
use crate::repositories::{ExerciseRepository, WorkoutRepository};

const DEFAULT_HISTORY_LIMIT: i64 = 20;
const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
    pub exercise_repo: ExerciseRepository,
}

// Query params
#[derive(Deserialize)]
pub struct ListQuery {
    limit: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    session_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSetsQuery {
    exercise_id: Option<String>,
    before_date: Option<String>,
}

#[derive(Deserialize)]
pub struct DraftQuery {
    day: Option<String>,
    date: Option<String>,
}

// Responses
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkout {
    success: bool,
    session_id: i64,
}

#[derive(Serialize)]
pub struct Deleted {
    success: bool,
}

// Handlers
pub async fn list(
    State(state): State<WorkoutsState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<WorkoutWithSets>>> {
    let limit = match query.limit.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_HISTORY_LIMIT,
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| AppError::Validation("limit must be an integer".to_string()))?,
    }
    .clamp(1, MAX_HISTORY_LIMIT);

    let workouts = state.workout_repo.find_recent_with_sets(limit).await?;

    Ok(Json(workouts))
}

pub async fn create(
    State(state): State<WorkoutsState>,
    AppJson(payload): AppJson<WorkoutPayload>,
) -> Result<Json<SavedWorkout>> {
    let workout = payload.validate().map_err(AppError::Validation)?;

    let session = state.workout_repo.create_workout(workout).await?;
    tracing::info!("Saved workout session {} for {}", session.id, session.date);

    Ok(Json(SavedWorkout {
        success: true,
        session_id: session.id,
    }))
}

pub async fn replace(
    State(state): State<WorkoutsState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<WorkoutPayload>,
) -> Result<Json<SavedWorkout>> {
    let workout = payload.validate().map_err(AppError::Validation)?;

    let session = state
        .workout_repo
        .replace_workout(id, workout)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    tracing::info!("Replaced workout session {}", session.id);

    Ok(Json(SavedWorkout {
        success: true,
        session_id: session.id,
    }))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    AppQuery(query): AppQuery<DeleteQuery>,
) -> Result<Json<Deleted>> {
    let session_id = required_id(query.session_id.as_deref(), "sessionId")?;

    if !state.workout_repo.delete_session(session_id).await? {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }
    tracing::info!("Deleted workout session {}", session_id);

    Ok(Json(Deleted { success: true }))
}

/// Sets logged for an exercise in the latest session before `beforeDate`.
pub async fn last_sets(
    State(state): State<WorkoutsState>,
    AppQuery(query): AppQuery<LastSetsQuery>,
) -> Result<Json<LastSets>> {
    let exercise_id = required_id(query.exercise_id.as_deref(), "exerciseId")?;
    let before = optional_date(query.before_date.as_deref(), "beforeDate")?;

    let last = state.workout_repo.last_sets(exercise_id, before).await?;

    Ok(Json(last))
}

/// Input sheet for a new session of `day` on `date` (today by default),
/// pre-filled with what was logged last time before that date.
pub async fn draft(
    State(state): State<WorkoutsState>,
    AppQuery(query): AppQuery<DraftQuery>,
) -> Result<Json<SessionDraft>> {
    let day_type = query
        .day
        .as_deref()
        .and_then(ProgramDay::parse)
        .ok_or_else(|| AppError::Validation("Invalid day parameter. Must be A or B.".to_string()))?;
    let date = optional_date(query.date.as_deref(), "date")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let exercises = state.exercise_repo.find_by_day(day_type).await?;

    let mut drafts = Vec::with_capacity(exercises.len());
    for exercise in exercises {
        let last = state.workout_repo.last_sets(exercise.id, Some(date)).await?;
        drafts.push(ExerciseDraft::build(exercise, last));
    }

    Ok(Json(SessionDraft {
        date,
        day_type,
        exercises: drafts,
    }))
}
