use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::extract::AppQuery;
use crate::models::{Exercise, ProgramDay};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

#[derive(Deserialize)]
pub struct ListQuery {
    day: Option<String>,
}

pub async fn list(
    State(state): State<ExercisesState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<Exercise>>> {
    let day = query
        .day
        .as_deref()
        .and_then(ProgramDay::parse)
        .ok_or_else(|| AppError::Validation("Invalid day parameter. Must be A or B.".to_string()))?;

    let exercises = state.exercise_repo.find_by_day(day).await?;

    Ok(Json(exercises))
}
