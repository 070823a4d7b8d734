use axum::{extract::State, Json};
use serde::Deserialize;

use super::{optional_date, required_id};
use crate::error::Result;
use crate::extract::AppQuery;
use crate::models::ProgressPoint;
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct ProgressState {
    pub workout_repo: WorkoutRepository,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    exercise_id: Option<String>,
    until: Option<String>,
}

/// Chart series for one exercise. An exercise with no usable sets yields `[]`.
pub async fn exercise_progress(
    State(state): State<ProgressState>,
    AppQuery(query): AppQuery<ProgressQuery>,
) -> Result<Json<Vec<ProgressPoint>>> {
    let exercise_id = required_id(query.exercise_id.as_deref(), "exerciseId")?;
    let until = optional_date(query.until.as_deref(), "until")?;

    let series = state.workout_repo.progress(exercise_id, until).await?;

    Ok(Json(series))
}
