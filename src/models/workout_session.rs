use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{FromSqliteRow, NewSet, ProgramDay, SetLogWithExercise};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: i64,
    pub date: NaiveDate,
    pub day_type: ProgramDay,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for WorkoutSession {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            day_type: row.get("day_type")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Request body for creating or replacing a workout.
///
/// Fields are optional here so that a missing one is reported as a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPayload {
    pub date: Option<String>,
    pub day_type: Option<String>,
    pub sets: Option<Vec<NewSet>>,
}

/// A validated workout ready to be written.
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub day_type: ProgramDay,
    pub sets: Vec<NewSet>,
}

impl WorkoutPayload {
    pub fn validate(self) -> Result<NewWorkout, String> {
        let (Some(date), Some(day_type), Some(sets)) = (self.date, self.day_type, self.sets)
        else {
            return Err("Missing required fields".to_string());
        };

        let date = parse_date(&date).ok_or_else(|| format!("Invalid date: {}", date))?;
        let day_type = ProgramDay::parse(&day_type)
            .ok_or_else(|| "Invalid dayType. Must be A or B.".to_string())?;

        for set in &sets {
            set.validate()?;
        }

        Ok(NewWorkout {
            date,
            day_type,
            sets,
        })
    }
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// A session with every set logged in it, for the history view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutWithSets {
    #[serde(flatten)]
    pub session: WorkoutSession,
    pub sets: Vec<SetLogWithExercise>,
}
