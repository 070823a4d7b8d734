use chrono::NaiveDate;
use serde::Serialize;

use super::{Exercise, ProgramDay, SetLog, Side, Unit};

/// What was logged for an exercise in its most recent qualifying session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastSets {
    pub sets: Vec<SetLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub unit: Unit,
}

impl LastSets {
    /// No prior session: no sets, default unit.
    pub fn empty() -> Self {
        Self {
            sets: Vec::new(),
            date: None,
            unit: Unit::default(),
        }
    }

    /// The session's unit is taken from its first set entry.
    pub fn from_session(date: NaiveDate, sets: Vec<SetLog>) -> Self {
        let unit = sets.first().map(|s| s.unit).unwrap_or_default();
        Self {
            sets,
            date: Some(date),
            unit,
        }
    }

    pub fn find_set(&self, set_number: i64) -> Option<&SetLog> {
        self.sets.iter().find(|s| s.set_number == set_number)
    }
}

/// One input row of a new session, pre-filled from last time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDraft {
    pub set_number: i64,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub skipped: bool,
    pub side: Option<Side>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastSetHint {
    pub weight: Option<f64>,
    pub reps: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    pub exercise: Exercise,
    pub sets: Vec<SetDraft>,
    pub last_sets: Vec<LastSetHint>,
    pub last_date: Option<NaiveDate>,
    pub unit: Unit,
}

impl ExerciseDraft {
    /// One row per prescribed set; row `n` copies weight and reps from last
    /// session's set `n` when there was one.
    pub fn build(exercise: Exercise, last: LastSets) -> Self {
        let side = exercise.is_unilateral.then_some(Side::Both);

        let sets = (1..=exercise.sets)
            .map(|set_number| {
                let previous = last.find_set(set_number);
                SetDraft {
                    set_number,
                    weight: previous.and_then(|s| s.weight),
                    reps: previous.and_then(|s| s.reps),
                    skipped: false,
                    side,
                }
            })
            .collect();

        let last_sets = last
            .sets
            .iter()
            .map(|s| LastSetHint {
                weight: s.weight,
                reps: s.reps,
            })
            .collect();

        Self {
            exercise,
            sets,
            last_sets,
            last_date: last.date,
            unit: last.unit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub date: NaiveDate,
    pub day_type: ProgramDay,
    pub exercises: Vec<ExerciseDraft>,
}
