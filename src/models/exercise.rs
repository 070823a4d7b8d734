use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::parse_text;
use super::FromSqliteRow;

/// One of the two alternating groupings of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramDay {
    A,
    B,
}

impl ProgramDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramDay::A => "A",
            ProgramDay::B => "B",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(ProgramDay::A),
            "B" => Some(ProgramDay::B),
            _ => None,
        }
    }
}

impl ToSql for ProgramDay {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ProgramDay {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_text(value, "program day", ProgramDay::parse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub day: ProgramDay,
    pub order: i64,
    pub sets: i64,
    pub rep_range_min: i64,
    pub rep_range_max: i64,
    pub is_unilateral: bool,
    pub notes: Option<String>,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            day: row.get("day")?,
            order: row.get("display_order")?,
            sets: row.get("sets")?,
            rep_range_min: row.get("rep_range_min")?,
            rep_range_max: row.get("rep_range_max")?,
            is_unilateral: row.get("is_unilateral")?,
            notes: row.get("notes")?,
        })
    }
}

/// Seed definition of a program exercise.
#[derive(Debug, Clone, Copy)]
pub struct ProgramExercise {
    pub name: &'static str,
    pub day: ProgramDay,
    pub sets: i64,
    pub rep_range_min: i64,
    pub rep_range_max: i64,
    pub is_unilateral: bool,
    pub notes: Option<&'static str>,
}

const fn program(
    name: &'static str,
    day: ProgramDay,
    sets: i64,
    reps: (i64, i64),
    is_unilateral: bool,
    notes: Option<&'static str>,
) -> ProgramExercise {
    ProgramExercise {
        name,
        day,
        sets,
        rep_range_min: reps.0,
        rep_range_max: reps.1,
        is_unilateral,
        notes,
    }
}

/// The default bi-weekly program. Display order follows slice order per day.
pub const DEFAULT_PROGRAM: &[ProgramExercise] = &[
    program("Back Squat", ProgramDay::A, 3, (6, 8), false, None),
    program("Bench Press", ProgramDay::A, 3, (6, 8), false, None),
    program("Chest-Supported Row", ProgramDay::A, 3, (8, 12), false, None),
    program("Bulgarian Split Squat", ProgramDay::A, 2, (8, 12), true, Some("per leg")),
    program("Lateral Raise", ProgramDay::A, 3, (12, 15), false, None),
    program("Hanging Leg Raise", ProgramDay::A, 2, (10, 15), false, Some("AB FINISHER")),
    program("Romanian Deadlift", ProgramDay::B, 3, (6, 10), false, None),
    program("Overhead Press", ProgramDay::B, 3, (6, 8), false, None),
    program("Lat Pulldown", ProgramDay::B, 3, (8, 12), false, None),
    program("Single-Leg Hip Thrust", ProgramDay::B, 2, (10, 12), true, Some("per leg")),
    program("Incline Dumbbell Curl", ProgramDay::B, 2, (10, 15), false, None),
    program("Cable Crunch", ProgramDay::B, 2, (12, 15), false, Some("AB FINISHER")),
];
