//! Per-date rollup of an exercise's logged sets for charting.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::Row;
use serde::Serialize;

use super::{FromSqliteRow, Unit};

/// How many of the most recent set entries feed a progress series.
pub const PROGRESS_WINDOW: i64 = 50;

/// A logged set for one exercise, annotated with its session's date.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub unit: Unit,
}

impl FromSqliteRow for ProgressEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get("date")?,
            weight: row.get("weight")?,
            reps: row.get("reps")?,
            unit: row.get("unit")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub max_weight: f64,
    pub total_volume: f64,
    pub unit: Unit,
}

/// Groups `entries` (newest first) into one point per date and unit.
///
/// Entries missing weight or reps are skipped sets and contribute nothing.
/// A date logged in both units yields one point per unit, so a point never
/// mixes units. The result runs oldest to newest.
pub fn aggregate_progress(entries: &[ProgressEntry]) -> Vec<ProgressPoint> {
    let mut points: Vec<ProgressPoint> = Vec::new();
    let mut buckets: HashMap<(NaiveDate, Unit), usize> = HashMap::new();

    for entry in entries {
        let (Some(weight), Some(reps)) = (entry.weight, entry.reps) else {
            continue;
        };
        let volume = weight * reps as f64;

        match buckets.entry((entry.date, entry.unit)) {
            Entry::Occupied(slot) => {
                let point = &mut points[*slot.get()];
                point.max_weight = point.max_weight.max(weight);
                point.total_volume += volume;
            }
            Entry::Vacant(slot) => {
                slot.insert(points.len());
                points.push(ProgressPoint {
                    date: entry.date,
                    max_weight: weight,
                    total_volume: volume,
                    unit: entry.unit,
                });
            }
        }
    }

    points.reverse();
    // Stable, so same-date points keep their reversed first-seen order.
    points.sort_by_key(|p| p.date);
    points
}
