use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::from_row::parse_text;
use super::{Exercise, FromSqliteRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Lbs,
    Kg,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Lbs => "lbs",
            Unit::Kg => "kg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lbs" => Some(Unit::Lbs),
            "kg" => Some(Unit::Kg),
            _ => None,
        }
    }
}

impl ToSql for Unit {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Unit {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_text(value, "unit", Unit::parse)
    }
}

/// Which limb a unilateral set was performed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Both,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            "both" => Some(Side::Both),
            _ => None,
        }
    }
}

impl ToSql for Side {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Side {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_text(value, "side", Side::parse)
    }
}

/// A stored set entry. `weight` and `reps` are `None` when the set was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLog {
    pub id: i64,
    pub session_id: i64,
    pub exercise_id: i64,
    pub set_number: i64,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
    pub skipped: bool,
    pub side: Option<Side>,
    pub unit: Unit,
}

impl FromSqliteRow for SetLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            session_id: row.get("session_id")?,
            exercise_id: row.get("exercise_id")?,
            set_number: row.get("set_number")?,
            weight: row.get("weight")?,
            reps: row.get("reps")?,
            skipped: row.get("skipped")?,
            side: row.get("side")?,
            unit: row.get("unit")?,
        })
    }
}

/// A set as submitted by the client when saving a workout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSet {
    pub exercise_id: i64,
    pub set_number: i64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub unit: Option<Unit>,
}

impl NewSet {
    /// Weight and reps as they are stored: both cleared on a skipped set.
    pub fn stored_values(&self) -> (Option<f64>, Option<i64>) {
        if self.skipped {
            (None, None)
        } else {
            (self.weight, self.reps)
        }
    }

    pub fn unit_or_default(&self) -> Unit {
        self.unit.unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.set_number < 1 {
            return Err(format!(
                "setNumber must be at least 1 (exercise {})",
                self.exercise_id
            ));
        }
        if self.skipped {
            return Ok(());
        }
        // Null weight and reps are reserved for skipped sets
        let (Some(weight), Some(reps)) = (self.weight, self.reps) else {
            return Err(format!(
                "weight and reps are required unless the set is skipped (exercise {}, set {})",
                self.exercise_id, self.set_number
            ));
        };
        if !weight.is_finite() || weight < 0.0 {
            return Err(format!(
                "weight must be a non-negative number (exercise {}, set {})",
                self.exercise_id, self.set_number
            ));
        }
        if reps < 0 {
            return Err(format!(
                "reps must not be negative (exercise {}, set {})",
                self.exercise_id, self.set_number
            ));
        }
        Ok(())
    }
}

/// A set entry paired with the exercise it targets, as listed in history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLogWithExercise {
    pub set_log: SetLog,
    pub exercise: Exercise,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_set(weight: Option<f64>, reps: Option<i64>, skipped: bool) -> NewSet {
        NewSet {
            exercise_id: 1,
            set_number: 1,
            weight,
            reps,
            skipped,
            side: None,
            unit: None,
        }
    }

    #[test]
    fn test_unit_parse_and_default() {
        assert_eq!(Unit::parse("lbs"), Some(Unit::Lbs));
        assert_eq!(Unit::parse("kg"), Some(Unit::Kg));
        assert_eq!(Unit::parse("KG"), None);
        assert_eq!(Unit::default(), Unit::Lbs);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("left"), Some(Side::Left));
        assert_eq!(Side::parse("right"), Some(Side::Right));
        assert_eq!(Side::parse("both"), Some(Side::Both));
        assert_eq!(Side::parse("middle"), None);
    }

    #[test]
    fn test_skipped_set_clears_weight_and_reps() {
        let set = new_set(Some(95.0), Some(10), true);
        assert_eq!(set.stored_values(), (None, None));

        let set = new_set(Some(95.0), Some(10), false);
        assert_eq!(set.stored_values(), (Some(95.0), Some(10)));
    }

    #[test]
    fn test_new_set_deserializes_with_defaults() {
        let set: NewSet =
            serde_json::from_str(r#"{"exerciseId": 3, "setNumber": 2, "weight": 40.5}"#).unwrap();
        assert_eq!(set.exercise_id, 3);
        assert_eq!(set.reps, None);
        assert!(!set.skipped);
        assert_eq!(set.unit_or_default(), Unit::Lbs);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(new_set(Some(100.0), Some(5), false).validate().is_ok());
        assert!(new_set(Some(-1.0), Some(5), false).validate().is_err());
        assert!(new_set(Some(100.0), Some(-2), false).validate().is_err());
        assert!(new_set(Some(f64::NAN), Some(5), false).validate().is_err());
        // Values on a skipped set are discarded, not validated
        assert!(new_set(Some(-1.0), Some(-2), true).validate().is_ok());

        let mut set = new_set(None, None, true);
        set.set_number = 0;
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_validate_requires_values_on_logged_set() {
        assert!(new_set(None, None, false).validate().is_err());
        assert!(new_set(Some(100.0), None, false).validate().is_err());
        assert!(new_set(None, Some(5), false).validate().is_err());
        assert!(new_set(None, None, true).validate().is_ok());
        // Bodyweight work logs zero weight
        assert!(new_set(Some(0.0), Some(12), false).validate().is_ok());
    }
}
