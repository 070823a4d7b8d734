use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension};

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    aggregate_progress, Exercise, FromSqliteRow, LastSets, NewSet, NewWorkout, ProgressEntry,
    ProgressPoint, SetLog, SetLogWithExercise, WorkoutSession, WorkoutWithSets, PROGRESS_WINDOW,
};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Workout Sessions

    /// Creates the session and all of its sets in one transaction.
    pub async fn create_workout(&self, workout: NewWorkout) -> Result<WorkoutSession> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<WorkoutSession> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            ensure_exercises_exist(&tx, &workout.sets)?;

            let created_at = Utc::now();
            tx.execute(
                "INSERT INTO workout_sessions (date, day_type, created_at) VALUES (?, ?, ?)",
                rusqlite::params![workout.date, workout.day_type, created_at],
            )?;
            let id = tx.last_insert_rowid();

            insert_sets(&tx, id, &workout.sets)?;
            tx.commit()?;

            tracing::debug!(
                "Created workout session {} on {} with {} sets",
                id,
                workout.date,
                workout.sets.len()
            );

            Ok(WorkoutSession {
                id,
                date: workout.date,
                day_type: workout.day_type,
                created_at,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Rewrites a session's date, day and sets in one transaction.
    /// Returns `None` when the session does not exist.
    pub async fn replace_workout(
        &self,
        id: i64,
        workout: NewWorkout,
    ) -> Result<Option<WorkoutSession>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Option<WorkoutSession>> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let updated = tx.execute(
                "UPDATE workout_sessions SET date = ?, day_type = ? WHERE id = ?",
                rusqlite::params![workout.date, workout.day_type, id],
            )?;
            if updated == 0 {
                return Ok(None);
            }

            ensure_exercises_exist(&tx, &workout.sets)?;
            tx.execute("DELETE FROM set_logs WHERE session_id = ?", [id])?;
            insert_sets(&tx, id, &workout.sets)?;

            let session = tx.query_row(
                "SELECT * FROM workout_sessions WHERE id = ?",
                [id],
                WorkoutSession::from_row,
            )?;
            tx.commit()?;

            Ok(Some(session))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Deletes a session; its sets go with it through the cascade.
    pub async fn delete_session(&self, id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM workout_sessions WHERE id = ?", [id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Latest sessions first, each with its sets and their exercises.
    pub async fn find_recent_with_sets(&self, limit: i64) -> Result<Vec<WorkoutWithSets>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<WorkoutWithSets>> {
            let conn = pool.get()?;

            let exercises: HashMap<i64, Exercise> = conn
                .prepare("SELECT * FROM exercises")?
                .query_map([], Exercise::from_row)?
                .map(|r| r.map(|e| (e.id, e)))
                .collect::<rusqlite::Result<_>>()?;

            let sessions = conn
                .prepare(
                    "SELECT * FROM workout_sessions
                     ORDER BY date DESC, created_at DESC, id DESC
                     LIMIT ?",
                )?
                .query_map([limit], WorkoutSession::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut stmt =
                conn.prepare("SELECT * FROM set_logs WHERE session_id = ? ORDER BY id")?;
            let mut workouts = Vec::with_capacity(sessions.len());
            for session in sessions {
                let sets = stmt
                    .query_map([session.id], SetLog::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
                    .into_iter()
                    // Exercises are not cascaded; sets of a removed one are dropped
                    .filter_map(|set_log| {
                        exercises
                            .get(&set_log.exercise_id)
                            .cloned()
                            .map(|exercise| SetLogWithExercise { set_log, exercise })
                    })
                    .collect();
                workouts.push(WorkoutWithSets { session, sets });
            }

            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Last-state resolution

    /// Most recent session logging `exercise_id`, strictly before `before`
    /// when given. Same-date sessions resolve to the latest created.
    pub async fn find_last_session_for_exercise(
        &self,
        exercise_id: i64,
        before: Option<NaiveDate>,
    ) -> Result<Option<(i64, NaiveDate)>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Option<(i64, NaiveDate)>> {
            let conn = pool.get()?;
            Ok(last_session_for_exercise(&conn, exercise_id, before)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_sets_for_session_exercise(
        &self,
        session_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<SetLog>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<SetLog>> {
            let conn = pool.get()?;
            Ok(sets_for_session_exercise(&conn, session_id, exercise_id)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// What was logged for `exercise_id` last time, for pre-filling a session.
    pub async fn last_sets(&self, exercise_id: i64, before: Option<NaiveDate>) -> Result<LastSets> {
        let Some((session_id, date)) = self
            .find_last_session_for_exercise(exercise_id, before)
            .await?
        else {
            return Ok(LastSets::empty());
        };

        let sets = self
            .find_sets_for_session_exercise(session_id, exercise_id)
            .await?;

        Ok(LastSets::from_session(date, sets))
    }

    // Progress

    /// Up to `limit` entries for `exercise_id`, newest first, on or before
    /// `until` when given.
    pub async fn find_progress_entries(
        &self,
        exercise_id: i64,
        until: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<ProgressEntry>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT ws.date AS date, sl.weight AS weight, sl.reps AS reps, sl.unit AS unit
                 FROM set_logs sl
                 JOIN workout_sessions ws ON sl.session_id = ws.id
                 WHERE sl.exercise_id = ?1 AND (?2 IS NULL OR ws.date <= ?2)
                 ORDER BY ws.date DESC, ws.created_at DESC, ws.id DESC, sl.set_number
                 LIMIT ?3",
            )?;
            let entries = stmt
                .query_map(
                    rusqlite::params![exercise_id, until, limit],
                    ProgressEntry::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Peak weight and volume per date over the recent window.
    pub async fn progress(
        &self,
        exercise_id: i64,
        until: Option<NaiveDate>,
    ) -> Result<Vec<ProgressPoint>> {
        let entries = self
            .find_progress_entries(exercise_id, until, PROGRESS_WINDOW)
            .await?;
        Ok(aggregate_progress(&entries))
    }
}

fn ensure_exercises_exist(conn: &Connection, sets: &[NewSet]) -> Result<()> {
    let ids: BTreeSet<i64> = sets.iter().map(|s| s.exercise_id).collect();
    let mut stmt = conn.prepare("SELECT COUNT(*) > 0 FROM exercises WHERE id = ?")?;
    for id in ids {
        let exists: bool = stmt.query_row([id], |row| row.get(0))?;
        if !exists {
            return Err(AppError::Validation(format!("Unknown exercise: {}", id)));
        }
    }
    Ok(())
}

fn insert_sets(conn: &Connection, session_id: i64, sets: &[NewSet]) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO set_logs (session_id, exercise_id, set_number, weight, reps, skipped, side, unit)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )?;
    for set in sets {
        let (weight, reps) = set.stored_values();
        stmt.execute(rusqlite::params![
            session_id,
            set.exercise_id,
            set.set_number,
            weight,
            reps,
            set.skipped,
            set.side,
            set.unit_or_default(),
        ])?;
    }
    Ok(())
}

fn last_session_for_exercise(
    conn: &Connection,
    exercise_id: i64,
    before: Option<NaiveDate>,
) -> rusqlite::Result<Option<(i64, NaiveDate)>> {
    conn.query_row(
        "SELECT ws.id, ws.date
         FROM workout_sessions ws
         JOIN set_logs sl ON sl.session_id = ws.id
         WHERE sl.exercise_id = ?1 AND (?2 IS NULL OR ws.date < ?2)
         ORDER BY ws.date DESC, ws.created_at DESC, ws.id DESC
         LIMIT 1",
        rusqlite::params![exercise_id, before],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
}

fn sets_for_session_exercise(
    conn: &Connection,
    session_id: i64,
    exercise_id: i64,
) -> rusqlite::Result<Vec<SetLog>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM set_logs
         WHERE session_id = ? AND exercise_id = ?
         ORDER BY set_number, id",
    )?;
    let sets = stmt
        .query_map([session_id, exercise_id], SetLog::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(sets)
}
