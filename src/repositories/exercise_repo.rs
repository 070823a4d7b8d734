use rusqlite::Connection;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Exercise, FromSqliteRow, ProgramDay, ProgramExercise};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_day(&self, day: ProgramDay) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn
                .prepare("SELECT * FROM exercises WHERE day = ? ORDER BY display_order, id")?;
            let exercises = stmt
                .query_map([day], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, exercise: ProgramExercise, order: i64) -> Result<Exercise> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Exercise> {
            let conn = pool.get()?;
            let id = insert_exercise(&conn, &exercise, order)?;
            Ok(Exercise {
                id,
                name: exercise.name.to_string(),
                day: exercise.day,
                order,
                sets: exercise.sets,
                rep_range_min: exercise.rep_range_min,
                rep_range_max: exercise.rep_range_max,
                is_unilateral: exercise.is_unilateral,
                notes: exercise.notes.map(|s| s.to_string()),
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Inserts `program` when the catalog is empty. Returns how many
    /// exercises were inserted; zero means the catalog was already seeded.
    pub async fn seed_program(&self, program: &'static [ProgramExercise]) -> Result<usize> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<usize> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let existing: i64 =
                tx.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
            if existing > 0 {
                return Ok(0);
            }

            let (mut order_a, mut order_b) = (0, 0);
            for exercise in program {
                let counter = match exercise.day {
                    ProgramDay::A => &mut order_a,
                    ProgramDay::B => &mut order_b,
                };
                *counter += 1;
                insert_exercise(&tx, exercise, *counter)?;
            }

            tx.commit()?;
            Ok(program.len())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn insert_exercise(conn: &Connection, exercise: &ProgramExercise, order: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO exercises (name, day, display_order, sets, rep_range_min, rep_range_max, is_unilateral, notes)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            exercise.name,
            exercise.day,
            order,
            exercise.sets,
            exercise.rep_range_min,
            exercise.rep_range_max,
            exercise.is_unilateral,
            exercise.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
