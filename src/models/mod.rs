pub mod exercise;
pub mod from_row;
pub mod last_sets;
pub mod progress;
pub mod set_log;
pub mod workout_session;

pub use exercise::{Exercise, ProgramDay, ProgramExercise, DEFAULT_PROGRAM};
pub use from_row::FromSqliteRow;
pub use last_sets::{ExerciseDraft, LastSetHint, LastSets, SessionDraft, SetDraft};
pub use progress::{aggregate_progress, ProgressEntry, ProgressPoint, PROGRESS_WINDOW};
pub use set_log::{NewSet, SetLog, SetLogWithExercise, Side, Unit};
pub use workout_session::{parse_date, NewWorkout, WorkoutPayload, WorkoutSession, WorkoutWithSets};
