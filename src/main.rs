use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymlog::config::Config;
use gymlog::handlers::{exercises, progress, workouts};
use gymlog::migrations::run_migrations;
use gymlog::models::DEFAULT_PROGRAM;
use gymlog::repositories::{ExerciseRepository, WorkoutRepository};
use gymlog::version::GIT_VERSION;
use gymlog::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gymlog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("gymlog {} starting", GIT_VERSION);
    tracing::info!("Connecting to database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;
    run_migrations(&pool)?;

    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    if config.seed_program {
        let seeded = exercise_repo.seed_program(DEFAULT_PROGRAM).await?;
        if seeded > 0 {
            tracing::info!("Seeded {} program exercises", seeded);
        }
    }

    let exercise_count = exercise_repo.count().await?;
    if exercise_count == 0 {
        tracing::warn!(
            "Exercise catalog is empty; set SEED_PROGRAM=true to load the default program"
        );
    } else {
        tracing::info!("Exercise catalog holds {} exercises", exercise_count);
    }

    // Create handler states
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
        exercise_repo: exercise_repo.clone(),
    };
    let progress_state = progress::ProgressState {
        workout_repo: workout_repo.clone(),
    };

    let app = routes::create_router(exercises_state, workouts_state, progress_state);

    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
