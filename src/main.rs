use leetboard::{
    contest::repository::{ContestRepository, InMemoryContestRepository, PostgresContestRepository},
    profile::repository::{InMemoryProfileRepository, PostgresProfileRepository, ProfileRepository},
    AppConfig, AppState, ContestAggregationService, HttpStatsClient,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Repositories = (
    Arc<dyn ContestRepository + Send + Sync>,
    Arc<dyn ProfileRepository + Send + Sync>,
);

async fn build_repositories(config: &AppConfig) -> Result<Repositories, sqlx::Error> {
    match &config.database_url {
        Some(database_url) => {
            info!("Connecting to PostgreSQL");
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;

            let contests: Arc<dyn ContestRepository + Send + Sync> =
                Arc::new(PostgresContestRepository::new(pool.clone()));
            let profiles: Arc<dyn ProfileRepository + Send + Sync> =
                Arc::new(PostgresProfileRepository::new(pool));
            Ok((contests, profiles))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory repositories");
            let profiles: Arc<dyn ProfileRepository + Send + Sync> =
                Arc::new(InMemoryProfileRepository::new());
            let contests: Arc<dyn ContestRepository + Send + Sync> =
                Arc::new(InMemoryContestRepository::new(profiles.clone()));
            Ok((contests, profiles))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leetboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contest leaderboard server");

    let config = AppConfig::from_env();
    let (contest_repository, profile_repository) = build_repositories(&config).await?;

    let stats_client = Arc::new(HttpStatsClient::new(
        &config.stats_api_url,
        config.stats_timeout,
    )?);
    info!(stats_api_url = %config.stats_api_url, timeout = ?config.stats_timeout, "Stats client ready");

    let aggregation_service = Arc::new(
        ContestAggregationService::builder(contest_repository.clone(), stats_client).build(),
    );
    let app_state = AppState::new(contest_repository, profile_repository, aggregation_service);
    let app = leetboard::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
