use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};
use common::error::DatabaseError;

use api::{
    jwt::{JwtConfig, JwtService},
    repositories::{
        BudgetRepository, CategoryRepository, GoalRepository, IncomeSettingRepository,
        TransactionRepository, UserRepository,
    },
    routes, seed,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting Spendly API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Run pending migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    // Initialize JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config)?;

    // Load the default category catalogue
    let catalogue_path = seed::catalogue_path_from_env();
    let default_catalogue = seed::load_catalogue(&catalogue_path)?;
    info!(
        "Loaded default category catalogue: {} entries",
        default_catalogue.len()
    );

    let app_state = AppState {
        db_pool: pool.clone(),
        jwt_service,
        user_repository: UserRepository::new(pool.clone()),
        category_repository: CategoryRepository::new(pool.clone()),
        transaction_repository: TransactionRepository::new(pool.clone()),
        budget_repository: BudgetRepository::new(pool.clone()),
        goal_repository: GoalRepository::new(pool.clone()),
        income_repository: IncomeSettingRepository::new(pool),
        default_catalogue: Arc::new(default_catalogue),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Spendly API service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
