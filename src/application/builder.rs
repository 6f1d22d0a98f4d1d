use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

use crate::api::middleware::auth::JwtVerifier;
use crate::api::router::AppState;
use crate::application::{
    ports::{ResourceRepository, UserRepository},
    use_cases::{
        CreateResourceUseCase, DeleteResourceUseCase, InteractWithResourceUseCase,
        LeaderboardUseCase, ListResourcesUseCase, ListSavedResourcesUseCase, ListUploadsUseCase,
    },
};
use crate::config::{Config, StorageBackend};
use crate::infrastructure::persistence::{
    InMemoryResourceRepository, InMemoryUserRepository, PostgresResourceRepository,
    PostgresUserRepository,
};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0} not initialized")]
    NotInitialized(&'static str),
}

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    resource_repo: Option<Arc<dyn ResourceRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            resource_repo: None,
            user_repo: None,
        }
    }

    /// Set up whichever backend the configuration selects
    pub async fn with_storage(self) -> Result<Self, BuildError> {
        match self.config.storage_backend {
            StorageBackend::Postgres => self.with_database().await?.with_infrastructure(),
            StorageBackend::Memory => Ok(self.with_in_memory_storage()),
        }
    }

    /// Initialize database connection pool with retry logic
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(e.into());
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Create Postgres repositories on the initialized pool
    pub fn with_infrastructure(mut self) -> Result<Self, BuildError> {
        let pool = self.pool.as_ref().ok_or(BuildError::NotInitialized("Database pool"))?;

        self.resource_repo = Some(Arc::new(PostgresResourceRepository::new(pool.clone())));
        self.user_repo = Some(Arc::new(PostgresUserRepository::new(pool.clone())));

        info!("Postgres repositories initialized");
        Ok(self)
    }

    /// Use empty process-local repositories
    pub fn with_in_memory_storage(self) -> Self {
        info!("Using in-memory storage; data will not survive a restart");
        self.with_repositories(
            Arc::new(InMemoryResourceRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }

    /// Use caller-supplied repositories
    pub fn with_repositories(
        mut self,
        resource_repo: Arc<dyn ResourceRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        self.resource_repo = Some(resource_repo);
        self.user_repo = Some(user_repo);
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let resource_repo = self
            .resource_repo
            .ok_or(BuildError::NotInitialized("Resource repository"))?;
        let user_repo = self
            .user_repo
            .ok_or(BuildError::NotInitialized("User repository"))?;

        let interact_use_case =
            Arc::new(InteractWithResourceUseCase::new(Arc::clone(&resource_repo)));
        let list_use_case = Arc::new(ListResourcesUseCase::new(
            Arc::clone(&resource_repo),
            self.config.resource_list_limit,
            self.config.resource_list_max_limit,
        ));
        let saved_use_case = Arc::new(ListSavedResourcesUseCase::new(Arc::clone(&resource_repo)));
        let uploads_use_case = Arc::new(ListUploadsUseCase::new(Arc::clone(&resource_repo)));
        let create_use_case = Arc::new(CreateResourceUseCase::new(
            Arc::clone(&resource_repo),
            Arc::clone(&user_repo),
        ));
        let delete_use_case = Arc::new(DeleteResourceUseCase::new(Arc::clone(&resource_repo)));
        let leaderboard_use_case = Arc::new(LeaderboardUseCase::new(
            Arc::clone(&user_repo),
            Arc::clone(&resource_repo),
        ));

        info!("Application layer initialized");

        Ok(AppState {
            pool: self.pool.map(Arc::new),
            jwt: Arc::new(JwtVerifier::new(&self.config.jwt_secret)),
            interact_use_case,
            list_use_case,
            saved_use_case,
            uploads_use_case,
            create_use_case,
            delete_use_case,
            leaderboard_use_case,
            config: self.config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
