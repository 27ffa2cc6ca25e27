use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::Config;
use crate::db;
use crate::services::user_store::UserStore;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: Arc<UserStore>,
    pub config: Config,
}

impl AppState {
    /// Opens the database, applies migrations, seeds sample data when enabled
    /// and builds the user store.
    pub async fn initialize(config: Config) -> anyhow::Result<Self> {
        let pool = db::create_pool(&config.database_url, config.max_connections).await?;
        tracing::info!("Database pool created");

        db::run_migrations(&pool).await?;
        tracing::info!("Database migrations completed");

        if config.seed_sample_data {
            let inserted = db::seed_sample_data(&pool).await?;
            tracing::info!(inserted, "Sample cash cards seeded");
        }

        let users = UserStore::new(UserStore::sample_users(), config.password_hash_iterations)?;
        tracing::info!(users = users.len(), "User store initialized");

        Ok(Self {
            pool,
            users: Arc::new(users),
            config,
        })
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.pool.clone()
    }
}
